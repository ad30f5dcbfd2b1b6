//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Best-effort evaluation of array sizes and other constant expressions.
//! Anything that cannot be evaluated, such as a macro from a C header, is
//! passed through as its source text instead of failing.
//! That text is the expression as printed back from the syntax tree,
//! so `BUF*2` comes out as `BUF * 2`.

use super::Context;
use crate::common::*;
use crate::symbol::Dimension;

pub fn resolve_all(
	suffixes: &[ArraySuffix],
	context: &Context,
) -> Vec<Dimension>
{
	suffixes
		.iter()
		.filter_map(|suffix| suffix.as_ref())
		.map(|size| resolve(size, context))
		.collect()
}

pub fn resolve(size: &Expression, context: &Context) -> Dimension
{
	match evaluate(size, context)
	{
		Some(value) if value >= 0 => Dimension::Resolved(value as u64),
		_ => Dimension::Unresolved(size.to_string()),
	}
}

pub fn evaluate(expression: &Expression, context: &Context) -> Option<i64>
{
	match expression
	{
		Expression::Integer { literal, .. } =>
		{
			i64::try_from(literal.value).ok()
		}
		Expression::Identifier(x) => context.constant(&x.name),
		Expression::Parenthesized { inner, .. } => evaluate(inner, context),
		Expression::Unary {
			op, expression, ..
		} =>
		{
			let value = evaluate(expression, context)?;
			match op
			{
				UnaryOp::Negative => value.checked_neg(),
				UnaryOp::BitwiseComplement => Some(!value),
				UnaryOp::LogicalNot => None,
			}
		}
		Expression::Binary {
			op, left, right, ..
		} =>
		{
			let left = evaluate(left, context)?;
			let right = evaluate(right, context)?;
			match op
			{
				BinaryOp::Add => left.checked_add(right),
				BinaryOp::Subtract => left.checked_sub(right),
				BinaryOp::Multiply => left.checked_mul(right),
				BinaryOp::Divide => left.checked_div(right),
				BinaryOp::Modulo => left.checked_rem(right),
				BinaryOp::ShiftLeft => u32::try_from(right)
					.ok()
					.and_then(|shift| left.checked_shl(shift)),
				BinaryOp::ShiftRight => u32::try_from(right)
					.ok()
					.and_then(|shift| left.checked_shr(shift)),
				BinaryOp::BitwiseAnd => Some(left & right),
				BinaryOp::BitwiseOr => Some(left | right),
				BinaryOp::BitwiseXor => Some(left ^ right),
				_ => None,
			}
		}
		_ => None,
	}
}

/// The value of an integer literal, optionally negated.
/// Only these initializers define constants usable in array sizes.
pub fn literal_integer(expression: &Expression) -> Option<i64>
{
	match expression
	{
		Expression::Integer { literal, .. } =>
		{
			i64::try_from(literal.value).ok()
		}
		Expression::Unary {
			op: UnaryOp::Negative,
			expression,
			..
		} => match expression.as_ref()
		{
			Expression::Integer { literal, .. } =>
			{
				i64::try_from(literal.value).ok()?.checked_neg()
			}
			_ => None,
		},
		_ => None,
	}
}
