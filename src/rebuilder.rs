//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The rebuilder turns syntax trees back into source text.
//! Expressions that cannot be evaluated at binding time are carried forward
//! as their rebuilt text.

use crate::common::*;

use std::fmt::Write;

pub fn rebuild(
	program: &[Declaration],
	indentation: &Indentation,
) -> Result<String, anyhow::Error>
{
	let mut buffer = String::new();
	for declaration in program
	{
		write!(&mut buffer, "{}\n", declaration.rebuild(indentation)?)?;
	}
	Ok(buffer)
}

pub struct Indentation
{
	pub value: &'static str,
	pub amount: usize,
}

impl Indentation
{
	fn increased(&self) -> Indentation
	{
		Indentation {
			value: self.value,
			amount: self.amount + 1,
		}
	}
}

impl std::fmt::Display for Indentation
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		write!(f, "{}", self.value.repeat(self.amount))
	}
}

pub trait Rebuildable
{
	fn rebuild(
		&self,
		indentation: &Indentation,
	) -> Result<String, anyhow::Error>;
}

impl Rebuildable for Declaration
{
	fn rebuild(
		&self,
		indentation: &Indentation,
	) -> Result<String, anyhow::Error>
	{
		let mut buffer = String::new();
		write!(&mut buffer, "{}", indentation)?;
		write_flags(&mut buffer, self.flags())?;
		match self
		{
			Declaration::Include {
				path,
				is_system: false,
				location: _,
			} => write!(&mut buffer, "#include \"{}\"", path)?,
			Declaration::Include {
				path,
				is_system: true,
				location: _,
			} => write!(&mut buffer, "#include <{}>", path)?,
			Declaration::Variable(variable) =>
			{
				write!(
					&mut buffer,
					"{} {}",
					variable.value_type.name, variable.name.name
				)?;
				write_suffixes(&mut buffer, &variable.dimensions)?;
				if let Some(value) = &variable.value
				{
					write!(&mut buffer, " <- {}", value)?;
				}
				write!(&mut buffer, ";")?;
			}
			Declaration::Function(function) =>
			{
				write!(
					&mut buffer,
					"{} {}(",
					function.return_type.name, function.name.name
				)?;
				for (i, parameter) in function.parameters.iter().enumerate()
				{
					if i > 0
					{
						write!(&mut buffer, ", ")?;
					}
					write_flags(&mut buffer, parameter.flags)?;
					write!(
						&mut buffer,
						"{} {}",
						parameter.value_type.name, parameter.name.name
					)?;
					write_suffixes(&mut buffer, &parameter.dimensions)?;
				}
				if function.has_body
				{
					write!(&mut buffer, ") {{ ... }}")?;
				}
				else
				{
					write!(&mut buffer, ");")?;
				}
			}
			Declaration::Structure(structure) =>
			{
				writeln!(&mut buffer, "struct {}", structure.name.name)?;
				writeln!(&mut buffer, "{}{{", indentation)?;
				let inner = indentation.increased();
				for member in &structure.members
				{
					write!(&mut buffer, "{}", inner)?;
					write_flags(&mut buffer, member.flags)?;
					write!(
						&mut buffer,
						"{} {}",
						member.value_type.name, member.name.name
					)?;
					write_suffixes(&mut buffer, &member.dimensions)?;
					writeln!(&mut buffer, ";")?;
				}
				write!(&mut buffer, "{}}}", indentation)?;
			}
			Declaration::Enumeration(enumeration) =>
			{
				write!(&mut buffer, "enum {}", enumeration.name.name)?;
				if let Some(backing_type) = &enumeration.backing_type
				{
					write!(&mut buffer, " : {}", backing_type.name)?;
				}
				writeln!(&mut buffer)?;
				writeln!(&mut buffer, "{}{{", indentation)?;
				let inner = indentation.increased();
				for variant in &enumeration.variants
				{
					write!(&mut buffer, "{}{}", inner, variant.name.name)?;
					if let Some(value) = &variant.value
					{
						write!(&mut buffer, " <- {}", value)?;
					}
					writeln!(&mut buffer, ",")?;
				}
				write!(&mut buffer, "{}}}", indentation)?;
			}
			Declaration::Bitmap(bitmap) =>
			{
				writeln!(
					&mut buffer,
					"bitmap{} {}",
					bitmap.bit_width, bitmap.name.name
				)?;
				writeln!(&mut buffer, "{}{{", indentation)?;
				let inner = indentation.increased();
				for field in &bitmap.fields
				{
					write!(&mut buffer, "{}{}", inner, field.name.name)?;
					if let Some(width) = &field.width
					{
						write!(&mut buffer, "[{}]", width)?;
					}
					writeln!(&mut buffer, ",")?;
				}
				write!(&mut buffer, "{}}}", indentation)?;
			}
			Declaration::Register(register) =>
			{
				writeln!(
					&mut buffer,
					"register {} @ {}",
					register.name.name, register.address
				)?;
				writeln!(&mut buffer, "{}{{", indentation)?;
				let inner = indentation.increased();
				for member in &register.members
				{
					writeln!(
						&mut buffer,
						"{}{}: {} {} @ {},",
						inner,
						member.name.name,
						member.value_type.name,
						member.access,
						member.offset
					)?;
				}
				write!(&mut buffer, "{}}}", indentation)?;
			}
			Declaration::Scope(scope) =>
			{
				writeln!(&mut buffer, "scope {}", scope.name.name)?;
				writeln!(&mut buffer, "{}{{", indentation)?;
				for member in &scope.members
				{
					writeln!(
						&mut buffer,
						"{}",
						member.rebuild(&indentation.increased())?
					)?;
				}
				write!(&mut buffer, "{}}}", indentation)?;
			}
		}
		Ok(buffer)
	}
}

fn write_flags(
	buffer: &mut String,
	flags: enumset::EnumSet<DeclarationFlag>,
) -> Result<(), std::fmt::Error>
{
	for flag in flags
	{
		let keyword = match flag
		{
			DeclarationFlag::Public => "public",
			DeclarationFlag::Private => "private",
			DeclarationFlag::Const => "const",
			DeclarationFlag::Atomic => "atomic",
			DeclarationFlag::Volatile => "volatile",
		};
		write!(buffer, "{} ", keyword)?;
	}
	Ok(())
}

fn write_suffixes(
	buffer: &mut String,
	suffixes: &[ArraySuffix],
) -> Result<(), std::fmt::Error>
{
	for suffix in suffixes
	{
		match suffix
		{
			Some(size) => write!(buffer, "[{}]", size)?,
			None => write!(buffer, "[]")?,
		}
	}
	Ok(())
}

impl std::fmt::Display for Expression
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self
		{
			Expression::Integer {
				literal,
				location: _,
			} => write!(f, "{}", literal.text),
			Expression::Literal {
				literal,
				location: _,
			} => match literal
			{
				Literal::Bool(value) => write!(f, "{}", value),
				Literal::Float(text) => write!(f, "{}", text),
				Literal::String(text) => write!(f, "\"{}\"", text),
				Literal::Char(text) => write!(f, "'{}'", text),
			},
			Expression::Identifier(identifier) =>
			{
				write!(f, "{}", identifier.name)
			}
			Expression::Member { base, member } =>
			{
				write!(f, "{}.{}", base, member.name)
			}
			Expression::Element {
				base,
				index,
				location: _,
			} => write!(f, "{}[{}]", base, index),
			Expression::Call {
				callee,
				arguments,
				location: _,
			} =>
			{
				write!(f, "{}(", callee)?;
				write_separated(f, arguments)?;
				write!(f, ")")
			}
			Expression::Binary {
				op,
				left,
				right,
				location: _,
			} => write!(f, "{} {} {}", left, binary_op_text(*op), right),
			Expression::Unary {
				op,
				expression,
				location: _,
			} =>
			{
				let op = match op
				{
					UnaryOp::Negative => "-",
					UnaryOp::BitwiseComplement => "~",
					UnaryOp::LogicalNot => "!",
				};
				write!(f, "{}{}", op, expression)
			}
			Expression::Ternary {
				condition,
				then_value,
				else_value,
				location: _,
			} => write!(f, "{} ? {} : {}", condition, then_value, else_value),
			Expression::Parenthesized { inner, location: _ } =>
			{
				write!(f, "({})", inner)
			}
			Expression::ArrayLiteral {
				elements,
				location: _,
			} =>
			{
				write!(f, "[")?;
				write_separated(f, elements)?;
				write!(f, "]")
			}
			Expression::StructLiteral {
				members,
				location: _,
			} =>
			{
				write!(f, "{{")?;
				for (i, (name, value)) in members.iter().enumerate()
				{
					if i > 0
					{
						write!(f, ", ")?;
					}
					write!(f, "{}: {}", name.name, value)?;
				}
				write!(f, "}}")
			}
		}
	}
}

fn write_separated(
	f: &mut std::fmt::Formatter,
	expressions: &[Expression],
) -> std::fmt::Result
{
	for (i, expression) in expressions.iter().enumerate()
	{
		if i > 0
		{
			write!(f, ", ")?;
		}
		write!(f, "{}", expression)?;
	}
	Ok(())
}

fn binary_op_text(op: BinaryOp) -> &'static str
{
	match op
	{
		BinaryOp::Add => "+",
		BinaryOp::Subtract => "-",
		BinaryOp::Multiply => "*",
		BinaryOp::Divide => "/",
		BinaryOp::Modulo => "%",
		BinaryOp::ShiftLeft => "<<",
		BinaryOp::ShiftRight => ">>",
		BinaryOp::BitwiseAnd => "&",
		BinaryOp::BitwiseOr => "|",
		BinaryOp::BitwiseXor => "^",
		BinaryOp::LogicalAnd => "&&",
		BinaryOp::LogicalOr => "||",
		BinaryOp::Equals => "=",
		BinaryOp::DoesNotEqual => "!=",
		BinaryOp::IsGreater => ">",
		BinaryOp::IsGE => ">=",
		BinaryOp::IsLess => "<",
		BinaryOp::IsLE => "<=",
	}
}
