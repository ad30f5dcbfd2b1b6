//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::dimensions;
use super::Context;
use crate::common::*;
use crate::error::Error;
use crate::symbol::{BitField, BitmapSymbol};
use crate::value_type::ValueType;

pub fn collect(
	declaration: &BitmapDeclaration,
	context: &Context,
) -> Result<BitmapSymbol, Error>
{
	let mut fields = Vec::new();
	let mut offset: u32 = 0;
	for field in &declaration.fields
	{
		let width = match &field.width
		{
			Some(expression) => field_width(expression, context),
			None => 1,
		};
		fields.push(BitField {
			name: field.name.name.clone(),
			offset,
			width,
		});
		offset = offset.saturating_add(width);
	}

	if offset != declaration.bit_width
	{
		return Err(Error::BitmapWidthMismatch {
			name: context.qualified_name(&declaration.name),
			actual: offset,
			expected: declaration.bit_width,
			location: declaration.location.clone(),
		});
	}

	let backing_type = ValueType::for_bitmap(declaration.bit_width);
	Ok(BitmapSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		backing_type: backing_type.name().to_string(),
		bit_width: declaration.bit_width,
		fields,
	})
}

fn field_width(expression: &Expression, context: &Context) -> u32
{
	match dimensions::evaluate(expression, context)
		.and_then(|x| u32::try_from(x).ok())
		.filter(|x| *x > 0)
	{
		Some(width) => width,
		None =>
		{
			log::warn!(
				"{}:{}: unusable bit width '{}', assuming 1",
				context.source_file,
				expression.location().line_number,
				expression
			);
			1
		}
	}
}
