//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::dimensions;
use super::Context;
use crate::common::*;
use crate::symbol::EnumSymbol;
use crate::value_type::ValueType;

pub fn collect(declaration: &EnumDeclaration, context: &Context) -> EnumSymbol
{
	let mut members = Vec::new();
	let mut next_value: i64 = 0;
	for variant in &declaration.variants
	{
		let value = match &variant.value
		{
			Some(expression) =>
			{
				match dimensions::evaluate(expression, context)
				{
					Some(value) => value,
					None =>
					{
						log::warn!(
							"{}:{}: cannot evaluate value '{}' of '{}', \
							 using {} instead",
							context.source_file,
							variant.name.location.line_number,
							expression,
							variant.name.name,
							next_value
						);
						next_value
					}
				}
			}
			None => next_value,
		};
		members.push((variant.name.name.clone(), value));
		next_value = value.wrapping_add(1);
	}

	let bit_width = declaration
		.backing_type
		.as_ref()
		.and_then(|x| ValueType::from_name(&x.name))
		.filter(|x| x.is_integral())
		.map(|x| x.fixed_bit_length());

	EnumSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		members,
		bit_width,
	}
}
