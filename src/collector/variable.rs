//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::dimensions;
use super::Context;
use crate::common::*;
use crate::symbol::VariableSymbol;

pub fn collect(
	declaration: &VariableDeclaration,
	context: &Context,
) -> VariableSymbol
{
	VariableSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		type_name: context.type_name(&declaration.value_type.name),
		is_const: declaration.flags.contains(DeclarationFlag::Const),
		is_atomic: declaration.flags.contains(DeclarationFlag::Atomic),
		is_array: !declaration.dimensions.is_empty(),
		dimensions: dimensions::resolve_all(&declaration.dimensions, context),
		initial_value: declaration.value.as_ref().map(|x| x.to_string()),
	}
}

/// The value of a `const` variable initialized with an integer literal.
pub fn constant_value(declaration: &VariableDeclaration) -> Option<i64>
{
	if !declaration.flags.contains(DeclarationFlag::Const)
		|| !declaration.dimensions.is_empty()
	{
		return None;
	}
	declaration
		.value
		.as_ref()
		.and_then(dimensions::literal_integer)
}
