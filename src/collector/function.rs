//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::dimensions;
use super::Context;
use crate::common::*;
use crate::symbol::{FunctionSymbol, ParameterInfo};

pub fn collect(
	declaration: &FunctionDeclaration,
	context: &Context,
) -> FunctionSymbol
{
	let parameters = declaration
		.parameters
		.iter()
		.map(|parameter| ParameterInfo {
			name: parameter.name.name.clone(),
			type_name: context.type_name(&parameter.value_type.name),
			is_const: parameter.flags.contains(DeclarationFlag::Const),
			// Array-ness is only known from the declarator's suffixes.
			is_array: !parameter.dimensions.is_empty(),
			dimensions: dimensions::resolve_all(&parameter.dimensions, context),
		})
		.collect();
	FunctionSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		return_type: context.type_name(&declaration.return_type.name),
		visibility: context.visibility(declaration.flags),
		parameters,
	}
}
