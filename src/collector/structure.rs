//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::dimensions;
use super::Context;
use crate::common::*;
use crate::symbol::{FieldInfo, StructSymbol};

/// Names of properties that every array and string derives implicitly.
const DERIVED_PROPERTIES: [&str; 3] = ["length", "capacity", "size"];

#[derive(Debug, Clone)]
pub struct Collected
{
	pub symbol: StructSymbol,
	pub warnings: Vec<String>,
}

pub fn collect(declaration: &StructDeclaration, context: &Context) -> Collected
{
	let name = context.qualified_name(&declaration.name);
	let mut fields: Vec<FieldInfo> = Vec::new();
	let mut warnings = Vec::new();
	for member in &declaration.members
	{
		let field_name = &member.name.name;
		if fields.iter().any(|x| &x.name == field_name)
		{
			warnings.push(format!(
				"{}:{}: duplicate field '{}' in struct '{}' is ignored",
				context.source_file,
				member.name.location.line_number,
				field_name,
				name
			));
			continue;
		}
		if DERIVED_PROPERTIES.contains(&field_name.as_str())
		{
			warnings.push(format!(
				"{}:{}: field '{}' of struct '{}' shadows the built-in \
				 '.{}' property",
				context.source_file,
				member.name.location.line_number,
				field_name,
				name,
				field_name
			));
		}
		fields.push(FieldInfo {
			name: field_name.clone(),
			type_name: context.type_name(&member.value_type.name),
			is_array: !member.dimensions.is_empty(),
			is_const: member.flags.contains(DeclarationFlag::Const),
			dimensions: dimensions::resolve_all(&member.dimensions, context),
		});
	}
	let symbol = StructSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		fields,
	};
	Collected { symbol, warnings }
}
