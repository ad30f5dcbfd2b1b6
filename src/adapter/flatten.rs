//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use crate::symbol::*;
use crate::symbol_table::SymbolTable;
use crate::value_type::ValueType;

use serde::Serialize;

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind
{
	Namespace,
	Struct,
	Field,
	Enum,
	EnumMember,
	Bitmap,
	BitmapField,
	Register,
	RegisterMember,
	Function,
	Variable,
}

serde_plain::derive_display_from_serialize!(SymbolKind);

/// One addressable name, in the shape that editor and header tooling uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSymbol
{
	pub name: String,
	pub kind: SymbolKind,
	pub type_name: Option<String>,
	pub source_file: String,
	pub line: usize,
	pub language: Language,
	pub is_exported: bool,
	pub parent: Option<String>,
	pub signature: Option<String>,
	pub access_mode: Option<AccessMode>,
	pub is_const: bool,
	pub is_array: bool,
	pub dimensions: Vec<Dimension>,
}

impl FlatSymbol
{
	fn new(kind: SymbolKind, origin: &Origin) -> FlatSymbol
	{
		FlatSymbol {
			name: origin.qualified_name(),
			kind,
			type_name: None,
			source_file: origin.source_file.clone(),
			line: origin.line,
			language: origin.language,
			is_exported: origin.is_exported,
			parent: origin.scope.clone(),
			signature: None,
			access_mode: None,
			is_const: false,
			is_array: false,
			dimensions: Vec::new(),
		}
	}

	/// A symbol synthesized for a member of an aggregate.
	fn child(kind: SymbolKind, name: &str, parent: &FlatSymbol) -> FlatSymbol
	{
		FlatSymbol {
			name: name.to_string(),
			kind,
			type_name: None,
			source_file: parent.source_file.clone(),
			line: parent.line,
			language: parent.language,
			is_exported: parent.is_exported,
			parent: Some(parent.name.clone()),
			signature: None,
			access_mode: None,
			is_const: false,
			is_array: false,
			dimensions: Vec::new(),
		}
	}
}

/// Expand every symbol into flat symbols, synthesizing children for struct
/// fields, enum members, bitmap fields and register members.
/// Struct fields are also registered in the symbol table.
pub fn flatten(symbols: &[Symbol], table: &mut SymbolTable) -> Vec<FlatSymbol>
{
	let mut flattened = Vec::new();
	for symbol in symbols
	{
		flatten_symbol(symbol, table, &mut flattened);
	}
	flattened
}

fn flatten_symbol(
	symbol: &Symbol,
	table: &mut SymbolTable,
	flattened: &mut Vec<FlatSymbol>,
)
{
	match symbol
	{
		Symbol::Struct(structure) =>
		{
			let mut parent =
				FlatSymbol::new(SymbolKind::Struct, &structure.origin);
			parent.type_name = Some(parent.name.clone());
			for field in &structure.fields
			{
				table.add_struct_field(&parent.name, field.clone());
			}
			let children: Vec<FlatSymbol> = structure
				.fields
				.iter()
				.map(|field| {
					let mut child = FlatSymbol::child(
						SymbolKind::Field,
						&field.name,
						&parent,
					);
					child.type_name = Some(field.type_name.clone());
					child.is_const = field.is_const;
					child.is_array = field.is_array;
					child.dimensions = field.dimensions.clone();
					child
				})
				.collect();
			flattened.push(parent);
			flattened.extend(children);
		}
		Symbol::Enum(enumeration) =>
		{
			let mut parent =
				FlatSymbol::new(SymbolKind::Enum, &enumeration.origin);
			parent.type_name = Some(parent.name.clone());
			parent.signature =
				enumeration.bit_width.map(|x| format!("{} bits", x));
			let children: Vec<FlatSymbol> = enumeration
				.members
				.iter()
				.map(|(name, value)| {
					let mut child = FlatSymbol::child(
						SymbolKind::EnumMember,
						name,
						&parent,
					);
					child.type_name = Some(parent.name.clone());
					child.signature = Some(format!("= {}", value));
					child.is_const = true;
					child
				})
				.collect();
			flattened.push(parent);
			flattened.extend(children);
		}
		Symbol::Bitmap(bitmap) =>
		{
			let mut parent =
				FlatSymbol::new(SymbolKind::Bitmap, &bitmap.origin);
			parent.type_name = Some(bitmap.backing_type.clone());
			parent.signature = Some(format!("{} bits", bitmap.bit_width));
			let children: Vec<FlatSymbol> = bitmap
				.fields
				.iter()
				.map(|field| {
					let mut child = FlatSymbol::child(
						SymbolKind::BitmapField,
						&field.name,
						&parent,
					);
					child.type_name = Some(bit_field_type(field).to_string());
					child.signature = Some(field.signature());
					// Derived from the backing integer.
					child.is_const = true;
					child
				})
				.collect();
			flattened.push(parent);
			flattened.extend(children);
		}
		Symbol::Register(register) =>
		{
			let mut parent =
				FlatSymbol::new(SymbolKind::Register, &register.origin);
			parent.signature = Some(format!("@ {}", register.base_address));
			let children: Vec<FlatSymbol> = register
				.members
				.iter()
				.map(|member| {
					let mut child = FlatSymbol::child(
						SymbolKind::RegisterMember,
						&member.name,
						&parent,
					);
					child.type_name = Some(
						member
							.bitmap_type
							.clone()
							.unwrap_or_else(|| member.c_type.clone()),
					);
					child.signature = Some(format!("@ {}", member.offset));
					child.access_mode = Some(member.access);
					child.is_const = !member.access.is_writable();
					child
				})
				.collect();
			flattened.push(parent);
			flattened.extend(children);
		}
		Symbol::Scope(scope) =>
		{
			let flat = FlatSymbol::new(SymbolKind::Namespace, &scope.origin);
			flattened.push(flat);
		}
		Symbol::Function(function) =>
		{
			let mut flat =
				FlatSymbol::new(SymbolKind::Function, &function.origin);
			flat.type_name = Some(function.return_type.clone());
			flat.signature = Some(function_signature(function));
			flattened.push(flat);
		}
		Symbol::Variable(variable) =>
		{
			let mut flat =
				FlatSymbol::new(SymbolKind::Variable, &variable.origin);
			flat.type_name = Some(variable.type_name.clone());
			flat.is_const = variable.is_const;
			flat.is_array = variable.is_array;
			flat.dimensions = variable.dimensions.clone();
			flattened.push(flat);
		}
	}
}

/// Single bits read as booleans; wider fields as the smallest unsigned type.
pub fn bit_field_type(field: &BitField) -> &'static str
{
	if field.width == 1
	{
		ValueType::Bool.name()
	}
	else
	{
		ValueType::smallest_unsigned(field.width).name()
	}
}

fn function_signature(function: &FunctionSymbol) -> String
{
	let parameters: Vec<String> = function
		.parameters
		.iter()
		.map(|parameter| {
			let mut text = String::new();
			if parameter.is_const
			{
				text.push_str("const ");
			}
			text.push_str(&parameter.type_name);
			text.push(' ');
			text.push_str(&parameter.name);
			if parameter.is_array && parameter.dimensions.is_empty()
			{
				text.push_str("[]");
			}
			for dimension in &parameter.dimensions
			{
				text.push_str(&format!("[{}]", dimension));
			}
			text
		})
		.collect();
	format!(
		"{} {}({})",
		function.return_type,
		function.origin.qualified_name(),
		parameters.join(", ")
	)
}
