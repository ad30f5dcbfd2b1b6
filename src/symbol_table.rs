//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! A cross-file index of type facts, built by replaying resolved symbols.
//! Entries are only ever added; the first registration of a name wins.

use crate::symbol::{Dimension, FieldInfo, Symbol};

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SymbolTable
{
	structures: HashMap<String, Vec<FieldInfo>>,
	enum_bit_widths: HashMap<String, u32>,
	scope_of_member: HashMap<String, String>,
	variables: HashMap<String, VariableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry
{
	pub type_name: String,
	pub dimensions: Vec<Dimension>,
	pub is_array: bool,
}

impl SymbolTable
{
	pub fn new() -> SymbolTable
	{
		SymbolTable::default()
	}

	pub fn add_symbols(&mut self, symbols: &[Symbol])
	{
		for symbol in symbols
		{
			self.add_symbol(symbol);
		}
	}

	pub fn add_symbol(&mut self, symbol: &Symbol)
	{
		match symbol
		{
			Symbol::Struct(structure) =>
			{
				let name = structure.origin.qualified_name();
				self.structures.entry(name.clone()).or_default();
				for field in &structure.fields
				{
					self.add_struct_field(&name, field.clone());
				}
			}
			Symbol::Enum(enumeration) =>
			{
				if let Some(bit_width) = enumeration.bit_width
				{
					self.enum_bit_widths
						.entry(enumeration.origin.qualified_name())
						.or_insert(bit_width);
				}
			}
			Symbol::Scope(scope) =>
			{
				for member in &scope.members
				{
					self.scope_of_member
						.entry(member.clone())
						.or_insert_with(|| scope.origin.name.clone());
				}
			}
			Symbol::Variable(variable) =>
			{
				self.variables
					.entry(variable.origin.qualified_name())
					.or_insert_with(|| VariableEntry {
						type_name: variable.type_name.clone(),
						dimensions: variable.dimensions.clone(),
						is_array: variable.is_array,
					});
			}
			Symbol::Bitmap(_) => (),
			Symbol::Register(_) => (),
			Symbol::Function(_) => (),
		}
	}

	pub fn add_struct_field(&mut self, struct_name: &str, field: FieldInfo)
	{
		let fields =
			self.structures.entry(struct_name.to_string()).or_default();
		if !fields.iter().any(|x| x.name == field.name)
		{
			fields.push(field);
		}
	}

	pub fn is_known_struct(&self, name: &str) -> bool
	{
		self.structures.contains_key(name)
	}

	pub fn get_struct_fields(&self, struct_name: &str) -> Option<&[FieldInfo]>
	{
		self.structures.get(struct_name).map(|x| x.as_slice())
	}

	pub fn get_struct_field(
		&self,
		struct_name: &str,
		field_name: &str,
	) -> Option<&FieldInfo>
	{
		self.get_struct_fields(struct_name)?
			.iter()
			.find(|x| x.name == field_name)
	}

	pub fn get_struct_field_type(
		&self,
		struct_name: &str,
		field_name: &str,
	) -> Option<&str>
	{
		self.get_struct_field(struct_name, field_name)
			.map(|x| x.type_name.as_str())
	}

	/// The explicit bit width of an enum, if it declared a backing type.
	pub fn get_enum_bit_width(&self, enum_name: &str) -> Option<u32>
	{
		self.enum_bit_widths.get(enum_name).copied()
	}

	pub fn get_scope_of_member(&self, member: &str) -> Option<&str>
	{
		self.scope_of_member.get(member).map(|x| x.as_str())
	}

	pub fn get_variable(&self, name: &str) -> Option<&VariableEntry>
	{
		self.variables.get(name)
	}
}
