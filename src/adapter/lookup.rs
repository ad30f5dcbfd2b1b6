//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Lookup tables queried directly by code generation.
//! Register members are keyed by their generated name, `REGISTER_MEMBER`.

use crate::symbol::*;

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables
{
	pub known_structs: HashSet<String>,
	pub known_enums: HashSet<String>,
	pub known_bitmaps: HashSet<String>,
	pub known_registers: HashSet<String>,
	pub known_scopes: HashSet<String>,

	pub struct_field_types: HashMap<String, HashMap<String, String>>,
	pub struct_field_arrays: HashMap<String, HashSet<String>>,
	pub struct_field_dimensions:
		HashMap<String, HashMap<String, Vec<Dimension>>>,

	pub enum_members: HashMap<String, HashMap<String, i64>>,
	pub enum_bit_widths: HashMap<String, u32>,

	pub bitmap_fields: HashMap<String, HashMap<String, BitLayout>>,
	pub bitmap_backing_types: HashMap<String, String>,
	pub bitmap_bit_widths: HashMap<String, u32>,

	pub register_base_addresses: HashMap<String, String>,
	pub register_member_offsets: HashMap<String, String>,
	pub register_member_access: HashMap<String, AccessMode>,
	pub register_member_c_types: HashMap<String, String>,
	pub register_member_bitmap_types: HashMap<String, String>,

	pub scope_members: HashMap<String, HashSet<String>>,
	pub scope_member_visibility: HashMap<String, HashMap<String, Visibility>>,

	pub function_return_types: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitLayout
{
	pub offset: u32,
	pub width: u32,
}

impl LookupTables
{
	pub fn build(symbols: &[Symbol]) -> LookupTables
	{
		let mut tables = LookupTables::default();
		for symbol in symbols
		{
			tables.add(symbol);
		}
		tables
	}

	fn add(&mut self, symbol: &Symbol)
	{
		let name = symbol.qualified_name();
		match symbol
		{
			Symbol::Struct(structure) =>
			{
				let types = structure
					.fields
					.iter()
					.map(|x| (x.name.clone(), x.type_name.clone()))
					.collect();
				let arrays = structure
					.fields
					.iter()
					.filter(|x| x.is_array)
					.map(|x| x.name.clone())
					.collect();
				let dimensions = structure
					.fields
					.iter()
					.filter(|x| !x.dimensions.is_empty())
					.map(|x| (x.name.clone(), x.dimensions.clone()))
					.collect();
				self.struct_field_types.insert(name.clone(), types);
				self.struct_field_arrays.insert(name.clone(), arrays);
				self.struct_field_dimensions.insert(name.clone(), dimensions);
				self.known_structs.insert(name);
			}
			Symbol::Enum(enumeration) =>
			{
				let members = enumeration.members.iter().cloned().collect();
				self.enum_members.insert(name.clone(), members);
				if let Some(bit_width) = enumeration.bit_width
				{
					self.enum_bit_widths.insert(name.clone(), bit_width);
				}
				self.known_enums.insert(name);
			}
			Symbol::Bitmap(bitmap) =>
			{
				let fields = bitmap
					.fields
					.iter()
					.map(|x| {
						let layout = BitLayout {
							offset: x.offset,
							width: x.width,
						};
						(x.name.clone(), layout)
					})
					.collect();
				self.bitmap_fields.insert(name.clone(), fields);
				self.bitmap_backing_types
					.insert(name.clone(), bitmap.backing_type.clone());
				self.bitmap_bit_widths.insert(name.clone(), bitmap.bit_width);
				self.known_bitmaps.insert(name);
			}
			Symbol::Register(register) =>
			{
				for member in &register.members
				{
					let key = qualify(&name, &member.name);
					self.register_member_offsets
						.insert(key.clone(), member.offset.clone());
					self.register_member_access
						.insert(key.clone(), member.access);
					self.register_member_c_types
						.insert(key.clone(), member.c_type.clone());
					if let Some(bitmap) = &member.bitmap_type
					{
						self.register_member_bitmap_types
							.insert(key, bitmap.clone());
					}
				}
				self.register_base_addresses
					.insert(name.clone(), register.base_address.clone());
				self.known_registers.insert(name);
			}
			Symbol::Scope(scope) =>
			{
				let members = scope.members.iter().cloned().collect();
				self.scope_members.insert(name.clone(), members);
				self.scope_member_visibility
					.insert(name.clone(), scope.member_visibility.clone());
				self.known_scopes.insert(name);
			}
			Symbol::Function(function) =>
			{
				self.function_return_types
					.insert(name, function.return_type.clone());
			}
			Symbol::Variable(_) => (),
		}
	}

	/// Combine the tables of a file with those of the files it includes.
	/// Enum, scope and function return type facts are united, with facts
	/// from `base` taking precedence; all other tables come from `base`.
	pub fn merge(
		base: &LookupTables,
		included: &[LookupTables],
	) -> LookupTables
	{
		let mut merged = base.clone();
		for other in included
		{
			merged.known_enums.extend(other.known_enums.iter().cloned());
			unite(&mut merged.enum_members, &other.enum_members);
			unite(&mut merged.enum_bit_widths, &other.enum_bit_widths);

			merged.known_scopes.extend(other.known_scopes.iter().cloned());
			unite(&mut merged.scope_members, &other.scope_members);
			unite(
				&mut merged.scope_member_visibility,
				&other.scope_member_visibility,
			);

			unite(
				&mut merged.function_return_types,
				&other.function_return_types,
			);
		}
		merged
	}

	pub fn is_enum_function(&self, function_name: &str) -> bool
	{
		match self.function_return_types.get(function_name)
		{
			Some(return_type) => self.known_enums.contains(return_type),
			None => false,
		}
	}
}

fn unite<V: Clone>(
	into: &mut HashMap<String, V>,
	from: &HashMap<String, V>,
)
{
	for (key, value) in from
	{
		into.entry(key.clone()).or_insert_with(|| value.clone());
	}
}
