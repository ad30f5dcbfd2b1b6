//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Resolved symbols: one variant per kind of declaration.
//! Symbols are plain values; nothing refers back into the syntax tree.

pub use crate::common::AccessMode;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol
{
	Struct(StructSymbol),
	Enum(EnumSymbol),
	Bitmap(BitmapSymbol),
	Register(RegisterSymbol),
	Scope(ScopeSymbol),
	Function(FunctionSymbol),
	Variable(VariableSymbol),
}

impl Symbol
{
	pub fn name(&self) -> &str
	{
		&self.origin().name
	}

	pub fn origin(&self) -> &Origin
	{
		match self
		{
			Symbol::Struct(x) => &x.origin,
			Symbol::Enum(x) => &x.origin,
			Symbol::Bitmap(x) => &x.origin,
			Symbol::Register(x) => &x.origin,
			Symbol::Scope(x) => &x.origin,
			Symbol::Function(x) => &x.origin,
			Symbol::Variable(x) => &x.origin,
		}
	}

	/// The name under which the symbol is known in generated code.
	pub fn qualified_name(&self) -> String
	{
		self.origin().qualified_name()
	}
}

/// Facts shared by every kind of symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin
{
	/// The bare name, without any scope prefix.
	pub name: String,
	pub scope: Option<String>,
	pub source_file: String,
	pub line: usize,
	pub language: Language,
	pub is_exported: bool,
}

impl Origin
{
	pub fn qualified_name(&self) -> String
	{
		match &self.scope
		{
			Some(scope) => qualify(scope, &self.name),
			None => self.name.clone(),
		}
	}
}

pub fn qualify(scope: &str, name: &str) -> String
{
	format!("{}_{}", scope, name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language
{
	CNext,
	C,
	Cpp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility
{
	Public,
	Private,
}

/// The size of one array dimension. Sizes that cannot be evaluated, such as
/// macros from foreign headers, are kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dimension
{
	Resolved(u64),
	Unresolved(String),
}

impl std::fmt::Display for Dimension
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self
		{
			Dimension::Resolved(size) => write!(f, "{}", size),
			Dimension::Unresolved(text) => write!(f, "{}", text),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSymbol
{
	pub origin: Origin,
	pub fields: Vec<FieldInfo>,
}

impl StructSymbol
{
	pub fn field(&self, name: &str) -> Option<&FieldInfo>
	{
		self.fields.iter().find(|x| x.name == name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo
{
	pub name: String,
	pub type_name: String,
	pub is_array: bool,
	pub is_const: bool,
	pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSymbol
{
	pub origin: Origin,
	pub members: Vec<(String, i64)>,
	pub bit_width: Option<u32>,
}

impl EnumSymbol
{
	pub fn value_of(&self, member: &str) -> Option<i64>
	{
		self.members
			.iter()
			.find(|(name, _)| name == member)
			.map(|(_, value)| *value)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapSymbol
{
	pub origin: Origin,
	pub backing_type: String,
	pub bit_width: u32,
	pub fields: Vec<BitField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitField
{
	pub name: String,
	pub offset: u32,
	pub width: u32,
}

impl BitField
{
	/// A human-readable description such as "bit 3" or "bits 4-6".
	pub fn signature(&self) -> String
	{
		match self.width
		{
			0 | 1 => format!("bit {}", self.offset),
			width =>
			{
				let last = self.offset.saturating_add(width - 1);
				format!("bits {}-{}", self.offset, last)
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSymbol
{
	pub origin: Origin,
	pub base_address: String,
	pub members: Vec<RegisterMemberInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMemberInfo
{
	pub name: String,
	pub offset: String,
	pub c_type: String,
	pub access: AccessMode,
	pub bitmap_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSymbol
{
	pub origin: Origin,
	pub members: Vec<String>,
	pub member_visibility: std::collections::HashMap<String, Visibility>,
}

impl ScopeSymbol
{
	pub fn visibility_of(&self, member: &str) -> Option<Visibility>
	{
		self.member_visibility.get(member).copied()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol
{
	pub origin: Origin,
	pub return_type: String,
	pub visibility: Visibility,
	pub parameters: Vec<ParameterInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo
{
	pub name: String,
	pub type_name: String,
	pub is_const: bool,
	pub is_array: bool,
	pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol
{
	pub origin: Origin,
	pub type_name: String,
	pub is_const: bool,
	pub is_atomic: bool,
	pub is_array: bool,
	pub dimensions: Vec<Dimension>,
	pub initial_value: Option<String>,
}
