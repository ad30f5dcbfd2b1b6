//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType
{
	Int8,
	Int16,
	Int32,
	Int64,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
	Float32,
	Float64,
	Bool,
	Char,
	Void,
}

impl ValueType
{
	pub fn from_name(name: &str) -> Option<ValueType>
	{
		match name
		{
			"i8" => Some(ValueType::Int8),
			"i16" => Some(ValueType::Int16),
			"i32" => Some(ValueType::Int32),
			"i64" => Some(ValueType::Int64),
			"u8" => Some(ValueType::Uint8),
			"u16" => Some(ValueType::Uint16),
			"u32" => Some(ValueType::Uint32),
			"u64" => Some(ValueType::Uint64),
			"f32" => Some(ValueType::Float32),
			"f64" => Some(ValueType::Float64),
			"bool" => Some(ValueType::Bool),
			"char" => Some(ValueType::Char),
			"void" => Some(ValueType::Void),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str
	{
		match self
		{
			ValueType::Int8 => "i8",
			ValueType::Int16 => "i16",
			ValueType::Int32 => "i32",
			ValueType::Int64 => "i64",
			ValueType::Uint8 => "u8",
			ValueType::Uint16 => "u16",
			ValueType::Uint32 => "u32",
			ValueType::Uint64 => "u64",
			ValueType::Float32 => "f32",
			ValueType::Float64 => "f64",
			ValueType::Bool => "bool",
			ValueType::Char => "char",
			ValueType::Void => "void",
		}
	}

	/// The name of the corresponding C type, assuming `<stdint.h>`.
	pub fn c_name(&self) -> &'static str
	{
		match self
		{
			ValueType::Int8 => "int8_t",
			ValueType::Int16 => "int16_t",
			ValueType::Int32 => "int32_t",
			ValueType::Int64 => "int64_t",
			ValueType::Uint8 => "uint8_t",
			ValueType::Uint16 => "uint16_t",
			ValueType::Uint32 => "uint32_t",
			ValueType::Uint64 => "uint64_t",
			ValueType::Float32 => "float",
			ValueType::Float64 => "double",
			ValueType::Bool => "bool",
			ValueType::Char => "char",
			ValueType::Void => "void",
		}
	}

	pub fn is_integral(&self) -> bool
	{
		match self
		{
			ValueType::Int8 => true,
			ValueType::Int16 => true,
			ValueType::Int32 => true,
			ValueType::Int64 => true,
			ValueType::Uint8 => true,
			ValueType::Uint16 => true,
			ValueType::Uint32 => true,
			ValueType::Uint64 => true,
			ValueType::Float32 => false,
			ValueType::Float64 => false,
			ValueType::Bool => false,
			ValueType::Char => false,
			ValueType::Void => false,
		}
	}

	pub fn is_signed(&self) -> bool
	{
		match self
		{
			ValueType::Int8 => true,
			ValueType::Int16 => true,
			ValueType::Int32 => true,
			ValueType::Int64 => true,
			_ => false,
		}
	}

	pub fn fixed_bit_length(&self) -> u32
	{
		match self
		{
			ValueType::Int8 => 8,
			ValueType::Int16 => 16,
			ValueType::Int32 => 32,
			ValueType::Int64 => 64,
			ValueType::Uint8 => 8,
			ValueType::Uint16 => 16,
			ValueType::Uint32 => 32,
			ValueType::Uint64 => 64,
			ValueType::Float32 => 32,
			ValueType::Float64 => 64,
			ValueType::Bool => 1,
			ValueType::Char => 8,
			ValueType::Void => 0,
		}
	}

	/// The smallest unsigned type that can hold a field of the given width.
	pub fn smallest_unsigned(bit_width: u32) -> ValueType
	{
		match bit_width
		{
			0..=8 => ValueType::Uint8,
			9..=16 => ValueType::Uint16,
			17..=32 => ValueType::Uint32,
			_ => ValueType::Uint64,
		}
	}

	/// The backing type of a bitmap with the given total width.
	pub fn for_bitmap(bit_width: u32) -> ValueType
	{
		Self::smallest_unsigned(bit_width)
	}
}

/// Whether the named type is a primitive integer, the only kind of value
/// whose individual bits can be addressed with a subscript.
pub fn is_integer_type_name(name: &str) -> bool
{
	ValueType::from_name(name).map_or(false, |x| x.is_integral())
}

/// Translate a type name to C, leaving unknown names untouched.
pub fn c_type_name(name: &str) -> String
{
	match ValueType::from_name(name)
	{
		Some(value_type) => value_type.c_name().to_string(),
		None => name.to_string(),
	}
}
