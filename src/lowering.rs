//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Lowering of member access chains such as `a.b[i].c[3]` into C.
//!
//! The first member access of a chain may cross a pointer (`->`) or a scope
//! (`_`); every later access is a plain `.`. Subscripts are array indices,
//! except that the final subscript on an integer declared without array
//! dimensions selects a bit, if the caller's bit access callback accepts it.

use crate::common::Expression;
use crate::symbol::FieldInfo;
use crate::symbol_table::{SymbolTable, VariableEntry};
use crate::value_type::is_integer_type_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator
{
	Dereference,
	ScopeConcat,
	Member,
}

impl Separator
{
	pub fn as_str(&self) -> &'static str
	{
		match self
		{
			Separator::Dereference => "->",
			Separator::ScopeConcat => "_",
			Separator::Member => ".",
		}
	}
}

impl std::fmt::Display for Separator
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		write!(f, "{}", self.as_str())
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeparatorFlags
{
	/// The base is a struct parameter, passed by pointer.
	pub is_struct_pointer_parameter: bool,
	/// The base names a scope other than the current one.
	pub is_cross_scope: bool,
}

/// The separator before the `hop`-th member name, counting from 1.
pub fn determine_separator(flags: SeparatorFlags, hop: usize) -> Separator
{
	if hop > 1
	{
		Separator::Member
	}
	else if flags.is_struct_pointer_parameter
	{
		Separator::Dereference
	}
	else if flags.is_cross_scope
	{
		Separator::ScopeConcat
	}
	else
	{
		Separator::Member
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStep
{
	Member(String),
	/// An index, already lowered to C.
	Subscript(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccessChain
{
	pub base: String,
	pub steps: Vec<ChainStep>,
}

impl MemberAccessChain
{
	pub fn new(base: &str) -> MemberAccessChain
	{
		MemberAccessChain {
			base: base.to_string(),
			steps: Vec::new(),
		}
	}

	pub fn member(mut self, name: &str) -> MemberAccessChain
	{
		self.steps.push(ChainStep::Member(name.to_string()));
		self
	}

	pub fn subscript(mut self, index: &str) -> MemberAccessChain
	{
		self.steps.push(ChainStep::Subscript(index.to_string()));
		self
	}

	/// Unwind a parsed expression made only of member accesses and
	/// subscripts on an identifier.
	pub fn from_expression(expression: &Expression) -> Option<MemberAccessChain>
	{
		match expression
		{
			Expression::Identifier(identifier) =>
			{
				Some(MemberAccessChain::new(&identifier.name))
			}
			Expression::Member { base, member } =>
			{
				let chain = MemberAccessChain::from_expression(base)?;
				Some(chain.member(&member.name))
			}
			Expression::Element { base, index, .. } =>
			{
				let chain = MemberAccessChain::from_expression(base)?;
				Some(chain.subscript(&index.to_string()))
			}
			_ => None,
		}
	}
}

/// A declared type, together with how many array dimensions it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedType
{
	pub type_name: String,
	pub array_depth: usize,
}

impl TrackedType
{
	pub fn scalar(type_name: &str) -> TrackedType
	{
		TrackedType {
			type_name: type_name.to_string(),
			array_depth: 0,
		}
	}

	pub fn array(type_name: &str, array_depth: usize) -> TrackedType
	{
		TrackedType {
			type_name: type_name.to_string(),
			array_depth,
		}
	}
}

impl From<&FieldInfo> for TrackedType
{
	fn from(field: &FieldInfo) -> TrackedType
	{
		let array_depth = match field.is_array
		{
			true => field.dimensions.len().max(1),
			false => 0,
		};
		TrackedType::array(&field.type_name, array_depth)
	}
}

impl From<&VariableEntry> for TrackedType
{
	fn from(variable: &VariableEntry) -> TrackedType
	{
		let array_depth = match variable.is_array
		{
			true => variable.dimensions.len().max(1),
			false => 0,
		};
		TrackedType::array(&variable.type_name, array_depth)
	}
}

/// Static type facts consulted while lowering.
pub trait TypeTracking
{
	fn field_type(&self, struct_name: &str, field: &str)
		-> Option<TrackedType>;

	fn is_known_struct(&self, type_name: &str) -> bool;

	fn variable_type(&self, _name: &str) -> Option<TrackedType>
	{
		None
	}
}

impl TypeTracking for SymbolTable
{
	fn field_type(
		&self,
		struct_name: &str,
		field: &str,
	) -> Option<TrackedType>
	{
		self.get_struct_field(struct_name, field).map(TrackedType::from)
	}

	fn is_known_struct(&self, type_name: &str) -> bool
	{
		SymbolTable::is_known_struct(self, type_name)
	}

	fn variable_type(&self, name: &str) -> Option<TrackedType>
	{
		self.get_variable(name).map(TrackedType::from)
	}
}

#[derive(Clone, Copy, Default)]
pub struct ChainContext<'a>
{
	pub flags: SeparatorFlags,
	pub tracking: Option<&'a dyn TypeTracking>,
	/// The declared type of the base, if known to the caller.
	pub base_type: Option<&'a TrackedType>,
}

/// A subscript that may select a bit of an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitAccess
{
	/// The lowered text of the chain up to the subscript.
	pub target: String,
	pub index: String,
	pub type_name: String,
}

pub type BitAccessCallback<'a> =
	&'a mut dyn FnMut(&BitAccess) -> Option<String>;

pub fn lower_chain(
	chain: &MemberAccessChain,
	context: &ChainContext,
	mut bit_access: Option<BitAccessCallback>,
) -> String
{
	let tracking = context.tracking;
	let mut last: Option<TrackedType> = match context.base_type
	{
		Some(base_type) => Some(base_type.clone()),
		None => tracking.and_then(|x| x.variable_type(&chain.base)),
	};
	let mut current_struct: Option<String> = match (tracking, &last)
	{
		(Some(tracking), Some(base))
			if tracking.is_known_struct(&base.type_name) =>
		{
			Some(base.type_name.clone())
		}
		_ => None,
	};

	let final_subscript = chain
		.steps
		.iter()
		.rposition(|x| matches!(x, ChainStep::Subscript(_)));

	let mut text = chain.base.clone();
	let mut hop = 0;
	for (i, step) in chain.steps.iter().enumerate()
	{
		match step
		{
			ChainStep::Member(name) =>
			{
				hop += 1;
				text.push_str(determine_separator(context.flags, hop).as_str());
				text.push_str(name);

				last = match (tracking, &current_struct)
				{
					(Some(tracking), Some(parent)) =>
					{
						tracking.field_type(parent, name)
					}
					_ => None,
				};
				current_struct = match (tracking, &last)
				{
					(Some(tracking), Some(field))
						if tracking.is_known_struct(&field.type_name) =>
					{
						Some(field.type_name.clone())
					}
					_ => None,
				};
			}
			ChainStep::Subscript(index) =>
			{
				let is_bit_candidate = Some(i) == final_subscript
					&& last.as_ref().map_or(false, |x| {
						x.array_depth == 0
							&& is_integer_type_name(&x.type_name)
					});
				if is_bit_candidate
				{
					if let (Some(callback), Some(member)) =
						(bit_access.as_deref_mut(), &last)
					{
						let access = BitAccess {
							target: text.clone(),
							index: index.clone(),
							type_name: member.type_name.clone(),
						};
						if let Some(lowered) = callback(&access)
						{
							text = lowered;
							continue;
						}
					}
				}
				text.push('[');
				text.push_str(index);
				text.push(']');
			}
		}
	}
	text
}
