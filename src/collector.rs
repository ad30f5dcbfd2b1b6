//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Collectors turn a single declaration into a single symbol.
//! They are pure functions of the declaration and a few contextual facts:
//! the enclosing scope, the constants known so far and the names of the
//! bitmaps collected in an earlier pass.
//! Names written inside a scope bind to that scope's own declarations
//! before they bind to top-level ones.

pub mod bitmap;
pub mod dimensions;
pub mod enumeration;
pub mod function;
pub mod register;
pub mod scope;
pub mod structure;
pub mod variable;

use crate::common::*;
use crate::symbol::{qualify, Language, Origin, Visibility};

use std::collections::{HashMap, HashSet};

use enumset::EnumSet;

/// Compile-time integer constants, by name.
pub type ConstantValues = HashMap<String, i64>;

/// Bitmaps collected so far, by qualified name, with their backing type.
pub type KnownBitmaps = HashMap<String, String>;

/// Unqualified names of the types declared inside one scope.
pub type LocalTypes = HashSet<String>;

#[derive(Debug, Clone, Copy)]
pub struct Context<'a>
{
	pub source_file: &'a str,
	pub scope: Option<&'a str>,
	pub constants: Option<&'a ConstantValues>,
	pub bitmaps: Option<&'a KnownBitmaps>,
	pub local_types: Option<&'a LocalTypes>,
}

impl<'a> Context<'a>
{
	pub fn new(source_file: &'a str) -> Context<'a>
	{
		Context {
			source_file,
			scope: None,
			constants: None,
			bitmaps: None,
			local_types: None,
		}
	}

	pub fn in_scope(self, scope: &'a str) -> Context<'a>
	{
		Context {
			scope: Some(scope),
			local_types: None,
			..self
		}
	}

	pub fn with_local_types(self, local_types: &'a LocalTypes) -> Context<'a>
	{
		Context {
			local_types: Some(local_types),
			..self
		}
	}

	pub fn with_constants(self, constants: &'a ConstantValues) -> Context<'a>
	{
		Context {
			constants: Some(constants),
			..self
		}
	}

	pub fn with_bitmaps(self, bitmaps: &'a KnownBitmaps) -> Context<'a>
	{
		Context {
			bitmaps: Some(bitmaps),
			..self
		}
	}

	/// The value of a constant, preferring one declared in the enclosing
	/// scope over a top-level or external one.
	pub fn constant(&self, name: &str) -> Option<i64>
	{
		let constants = self.constants?;
		if let Some(scope) = self.scope
		{
			if let Some(value) = constants.get(&qualify(scope, name))
			{
				return Some(*value);
			}
		}
		constants.get(name).copied()
	}

	/// The name a written type refers to: types declared in the enclosing
	/// scope are known by their qualified name.
	pub fn type_name(&self, written: &str) -> String
	{
		match (self.scope, self.local_types)
		{
			(Some(scope), Some(local_types)) if local_types.contains(written) =>
			{
				qualify(scope, written)
			}
			_ => written.to_string(),
		}
	}

	/// Find the bitmap a type name refers to, preferring a bitmap declared
	/// in the enclosing scope over a top-level one.
	pub fn find_bitmap(&self, type_name: &str) -> Option<(String, &'a str)>
	{
		let bitmaps = self.bitmaps?;
		if let Some(scope) = self.scope
		{
			let qualified = qualify(scope, type_name);
			if let Some(backing_type) = bitmaps.get(&qualified)
			{
				return Some((qualified, backing_type.as_str()));
			}
		}
		bitmaps
			.get(type_name)
			.map(|backing_type| (type_name.to_string(), backing_type.as_str()))
	}

	pub fn visibility(&self, flags: EnumSet<DeclarationFlag>) -> Visibility
	{
		if flags.contains(DeclarationFlag::Public)
		{
			Visibility::Public
		}
		else if flags.contains(DeclarationFlag::Private)
		{
			Visibility::Private
		}
		else if self.scope.is_some()
		{
			Visibility::Private
		}
		else
		{
			Visibility::Public
		}
	}

	fn origin(
		&self,
		name: &Identifier,
		location: &Location,
		flags: EnumSet<DeclarationFlag>,
	) -> Origin
	{
		Origin {
			name: name.name.clone(),
			scope: self.scope.map(|x| x.to_string()),
			source_file: self.source_file.to_string(),
			line: location.line_number,
			language: Language::CNext,
			is_exported: self.visibility(flags) == Visibility::Public,
		}
	}

	fn qualified_name(&self, name: &Identifier) -> String
	{
		match self.scope
		{
			Some(scope) => qualify(scope, &name.name),
			None => name.name.clone(),
		}
	}
}
