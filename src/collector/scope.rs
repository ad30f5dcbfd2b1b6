//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! A scope collects its own members, except bitmaps and structs:
//! those are needed earlier and are collected in a separate pass.

use super::{enumeration, function, register, variable};
use super::{Context, LocalTypes};
use crate::common::*;
use crate::symbol::{Language, Origin, ScopeSymbol, Symbol};

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Collected
{
	pub symbol: ScopeSymbol,
	pub members: Vec<Symbol>,
}

pub fn collect(declaration: &ScopeDeclaration, context: &Context) -> Collected
{
	let scope_name = declaration.name.name.as_str();
	let local_types = local_types(declaration);
	let inner = context.in_scope(scope_name).with_local_types(&local_types);

	let mut member_names = Vec::new();
	let mut member_visibility = HashMap::new();
	let mut members = Vec::new();
	for member in &declaration.members
	{
		let name = match member_name(member)
		{
			Some(name) => name,
			None => continue,
		};
		member_names.push(name.to_string());
		member_visibility
			.insert(name.to_string(), inner.visibility(member.flags()));

		match member
		{
			Declaration::Include { .. } => (),
			Declaration::Structure(_) => (),
			Declaration::Bitmap(_) => (),
			Declaration::Scope(_) => (),
			Declaration::Variable(x) =>
			{
				members.push(Symbol::Variable(variable::collect(x, &inner)))
			}
			Declaration::Function(x) =>
			{
				members.push(Symbol::Function(function::collect(x, &inner)))
			}
			Declaration::Enumeration(x) =>
			{
				members.push(Symbol::Enum(enumeration::collect(x, &inner)))
			}
			Declaration::Register(x) =>
			{
				members.push(Symbol::Register(register::collect(x, &inner)))
			}
		}
	}

	let symbol = ScopeSymbol {
		origin: Origin {
			name: scope_name.to_string(),
			scope: None,
			source_file: context.source_file.to_string(),
			line: declaration.location.line_number,
			language: Language::CNext,
			is_exported: true,
		},
		members: member_names,
		member_visibility,
	};
	Collected { symbol, members }
}

/// The types a scope declares, which its members refer to unqualified.
pub fn local_types(declaration: &ScopeDeclaration) -> LocalTypes
{
	declaration
		.members
		.iter()
		.filter_map(|member| match member
		{
			Declaration::Structure(x) => Some(x.name.name.clone()),
			Declaration::Enumeration(x) => Some(x.name.name.clone()),
			Declaration::Bitmap(x) => Some(x.name.name.clone()),
			Declaration::Include { .. } => None,
			Declaration::Variable(_) => None,
			Declaration::Function(_) => None,
			Declaration::Register(_) => None,
			Declaration::Scope(_) => None,
		})
		.collect()
}

fn member_name(declaration: &Declaration) -> Option<&str>
{
	match declaration
	{
		Declaration::Include { .. } => None,
		Declaration::Variable(x) => Some(&x.name.name),
		Declaration::Function(x) => Some(&x.name.name),
		Declaration::Structure(x) => Some(&x.name.name),
		Declaration::Enumeration(x) => Some(&x.name.name),
		Declaration::Bitmap(x) => Some(&x.name.name),
		Declaration::Register(x) => Some(&x.name.name),
		Declaration::Scope(x) => Some(&x.name.name),
	}
}
