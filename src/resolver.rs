//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The resolver turns the declarations of one file into symbols.
//! It runs three passes over the same declarations: constants first,
//! then bitmaps (and structs nested in scopes), then everything else.

use crate::collector::{bitmap, scope, structure};
use crate::collector::{enumeration, function, register, variable};
use crate::collector::{ConstantValues, Context, KnownBitmaps};
use crate::common::*;
use crate::error::Error;
use crate::symbol::{qualify, Symbol};

#[derive(Debug, Clone, Default)]
pub struct Resolution
{
	pub symbols: Vec<Symbol>,
	/// Every constant visible in this file, including external ones.
	pub constants: ConstantValues,
	pub bitmaps: KnownBitmaps,
	pub warnings: Vec<String>,
}

pub fn resolve(
	program: &[Declaration],
	source_file: &str,
	external_constants: Option<&ConstantValues>,
) -> Result<Vec<Symbol>, Error>
{
	let resolution = analyze(program, source_file, external_constants)?;
	Ok(resolution.symbols)
}

pub fn analyze(
	program: &[Declaration],
	source_file: &str,
	external_constants: Option<&ConstantValues>,
) -> Result<Resolution, Error>
{
	let constants = collect_constants(program, external_constants);
	log::debug!(
		"{}: pass 0 found {} constants",
		source_file,
		constants.len()
	);

	let mut resolution = Resolution::default();
	let context = Context::new(source_file).with_constants(&constants);
	for declaration in program
	{
		match declaration
		{
			Declaration::Bitmap(x) =>
			{
				resolution.collect_bitmap(x, &context)?;
			}
			Declaration::Scope(x) =>
			{
				let local_types = scope::local_types(x);
				let inner = context
					.in_scope(&x.name.name)
					.with_local_types(&local_types);
				for member in &x.members
				{
					match member
					{
						Declaration::Bitmap(x) =>
						{
							resolution.collect_bitmap(x, &inner)?;
						}
						Declaration::Structure(x) =>
						{
							resolution.collect_structure(x, &inner);
						}
						_ => (),
					}
				}
			}
			_ => (),
		}
	}
	log::debug!(
		"{}: pass 1 found {} bitmaps",
		source_file,
		resolution.bitmaps.len()
	);

	let bitmaps = resolution.bitmaps.clone();
	let context = context.with_bitmaps(&bitmaps);
	for declaration in program
	{
		match declaration
		{
			Declaration::Include { .. } => (),
			Declaration::Bitmap(_) => (),
			Declaration::Scope(x) =>
			{
				let collected = scope::collect(x, &context);
				resolution.record(Symbol::Scope(collected.symbol));
				for member in collected.members
				{
					resolution.record(member);
				}
			}
			Declaration::Structure(x) =>
			{
				resolution.collect_structure(x, &context);
			}
			Declaration::Enumeration(x) =>
			{
				let symbol = enumeration::collect(x, &context);
				resolution.record(Symbol::Enum(symbol));
			}
			Declaration::Register(x) =>
			{
				let symbol = register::collect(x, &context);
				resolution.record(Symbol::Register(symbol));
			}
			Declaration::Function(x) =>
			{
				let symbol = function::collect(x, &context);
				resolution.record(Symbol::Function(symbol));
			}
			Declaration::Variable(x) =>
			{
				let symbol = variable::collect(x, &context);
				resolution.record(Symbol::Variable(symbol));
			}
		}
	}
	log::debug!(
		"{}: pass 2 done, {} symbols in total",
		source_file,
		resolution.symbols.len()
	);

	resolution.constants = constants;
	Ok(resolution)
}

fn collect_constants(
	program: &[Declaration],
	external_constants: Option<&ConstantValues>,
) -> ConstantValues
{
	let mut constants = external_constants.cloned().unwrap_or_default();
	for declaration in program
	{
		match declaration
		{
			Declaration::Variable(x) =>
			{
				if let Some(value) = variable::constant_value(x)
				{
					constants.insert(x.name.name.clone(), value);
				}
			}
			Declaration::Scope(scope) =>
			{
				for member in &scope.members
				{
					if let Declaration::Variable(x) = member
					{
						if let Some(value) = variable::constant_value(x)
						{
							let name = qualify(&scope.name.name, &x.name.name);
							constants.insert(name, value);
						}
					}
				}
			}
			_ => (),
		}
	}
	constants
}

impl Resolution
{
	fn record(&mut self, symbol: Symbol)
	{
		log::trace!("collected {}", symbol.qualified_name());
		self.symbols.push(symbol);
	}

	fn collect_bitmap(
		&mut self,
		declaration: &BitmapDeclaration,
		context: &Context,
	) -> Result<(), Error>
	{
		let symbol = bitmap::collect(declaration, context)?;
		self.bitmaps.insert(
			symbol.origin.qualified_name(),
			symbol.backing_type.clone(),
		);
		self.record(Symbol::Bitmap(symbol));
		Ok(())
	}

	fn collect_structure(
		&mut self,
		declaration: &StructDeclaration,
		context: &Context,
	)
	{
		let collected = structure::collect(declaration, context);
		for warning in &collected.warnings
		{
			log::warn!("{}", warning);
		}
		self.warnings.extend(collected.warnings);
		self.record(Symbol::Struct(collected.symbol));
	}
}
