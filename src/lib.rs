//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

pub mod adapter;
pub mod collector;
pub mod common;
pub mod error;
pub mod header;
pub mod lexer;
pub mod lowering;
pub mod parser;
pub mod rebuilder;
pub mod resolver;
pub mod stdout;
pub mod symbol;
pub mod symbol_table;
pub mod value_type;

use adapter::{FlatSymbol, LookupTables};
use collector::ConstantValues;
use common::Declaration;
use error::Error;
use resolver::Resolution;
use symbol::{Language, Symbol};
use symbol_table::SymbolTable;

/// Everything known about one source file after binding.
#[derive(Debug, Clone)]
pub struct Unit
{
	pub declarations: Vec<Declaration>,
	pub symbols: Vec<Symbol>,
	pub constants: ConstantValues,
	pub warnings: Vec<String>,
	pub flattened: Vec<FlatSymbol>,
	pub lookup: LookupTables,
}

impl Unit
{
	pub fn includes(&self) -> impl Iterator<Item = &str>
	{
		self.declarations.iter().filter_map(|x| match x
		{
			Declaration::Include {
				path,
				is_system: false,
				..
			} => Some(path.as_str()),
			_ => None,
		})
	}
}

/// Lex, parse and resolve one source file, register its symbols in `table`
/// and build both adapter outputs.
pub fn compile_source(
	source: &str,
	filename: &str,
	external_constants: Option<&ConstantValues>,
	table: &mut SymbolTable,
) -> Result<Unit, Error>
{
	let tokens = lexer::lex(source, filename);
	let declarations = parser::parse(tokens)?;
	let resolution =
		resolver::analyze(&declarations, filename, external_constants)?;
	Ok(bind(declarations, resolution, &[], table))
}

/// Read the integer macros of a C or C++ header into a unit without
/// declarations.
pub fn compile_header(
	source: &str,
	filename: &str,
	language: Language,
	external_constants: Option<&ConstantValues>,
	table: &mut SymbolTable,
) -> Unit
{
	let resolution =
		header::scan(source, filename, language, external_constants);
	bind(Vec::new(), resolution, &[], table)
}

/// Register resolved symbols in `table` and build both adapter outputs.
/// The lookup tables of included units are merged into the result.
pub fn bind(
	declarations: Vec<Declaration>,
	resolution: Resolution,
	included: &[LookupTables],
	table: &mut SymbolTable,
) -> Unit
{
	table.add_symbols(&resolution.symbols);
	let flattened = adapter::flatten(&resolution.symbols, table);
	let lookup = LookupTables::build(&resolution.symbols);
	let lookup = LookupTables::merge(&lookup, included);
	Unit {
		declarations,
		symbols: resolution.symbols,
		constants: resolution.constants,
		warnings: resolution.warnings,
		flattened,
		lookup,
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn compile_sample_source() -> Result<(), anyhow::Error>
	{
		let source = "const u8 SIZE <- 4;\nbool arr[SIZE];\n";
		let mut table = SymbolTable::new();
		let unit = compile_source(source, "sample.cnx", None, &mut table)?;
		assert_eq!(unit.symbols.len(), 2);
		assert_eq!(unit.flattened.len(), 2);
		assert_eq!(unit.constants.get("SIZE"), Some(&4));
		assert!(table.get_variable("arr").is_some());
		Ok(())
	}

	#[test]
	fn compile_sample_header() -> Result<(), anyhow::Error>
	{
		let source = "#ifndef SAMPLE_H\n\
			#define SAMPLE_H\n\
			#define COUNT 3\n\
			#define TOTAL (COUNT * 2u)\n\
			#define NAME \"sample\"\n\
			int read(void);\n\
			#endif\n";
		let mut table = SymbolTable::new();
		let unit =
			compile_header(source, "sample.h", Language::C, None, &mut table);
		assert_eq!(unit.constants.get("COUNT"), Some(&3));
		assert_eq!(unit.constants.get("TOTAL"), Some(&6));
		assert_eq!(unit.constants.get("NAME"), None);
		assert_eq!(unit.symbols.len(), 2);
		assert_eq!(unit.symbols[1].origin().language, Language::C);
		assert!(unit.declarations.is_empty());

		let source = "#include \"sample.h\"\nu8 buffer[TOTAL];\n";
		let unit = compile_source(
			source,
			"sample.cnx",
			Some(&unit.constants),
			&mut table,
		)?;
		let buffer = table
			.get_variable("buffer")
			.ok_or(anyhow::anyhow!("missing buffer"))?;
		assert_eq!(buffer.dimensions, vec![symbol::Dimension::Resolved(6)]);
		assert_eq!(unit.includes().collect::<Vec<_>>(), vec!["sample.h"]);
		Ok(())
	}
}
