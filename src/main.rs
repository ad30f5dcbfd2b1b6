//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use cnext::collector::ConstantValues;
use cnext::common::Declaration;
use cnext::header;
use cnext::lexer;
use cnext::parser;
use cnext::resolver;
use cnext::stdout::{CharSet, ColorChoice, Options, StdOut};
use cnext::symbol_table::SymbolTable;
use cnext::Unit;

use std::collections::HashMap;
use std::io::Write;

use anyhow::anyhow;
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

#[cfg(feature = "logging")]
use env_logger;

#[derive(Debug, clap::Parser)]
#[clap(version)]
struct Cli
{
	/// One or more C-Next source files or C headers, dependencies first
	#[clap(value_parser, required(true))]
	filepaths: Vec<std::path::PathBuf>,

	/// Load constants and output options from TOML file
	#[clap(long)]
	config: Option<std::path::PathBuf>,

	#[clap(flatten)]
	options: Options,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config
{
	/// Values for names that only a C preprocessor could evaluate
	constants: ConstantValues,
	verbose: bool,
	color: Option<ColorChoice>,
	arrows: Option<CharSet>,
}

fn main() -> Result<(), anyhow::Error>
{
	#[cfg(feature = "logging")]
	env_logger::init();

	let result = do_main();
	if result.is_err()
	{
		let mut stdout = StandardStream::stdout(termcolor::ColorChoice::Auto);
		let colorspec_error = ColorSpec::new()
			.set_fg(Some(Color::Red))
			.set_bold(true)
			.to_owned();
		stdout.set_color(&colorspec_error)?;
		writeln!(stdout)?;
		stdout.reset()?;
	}
	result
}

fn do_main() -> Result<(), anyhow::Error>
{
	let Cli {
		filepaths,
		config,
		mut options,
	} = Cli::parse();

	let config: Config = if let Some(filename) = config
	{
		let raw = std::fs::read_to_string(&filename).with_context(|| {
			format!("failed to read '{}'", filename.to_string_lossy())
		})?;
		toml::from_str(&raw).with_context(|| {
			format!("failed to parse '{}'", filename.to_string_lossy())
		})?
	}
	else
	{
		Default::default()
	};
	options.verbose |= config.verbose;
	if let (ColorChoice::Auto, Some(color)) = (options.color, config.color)
	{
		options.color = color;
	}
	if let (CharSet::Unicode, Some(arrows)) = (options.arrows, config.arrows)
	{
		options.arrows = arrows;
	}

	let mut stdout = StdOut::new(&options);
	let mut sources = Vec::new();
	let mut units: HashMap<std::path::PathBuf, Unit> = HashMap::new();
	let mut table = SymbolTable::new();

	for filepath in filepaths
	{
		let filename = filepath.to_string_lossy().to_string();
		let source = std::fs::read_to_string(&filepath)
			.with_context(|| format!("failed to read '{}'", filename))?;
		sources.push((filename.clone(), source.clone()));

		if let Some(language) = header::language_of(&filepath)
		{
			stdout.header("Scanning", &filename)?;
			let unit = cnext::compile_header(
				&source,
				&filename,
				language,
				Some(&config.constants),
				&mut table,
			);
			stdout.dump_symbols(&unit.symbols)?;
			stdout.show_symbols(&unit.flattened)?;
			units.insert(filepath, unit);
			continue;
		}

		stdout.header("Lexing", &filename)?;
		let tokens = lexer::lex(&source, &filename);
		stdout.dump_tokens(&tokens)?;

		stdout.header("Parsing", &filename)?;
		let declarations = match parser::parse(tokens)
		{
			Ok(declarations) => declarations,
			Err(error) =>
			{
				stdout.show_errors([error], ariadne::sources(sources))?;
				return Err(anyhow!("compilation failed"));
			}
		};
		stdout.dump_code(&filename, &declarations)?;

		stdout.header("Preprocessing", &filename)?;
		let mut constants = config.constants.clone();
		let mut included_tables = Vec::new();
		for unit in find_included(&declarations, &filepath, &units)
		{
			for (name, value) in &unit.constants
			{
				constants.insert(name.clone(), *value);
			}
			included_tables.push(unit.lookup.clone());
		}

		stdout.header("Resolving", &filename)?;
		let resolution =
			resolver::analyze(&declarations, &filename, Some(&constants));
		let resolution = match resolution
		{
			Ok(resolution) => resolution,
			Err(error) =>
			{
				stdout.show_errors([error], ariadne::sources(sources))?;
				return Err(anyhow!("compilation failed"));
			}
		};
		stdout.dump_symbols(&resolution.symbols)?;
		stdout.show_warnings(&resolution.warnings)?;

		stdout.header("Adapting", &filename)?;
		let unit =
			cnext::bind(declarations, resolution, &included_tables, &mut table);
		stdout.dump_lookup(&unit.lookup)?;
		stdout.show_symbols(&unit.flattened)?;
		units.insert(filepath, unit);
	}

	stdout.done()?;
	Ok(())
}

/// Find the units named by quoted include directives, searching upwards
/// from the directory of the including file. Headers that were not given
/// on the command line are left to the C compiler.
fn find_included<'a>(
	declarations: &[Declaration],
	relative_path: &std::path::Path,
	units: &'a HashMap<std::path::PathBuf, Unit>,
) -> Vec<&'a Unit>
{
	let mut included = Vec::new();
	for declaration in declarations
	{
		let (path, location) = match declaration
		{
			Declaration::Include {
				path,
				is_system: false,
				location,
			} => (path, location),
			_ => continue,
		};
		let found = relative_path
			.ancestors()
			.skip(1)
			.find_map(|directory| units.get(&directory.join(path)));
		match found
		{
			Some(unit) => included.push(unit),
			None =>
			{
				let location = location.format();
				log::warn!("{}: unresolved include '{}'", location, path);
			}
		}
	}
	included
}
