//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The command line interface prints one line per flattened symbol,
//! and colored dumps of intermediate results when run with _verbose_.

use crate::adapter::{FlatSymbol, LookupTables, SymbolKind};
use crate::common;
use crate::error;
use crate::lexer;
use crate::rebuilder;
use crate::symbol::Symbol;

use serde::Deserialize;
use std::io::Write;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Default, Deserialize, clap::Args)]
#[serde(default, deny_unknown_fields)]
pub struct Options
{
	/// Show a lot of intermediate output
	#[clap(short, long)]
	pub verbose: bool,

	/// When to use ANSI colors in error messages and intermediate output
	#[clap(long, value_name("WHEN"))]
	#[clap(value_enum, default_value_t=ColorChoice::Auto)]
	pub color: ColorChoice,

	/// Which character set to use to draw the arrows in error messages
	#[clap(long, value_name("CHARSET"))]
	#[clap(value_enum, default_value_t=CharSet::Unicode)]
	pub arrows: CharSet,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice
{
	#[default]
	Auto,
	Always,
	Never,
}

impl From<ColorChoice> for termcolor::ColorChoice
{
	fn from(choice: ColorChoice) -> termcolor::ColorChoice
	{
		match choice
		{
			ColorChoice::Auto => termcolor::ColorChoice::Auto,
			ColorChoice::Always => termcolor::ColorChoice::Always,
			ColorChoice::Never => termcolor::ColorChoice::Never,
		}
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CharSet
{
	#[default]
	Unicode,
	Ascii,
}

impl From<CharSet> for ariadne::CharSet
{
	fn from(choice: CharSet) -> ariadne::CharSet
	{
		match choice
		{
			CharSet::Unicode => ariadne::CharSet::Unicode,
			CharSet::Ascii => ariadne::CharSet::Ascii,
		}
	}
}

pub struct StdOut
{
	stdout: StandardStream,
	is_verbose: bool,
	report_config: ariadne::Config,
}

impl StdOut
{
	pub fn new(options: &Options) -> StdOut
	{
		let stdout = StandardStream::stdout(options.color.into());
		let is_verbose = options.verbose;
		let with_color = match options.color
		{
			ColorChoice::Auto => stdout.supports_color(),
			ColorChoice::Always => true,
			ColorChoice::Never => false,
		};
		let report_config = ariadne::Config::default()
			.with_color(with_color)
			.with_char_set(options.arrows.into());
		StdOut {
			stdout,
			is_verbose,
			report_config,
		}
	}

	pub fn header(
		&mut self,
		preamble: &str,
		filename: &str,
	) -> Result<(), std::io::Error>
	{
		if self.is_verbose
		{
			let colorspec_header = ColorSpec::new();
			self.stdout.set_color(&colorspec_header)?;
			writeln!(self.stdout, "{} {}...", preamble, filename)?;
		}
		Ok(())
	}

	pub fn dump_tokens(
		&mut self,
		tokens: &[lexer::LexedToken],
	) -> Result<(), anyhow::Error>
	{
		if self.is_verbose
		{
			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			for token in tokens
			{
				match &token.result
				{
					Result::Ok(token) => write!(self.stdout, "{:?}   ", token)?,
					Result::Err(_) => write!(self.stdout, "ERROR   ")?,
				}
			}
			writeln!(self.stdout)?;
			writeln!(self.stdout)?;
		}
		Ok(())
	}

	pub fn dump_code(
		&mut self,
		filename: &str,
		declarations: &[common::Declaration],
	) -> Result<(), anyhow::Error>
	{
		if self.is_verbose
		{
			self.header("Rebuilding", filename)?;

			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			let indentation = rebuilder::Indentation {
				value: "\u{00a6}   ",
				amount: 1,
			};
			let code = rebuilder::rebuild(declarations, &indentation)?;
			writeln!(self.stdout, "{}", code)?;
		}
		Ok(())
	}

	pub fn dump_symbols(
		&mut self,
		symbols: &[Symbol],
	) -> Result<(), anyhow::Error>
	{
		if self.is_verbose
		{
			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			for symbol in symbols
			{
				writeln!(self.stdout, "{:?}", symbol)?;
			}
			writeln!(self.stdout)?;
		}
		Ok(())
	}

	pub fn dump_lookup(
		&mut self,
		lookup: &LookupTables,
	) -> Result<(), anyhow::Error>
	{
		if self.is_verbose
		{
			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			writeln!(self.stdout, "{:#?}", lookup)?;
			writeln!(self.stdout)?;
		}
		Ok(())
	}

	pub fn show_symbols(
		&mut self,
		symbols: &[FlatSymbol],
	) -> Result<(), std::io::Error>
	{
		self.stdout.reset()?;
		for symbol in symbols
		{
			writeln!(self.stdout, "{}", describe(symbol))?;
		}
		Ok(())
	}

	pub fn show_warnings(
		&mut self,
		warnings: &[String],
	) -> Result<(), std::io::Error>
	{
		if !warnings.is_empty()
		{
			let colorspec_warning = ColorSpec::new()
				.set_fg(Some(Color::Yellow))
				.set_bold(true)
				.to_owned();
			self.stdout.set_color(&colorspec_warning)?;
			for warning in warnings
			{
				writeln!(self.stdout, "Warning: {}", warning)?;
			}
			self.stdout.reset()?;
		}
		Ok(())
	}

	pub fn show_errors(
		&mut self,
		errors: impl IntoIterator<Item = error::Error>,
		mut source_cache: impl ariadne::Cache<String>,
	) -> Result<(), std::io::Error>
	{
		let colorspec_error = ColorSpec::new()
			.set_fg(Some(Color::Red))
			.set_bold(true)
			.to_owned();
		self.stdout.set_color(&colorspec_error)?;
		for error in errors
		{
			writeln!(self.stdout)?;
			let report = error.build_report(self.report_config);
			report.eprint(&mut source_cache)?;
		}
		writeln!(self.stdout)?;
		Ok(())
	}

	pub fn done(&mut self) -> Result<(), std::io::Error>
	{
		self.stdout.reset()?;
		if self.is_verbose
		{
			writeln!(self.stdout, "Done.")?;
		}
		Ok(())
	}
}

/// A single line such as `field Point.x: i32` or
/// `bitmap_field Status.Mode: u8 bits 2-4`.
pub fn describe(symbol: &FlatSymbol) -> String
{
	let is_child = match symbol.kind
	{
		SymbolKind::Field => true,
		SymbolKind::EnumMember => true,
		SymbolKind::BitmapField => true,
		SymbolKind::RegisterMember => true,
		SymbolKind::Namespace => false,
		SymbolKind::Struct => false,
		SymbolKind::Enum => false,
		SymbolKind::Bitmap => false,
		SymbolKind::Register => false,
		SymbolKind::Function => false,
		SymbolKind::Variable => false,
	};
	let mut line = match &symbol.parent
	{
		Some(parent) if is_child =>
		{
			format!("{} {}.{}", symbol.kind, parent, symbol.name)
		}
		_ => format!("{} {}", symbol.kind, symbol.name),
	};
	if let Some(type_name) = &symbol.type_name
	{
		line.push_str(": ");
		line.push_str(type_name);
	}
	for dimension in &symbol.dimensions
	{
		line.push_str(&format!("[{}]", dimension));
	}
	if let Some(signature) = &symbol.signature
	{
		line.push(' ');
		line.push_str(signature);
	}
	if let Some(access_mode) = &symbol.access_mode
	{
		line.push_str(&format!(" {}", access_mode));
	}
	if symbol.is_const
	{
		line.push_str(" const");
	}
	if !symbol.is_exported
	{
		line.push_str(" private");
	}
	line
}
