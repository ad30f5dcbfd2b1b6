//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Integer macros from C and C++ headers.
//! Headers are not parsed: only their `#define` lines are read. Every
//! object-like macro whose body evaluates to an integer becomes a constant
//! that C-Next files including the header can use in array sizes.

use crate::collector::dimensions;
use crate::collector::{ConstantValues, Context};
use crate::lexer::{self, LexedToken, Token};
use crate::parser;
use crate::resolver::Resolution;
use crate::symbol::{Language, Origin, Symbol, VariableSymbol};

use std::collections::HashSet;
use std::path::Path;

/// The language of a foreign source file, judged by its extension.
pub fn language_of(path: &Path) -> Option<Language>
{
	match path.extension()?.to_str()?
	{
		"h" | "c" => Some(Language::C),
		"hpp" | "hh" | "hxx" | "cpp" => Some(Language::Cpp),
		_ => None,
	}
}

pub fn scan(
	source: &str,
	source_file: &str,
	language: Language,
	external_constants: Option<&ConstantValues>,
) -> Resolution
{
	let mut constants = external_constants.cloned().unwrap_or_default();
	let mut defined = HashSet::new();
	let mut symbols = Vec::new();
	for LexedToken { result, location } in lexer::lex(source, source_file)
	{
		let directive = match result
		{
			Ok(Token::Directive(directive)) => directive,
			_ => continue,
		};
		let (name, body) = match split_define(&directive)
		{
			Some(define) => define,
			None => continue,
		};
		if defined.contains(name)
		{
			continue;
		}
		let value = match evaluate_body(body, source_file, &constants)
		{
			Some(value) => value,
			None =>
			{
				log::debug!(
					"{}: macro '{}' is not an integer constant",
					location.format(),
					name
				);
				continue;
			}
		};
		log::trace!("{}: macro {} = {}", source_file, name, value);
		defined.insert(name.to_string());
		constants.insert(name.to_string(), value);
		symbols.push(Symbol::Variable(VariableSymbol {
			origin: Origin {
				name: name.to_string(),
				scope: None,
				source_file: source_file.to_string(),
				line: location.line_number,
				language,
				is_exported: true,
			},
			type_name: "int".to_string(),
			is_const: true,
			is_atomic: false,
			is_array: false,
			dimensions: Vec::new(),
			initial_value: Some(body.to_string()),
		}));
	}
	Resolution {
		symbols,
		constants,
		bitmaps: Default::default(),
		warnings: Vec::new(),
	}
}

/// The name and body of an object-like macro definition.
fn split_define(directive: &str) -> Option<(&str, &str)>
{
	let rest = directive.strip_prefix("define")?;
	if !rest.starts_with(char::is_whitespace)
	{
		return None;
	}
	let rest = rest.trim_start();
	let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
	let (name, body) = rest.split_at(end);
	let is_identifier = name.starts_with(|x: char| !x.is_ascii_digit())
		&& name.chars().all(|x| x.is_ascii_alphanumeric() || x == '_');
	if is_identifier
	{
		Some((name, body.trim()))
	}
	else
	{
		None
	}
}

fn evaluate_body(
	body: &str,
	source_file: &str,
	constants: &ConstantValues,
) -> Option<i64>
{
	let text = strip_integer_suffixes(body);
	let tokens = lexer::lex(&text, source_file);
	let expression = parser::parse_standalone_expression(tokens).ok()?;
	let context = Context::new(source_file).with_constants(constants);
	dimensions::evaluate(&expression, &context)
}

/// Drop the `u` and `l` suffixes of C integer literals, as in `0xFFUL`.
fn strip_integer_suffixes(body: &str) -> String
{
	let mut stripped = String::with_capacity(body.len());
	let mut word = String::new();
	for x in body.chars().chain(std::iter::once(' '))
	{
		if x.is_ascii_alphanumeric() || x == '_'
		{
			word.push(x);
			continue;
		}
		if word.starts_with(|c: char| c.is_ascii_digit())
		{
			stripped.push_str(word.trim_end_matches(&['u', 'U', 'l', 'L'][..]));
		}
		else
		{
			stripped.push_str(&word);
		}
		word.clear();
		stripped.push(x);
	}
	stripped
}

#[cfg(test)]
mod tests
{
	use super::*;

	use pretty_assertions::assert_eq;

	#[test]
	fn split_object_like_macros()
	{
		assert_eq!(split_define("define SIZE 4"), Some(("SIZE", "4")));
		assert_eq!(
			split_define("define  TOTAL  (A + B) "),
			Some(("TOTAL", "(A + B)"))
		);
		assert_eq!(split_define("define GUARD_H"), Some(("GUARD_H", "")));
		assert_eq!(split_define("define MAX(a, b) a"), None);
		assert_eq!(split_define("defined X"), None);
		assert_eq!(split_define("include \"x.h\""), None);
	}

	#[test]
	fn strip_suffixes_of_integers_only()
	{
		assert_eq!(strip_integer_suffixes("0xFFu").trim(), "0xFF");
		assert_eq!(strip_integer_suffixes("(8UL * 2l)").trim(), "(8 * 2)");
		assert_eq!(strip_integer_suffixes("LEVEL_UL").trim(), "LEVEL_UL");
	}

	#[test]
	fn recognize_header_languages()
	{
		assert_eq!(language_of(Path::new("a/b.h")), Some(Language::C));
		assert_eq!(language_of(Path::new("b.hpp")), Some(Language::Cpp));
		assert_eq!(language_of(Path::new("b.cnx")), None);
		assert_eq!(language_of(Path::new("Makefile")), None);
	}
}
