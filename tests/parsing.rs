//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use cnext::common::Declaration;
use cnext::error;
use cnext::lexer;
use cnext::parser;
use cnext::rebuilder;

use anyhow::anyhow;
use pretty_assertions::assert_eq;

fn parse(
	filename: &str,
) -> Result<Result<Vec<Declaration>, error::Error>, anyhow::Error>
{
	let source = std::fs::read_to_string(filename)?;
	let tokens = lexer::lex(&source, filename);
	Ok(parser::parse(tokens))
}

fn parse_valid(filename: &str) -> Result<Vec<Declaration>, anyhow::Error>
{
	let declarations = parse(filename)??;
	Ok(declarations)
}

#[test]
fn parse_valid_samples() -> Result<(), anyhow::Error>
{
	let samples = [
		("tests/samples/valid/constants.cnx", 9),
		("tests/samples/valid/registers.cnx", 3),
		("tests/samples/valid/scopes.cnx", 2),
		("tests/samples/valid/structs.cnx", 9),
		("tests/samples/valid/includes.cnx", 5),
		("tests/samples/valid/devices.cnx", 4),
	];
	for (filename, count) in samples
	{
		let declarations = parse_valid(filename)?;
		assert_eq!(declarations.len(), count, "in {}", filename);
	}
	Ok(())
}

#[test]
fn parse_include_directives() -> Result<(), anyhow::Error>
{
	let declarations = parse_valid("tests/samples/valid/includes.cnx")?;
	let includes: Vec<(&str, bool)> = declarations
		.iter()
		.filter_map(|x| match x
		{
			Declaration::Include {
				path, is_system, ..
			} => Some((path.as_str(), *is_system)),
			_ => None,
		})
		.collect();
	assert_eq!(includes, vec![("structs.cnx", false), ("stdint.h", true)]);
	Ok(())
}

#[test]
fn parse_scope_members() -> Result<(), anyhow::Error>
{
	let declarations = parse_valid("tests/samples/valid/scopes.cnx")?;
	match &declarations[0]
	{
		Declaration::Scope(scope) =>
		{
			assert_eq!(scope.name.name, "LED");
			assert_eq!(scope.members.len(), 10);
			Ok(())
		}
		other => Err(anyhow!("unexpected {:?}", other)),
	}
}

#[test]
fn fail_to_parse_missing_semicolon() -> Result<(), anyhow::Error>
{
	let parse_result = parse("tests/samples/invalid/missing_semicolon.cnx")?;
	match parse_result
	{
		Ok(_) => Err(anyhow!("broken test")),
		Err(error::Error::UnexpectedToken { location, .. }) =>
		{
			assert_eq!(location.line_number, 2);
			Ok(())
		}
		Err(error) => Err(anyhow!("unexpected {:?}", error)),
	}
}

#[test]
fn fail_to_parse_nested_scope() -> Result<(), anyhow::Error>
{
	let parse_result = parse("tests/samples/invalid/nested_scope.cnx")?;
	match parse_result
	{
		Ok(_) => Err(anyhow!("broken test")),
		Err(error) =>
		{
			assert_eq!(error.code(), 300);
			assert_eq!(error.location().line_number, 2);
			Ok(())
		}
	}
}

#[test]
fn fail_to_parse_unknown_access_mode() -> Result<(), anyhow::Error>
{
	let parse_result = parse("tests/samples/invalid/unknown_access.cnx")?;
	match parse_result
	{
		Ok(_) => Err(anyhow!("broken test")),
		Err(error::Error::UnexpectedToken {
			location,
			expectation,
		}) =>
		{
			assert_eq!(location.line_number, 2);
			assert!(expectation.contains("w1c"));
			Ok(())
		}
		Err(error) => Err(anyhow!("unexpected {:?}", error)),
	}
}

#[test]
fn fail_to_parse_unterminated_struct() -> Result<(), anyhow::Error>
{
	let tokens = lexer::lex("struct Point { i32 x;", "test.cnx");
	match parser::parse(tokens)
	{
		Ok(_) => Err(anyhow!("broken test")),
		Err(error) =>
		{
			assert_eq!(error.code(), 100);
			Ok(())
		}
	}
}

#[test]
fn rebuild_and_reparse() -> Result<(), anyhow::Error>
{
	let indentation = rebuilder::Indentation {
		value: "\t",
		amount: 0,
	};
	for filename in [
		"tests/samples/valid/constants.cnx",
		"tests/samples/valid/registers.cnx",
		"tests/samples/valid/scopes.cnx",
		"tests/samples/valid/structs.cnx",
	]
	{
		let declarations = parse_valid(filename)?;
		let code = rebuilder::rebuild(&declarations, &indentation)?;
		let tokens = lexer::lex(&code, filename);
		let reparsed = parser::parse(tokens)?;
		let again = rebuilder::rebuild(&reparsed, &indentation)?;
		assert_eq!(code, again, "in {}", filename);
	}
	Ok(())
}
