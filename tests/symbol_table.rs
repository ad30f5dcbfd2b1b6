//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use cnext::lexer;
use cnext::parser;
use cnext::resolver;
use cnext::symbol::*;
use cnext::symbol_table::SymbolTable;

use anyhow::anyhow;
use pretty_assertions::assert_eq;

fn symbols_of(
	source: &str,
	filename: &str,
) -> Result<Vec<Symbol>, anyhow::Error>
{
	let tokens = lexer::lex(source, filename);
	let declarations = parser::parse(tokens)?;
	let symbols = resolver::resolve(&declarations, filename, None)?;
	Ok(symbols)
}

fn table_for(filename: &str) -> Result<SymbolTable, anyhow::Error>
{
	let source = std::fs::read_to_string(filename)?;
	let symbols = symbols_of(&source, filename)?;
	let mut table = SymbolTable::new();
	table.add_symbols(&symbols);
	Ok(table)
}

#[test]
fn read_enum_bit_widths() -> Result<(), anyhow::Error>
{
	let table = table_for("tests/samples/valid/structs.cnx")?;
	assert_eq!(table.get_enum_bit_width("Mode"), Some(16));
	assert_eq!(table.get_enum_bit_width("Plain"), None);
	assert_eq!(table.get_enum_bit_width("Packet"), None);

	let table = table_for("tests/samples/valid/scopes.cnx")?;
	assert_eq!(table.get_enum_bit_width("LED_Color"), Some(8));
	assert_eq!(table.get_enum_bit_width("Color"), None);
	Ok(())
}

#[test]
fn read_scope_of_member() -> Result<(), anyhow::Error>
{
	let table = table_for("tests/samples/valid/scopes.cnx")?;
	assert_eq!(table.get_scope_of_member("toggle"), Some("LED"));
	assert_eq!(table.get_scope_of_member("refresh"), Some("LED"));
	assert_eq!(table.get_scope_of_member("State"), Some("LED"));
	assert_eq!(table.get_scope_of_member("brightness"), None);
	assert_eq!(table.get_scope_of_member("LED_toggle"), None);
	Ok(())
}

#[test]
fn read_variables() -> Result<(), anyhow::Error>
{
	let table = table_for("tests/samples/valid/scopes.cnx")?;
	let state = table
		.get_variable("LED_state")
		.ok_or(anyhow!("missing LED_state"))?;
	assert_eq!(state.type_name, "LED_State");
	assert!(!state.is_array);
	let brightness = table
		.get_variable("brightness")
		.ok_or(anyhow!("missing brightness"))?;
	assert!(brightness.is_array);
	assert_eq!(brightness.dimensions, vec![Dimension::Resolved(3)]);
	assert_eq!(table.get_variable("state"), None);
	Ok(())
}

#[test]
fn keep_first_registration() -> Result<(), anyhow::Error>
{
	let first = symbols_of(
		"enum Mode : u16 { IDLE }\n\
		 struct Point { i32 x; }\n\
		 scope LED { void toggle() {} }\n\
		 u8 level;\n",
		"first.cnx",
	)?;
	let second = symbols_of(
		"enum Mode : u32 { IDLE }\n\
		 struct Point { u8 x; u8 z; }\n\
		 scope Motor { void toggle() {} }\n\
		 u16 level[2];\n",
		"second.cnx",
	)?;
	let mut table = SymbolTable::new();
	table.add_symbols(&first);
	table.add_symbols(&second);

	assert_eq!(table.get_enum_bit_width("Mode"), Some(16));
	assert_eq!(table.get_scope_of_member("toggle"), Some("LED"));
	assert_eq!(table.get_struct_field_type("Point", "x"), Some("i32"));
	// Fields are registered one by one, so a new field is still added.
	assert_eq!(table.get_struct_field_type("Point", "z"), Some("u8"));
	let level = table
		.get_variable("level")
		.ok_or(anyhow!("missing level"))?;
	assert_eq!(level.type_name, "u8");
	assert!(!level.is_array);
	Ok(())
}

#[test]
fn add_struct_field_once() -> Result<(), anyhow::Error>
{
	let mut table = SymbolTable::new();
	let field = FieldInfo {
		name: "on".to_string(),
		type_name: "bool".to_string(),
		is_array: false,
		is_const: false,
		dimensions: Vec::new(),
	};
	table.add_struct_field("State", field.clone());
	table.add_struct_field(
		"State",
		FieldInfo {
			type_name: "u8".to_string(),
			..field
		},
	);
	assert!(table.is_known_struct("State"));
	let fields = table
		.get_struct_fields("State")
		.ok_or(anyhow!("missing State"))?;
	assert_eq!(fields.len(), 1);
	assert_eq!(fields[0].type_name, "bool");
	Ok(())
}
