//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use cnext::adapter;
use cnext::adapter::{FlatSymbol, LookupTables, SymbolKind};
use cnext::lexer;
use cnext::parser;
use cnext::resolver;
use cnext::stdout::describe;
use cnext::symbol::*;
use cnext::symbol_table::SymbolTable;

use anyhow::anyhow;
use comfy_table::Table;
use pretty_assertions::assert_eq;

fn resolve(filename: &str) -> Result<Vec<Symbol>, anyhow::Error>
{
	let source = std::fs::read_to_string(filename)?;
	let tokens = lexer::lex(&source, filename);
	let declarations = parser::parse(tokens)?;
	let symbols = resolver::resolve(&declarations, filename, None)?;
	Ok(symbols)
}

fn flatten(filename: &str) -> Result<Vec<FlatSymbol>, anyhow::Error>
{
	let symbols = resolve(filename)?;
	let mut table = SymbolTable::new();
	Ok(adapter::flatten(&symbols, &mut table))
}

fn find<'a>(
	flattened: &'a [FlatSymbol],
	kind: SymbolKind,
	name: &str,
) -> Result<&'a FlatSymbol, anyhow::Error>
{
	flattened
		.iter()
		.find(|x| x.kind == kind && x.name == name)
		.ok_or_else(|| anyhow!("no {} named {}", kind, name))
}

type Entry = (SymbolKind, String, Option<String>);

/// The names every symbol should expand into, derived without the adapter.
fn expected_entries(symbols: &[Symbol]) -> Vec<Entry>
{
	let mut entries = Vec::new();
	for symbol in symbols
	{
		let name = symbol.qualified_name();
		let parent = symbol.origin().scope.clone();
		let (kind, children): (SymbolKind, Vec<(SymbolKind, String)>) =
			match symbol
			{
				Symbol::Struct(x) => (
					SymbolKind::Struct,
					x.fields
						.iter()
						.map(|f| (SymbolKind::Field, f.name.clone()))
						.collect(),
				),
				Symbol::Enum(x) => (
					SymbolKind::Enum,
					x.members
						.iter()
						.map(|(m, _)| (SymbolKind::EnumMember, m.clone()))
						.collect(),
				),
				Symbol::Bitmap(x) => (
					SymbolKind::Bitmap,
					x.fields
						.iter()
						.map(|f| (SymbolKind::BitmapField, f.name.clone()))
						.collect(),
				),
				Symbol::Register(x) => (
					SymbolKind::Register,
					x.members
						.iter()
						.map(|m| (SymbolKind::RegisterMember, m.name.clone()))
						.collect(),
				),
				Symbol::Scope(_) => (SymbolKind::Namespace, Vec::new()),
				Symbol::Function(_) => (SymbolKind::Function, Vec::new()),
				Symbol::Variable(_) => (SymbolKind::Variable, Vec::new()),
			};
		for (child_kind, child_name) in children
		{
			entries.push((child_kind, child_name, Some(name.clone())));
		}
		entries.push((kind, name, parent));
	}
	entries.sort();
	entries
}

fn actual_entries(flattened: &[FlatSymbol]) -> Vec<Entry>
{
	let mut entries: Vec<Entry> = flattened
		.iter()
		.map(|x| (x.kind, x.name.clone(), x.parent.clone()))
		.collect();
	entries.sort();
	entries
}

fn dump(entries: &[Entry]) -> Table
{
	let mut table = Table::new();
	table.set_header(vec!["kind", "name", "parent"]);
	for (kind, name, parent) in entries
	{
		table.add_row(vec![
			kind.to_string(),
			name.clone(),
			parent.clone().unwrap_or_default(),
		]);
	}
	table
}

fn check_equivalence(filename: &str) -> Result<(), anyhow::Error>
{
	let symbols = resolve(filename)?;
	let mut table = SymbolTable::new();
	let flattened = adapter::flatten(&symbols, &mut table);
	let expected = expected_entries(&symbols);
	let actual = actual_entries(&flattened);
	if expected != actual
	{
		println!("expected:\n{}", dump(&expected));
		println!("actual:\n{}", dump(&actual));
	}
	assert_eq!(expected, actual, "in {}", filename);
	Ok(())
}

#[test]
fn flatten_every_symbol_once() -> Result<(), anyhow::Error>
{
	check_equivalence("tests/samples/valid/constants.cnx")?;
	check_equivalence("tests/samples/valid/registers.cnx")?;
	check_equivalence("tests/samples/valid/scopes.cnx")?;
	check_equivalence("tests/samples/valid/structs.cnx")?;
	Ok(())
}

#[test]
fn flatten_scope_functions() -> Result<(), anyhow::Error>
{
	let flattened = flatten("tests/samples/valid/scopes.cnx")?;

	let namespace = find(&flattened, SymbolKind::Namespace, "LED")?;
	assert_eq!(namespace.parent, None);
	assert!(namespace.is_exported);

	let toggle = find(&flattened, SymbolKind::Function, "LED_toggle")?;
	assert!(toggle.is_exported);
	assert_eq!(toggle.parent.as_deref(), Some("LED"));
	assert_eq!(toggle.signature.as_deref(), Some("void LED_toggle()"));

	let refresh = find(&flattened, SymbolKind::Function, "LED_refresh")?;
	assert!(!refresh.is_exported);
	assert_eq!(refresh.parent.as_deref(), Some("LED"));

	let state = find(&flattened, SymbolKind::Variable, "LED_state")?;
	assert!(!state.is_exported);
	assert_eq!(state.type_name.as_deref(), Some("LED_State"));
	Ok(())
}

#[test]
fn flatten_bitmap_fields() -> Result<(), anyhow::Error>
{
	let flattened = flatten("tests/samples/valid/registers.cnx")?;

	let status = find(&flattened, SymbolKind::Bitmap, "Status")?;
	assert_eq!(status.type_name.as_deref(), Some("u8"));
	assert_eq!(status.signature.as_deref(), Some("8 bits"));

	let fields: Vec<(&str, Option<&str>, Option<&str>)> = flattened
		.iter()
		.filter(|x| x.parent.as_deref() == Some("Status"))
		.map(|x| {
			(
				x.name.as_str(),
				x.type_name.as_deref(),
				x.signature.as_deref(),
			)
		})
		.collect();
	assert_eq!(
		fields,
		vec![
			("Ready", Some("bool"), Some("bit 0")),
			("Error", Some("bool"), Some("bit 1")),
			("Mode", Some("u8"), Some("bits 2-4")),
			("Reserved", Some("u8"), Some("bits 5-7")),
		]
	);

	let color = find(&flattened, SymbolKind::Bitmap, "Color")?;
	assert_eq!(color.type_name.as_deref(), Some("u32"));
	let blue = flattened
		.iter()
		.find(|x| x.name == "Blue" && x.parent.as_deref() == Some("Color"))
		.ok_or(anyhow!("missing Blue"))?;
	assert_eq!(blue.signature.as_deref(), Some("bits 16-23"));

	assert!(flattened
		.iter()
		.filter(|x| x.kind == SymbolKind::BitmapField)
		.all(|x| x.is_const));
	assert!(!status.is_const);
	Ok(())
}

#[test]
fn flatten_register_members() -> Result<(), anyhow::Error>
{
	let flattened = flatten("tests/samples/valid/registers.cnx")?;
	let register = find(&flattened, SymbolKind::Register, "GPIO")?;
	assert_eq!(register.signature.as_deref(), Some("@ 0x40000000"));

	let members: Vec<&FlatSymbol> = flattened
		.iter()
		.filter(|x| x.kind == SymbolKind::RegisterMember)
		.collect();
	assert_eq!(members.len(), 4);
	let flags = members[1];
	assert_eq!(flags.name, "FLAGS");
	assert_eq!(flags.type_name.as_deref(), Some("Status"));
	assert_eq!(flags.access_mode, Some(AccessMode::ReadOnly));
	assert!(flags.is_const);
	let trigger = members[3];
	assert_eq!(trigger.type_name.as_deref(), Some("uint8_t"));
	assert_eq!(trigger.signature.as_deref(), Some("@ 0x0C"));
	assert!(!trigger.is_const);
	Ok(())
}

#[test]
fn flatten_enum_members() -> Result<(), anyhow::Error>
{
	let flattened = flatten("tests/samples/valid/structs.cnx")?;
	let mode = find(&flattened, SymbolKind::Enum, "Mode")?;
	assert_eq!(mode.signature.as_deref(), Some("16 bits"));
	let plain = find(&flattened, SymbolKind::Enum, "Plain")?;
	assert_eq!(plain.signature, None);

	let members: Vec<(&str, Option<&str>)> = flattened
		.iter()
		.filter(|x| x.parent.as_deref() == Some("Mode"))
		.map(|x| (x.name.as_str(), x.signature.as_deref()))
		.collect();
	assert_eq!(
		members,
		vec![
			("IDLE", Some("= 0")),
			("RUN", Some("= 5")),
			("STOP", Some("= 6"))
		]
	);
	Ok(())
}

#[test]
fn flatten_struct_fields_into_table() -> Result<(), anyhow::Error>
{
	let symbols = resolve("tests/samples/valid/structs.cnx")?;
	let mut table = SymbolTable::new();
	let flattened = adapter::flatten(&symbols, &mut table);

	assert!(table.is_known_struct("Packet"));
	assert!(table.is_known_struct("Point"));
	assert_eq!(table.get_struct_field_type("Packet", "origin"), Some("Point"));
	let path = table
		.get_struct_field("Packet", "path")
		.ok_or(anyhow!("missing path"))?;
	assert!(path.is_array);
	assert_eq!(path.dimensions, vec![Dimension::Resolved(4)]);

	let checksum = flattened
		.iter()
		.find(|x| x.name == "checksum" && x.kind == SymbolKind::Field)
		.ok_or(anyhow!("missing checksum"))?;
	assert!(checksum.is_const);
	assert_eq!(checksum.parent.as_deref(), Some("Packet"));
	Ok(())
}

#[test]
fn describe_flat_symbols() -> Result<(), anyhow::Error>
{
	let flattened = flatten("tests/samples/valid/structs.cnx")?;
	let lines: Vec<String> = flattened.iter().map(describe).collect();
	assert!(lines.contains(&"struct Point: Point".to_string()));
	assert!(lines.contains(&"field Point.x: i32".to_string()));
	assert!(lines.contains(&"field Packet.data: u8[8]".to_string()));
	let run = "enum_member Mode.RUN: Mode = 5 const".to_string();
	assert!(lines.contains(&run));
	assert!(lines.contains(
		&"function checksum: u8 u8 checksum(const Packet packet, \
		  u8 data[], u32 count)"
			.to_string()
	));
	Ok(())
}

#[test]
fn flatten_and_build_agree() -> Result<(), anyhow::Error>
{
	let symbols = resolve("tests/samples/valid/scopes.cnx")?;
	let mut table = SymbolTable::new();
	let flattened = adapter::flatten(&symbols, &mut table);
	let lookup = LookupTables::build(&symbols);

	for flat in &flattened
	{
		let is_known = match flat.kind
		{
			SymbolKind::Namespace => lookup.known_scopes.contains(&flat.name),
			SymbolKind::Struct => lookup.known_structs.contains(&flat.name),
			SymbolKind::Enum => lookup.known_enums.contains(&flat.name),
			SymbolKind::Bitmap => lookup.known_bitmaps.contains(&flat.name),
			SymbolKind::Register =>
			{
				lookup.known_registers.contains(&flat.name)
			}
			SymbolKind::Function =>
			{
				lookup.function_return_types.contains_key(&flat.name)
			}
			SymbolKind::Field => true,
			SymbolKind::EnumMember => true,
			SymbolKind::BitmapField => true,
			SymbolKind::RegisterMember => true,
			SymbolKind::Variable => true,
		};
		assert!(is_known, "{} {} is not in the lookup", flat.kind, flat.name);
	}
	Ok(())
}
