//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use cnext::adapter::lookup::BitLayout;
use cnext::adapter::LookupTables;
use cnext::lexer;
use cnext::parser;
use cnext::resolver;
use cnext::symbol::*;

use anyhow::anyhow;
use pretty_assertions::assert_eq;

fn build(filename: &str) -> Result<LookupTables, anyhow::Error>
{
	let source = std::fs::read_to_string(filename)?;
	let tokens = lexer::lex(&source, filename);
	let declarations = parser::parse(tokens)?;
	let symbols = resolver::resolve(&declarations, filename, None)?;
	Ok(LookupTables::build(&symbols))
}

#[test]
fn build_register_tables() -> Result<(), anyhow::Error>
{
	let lookup = build("tests/samples/valid/registers.cnx")?;
	assert!(lookup.known_registers.contains("GPIO"));
	assert_eq!(
		lookup.register_base_addresses.get("GPIO").map(|x| x.as_str()),
		Some("0x40000000")
	);
	assert_eq!(
		lookup.register_member_offsets.get("GPIO_FLAGS").map(|x| x.as_str()),
		Some("0x04")
	);
	assert_eq!(
		lookup.register_member_access.get("GPIO_CLEAR"),
		Some(&AccessMode::WriteOneToClear)
	);
	assert_eq!(
		lookup.register_member_c_types.get("GPIO_DR").map(|x| x.as_str()),
		Some("uint32_t")
	);
	assert_eq!(
		lookup
			.register_member_bitmap_types
			.get("GPIO_FLAGS")
			.map(|x| x.as_str()),
		Some("Status")
	);
	assert_eq!(lookup.register_member_bitmap_types.len(), 1);
	Ok(())
}

#[test]
fn build_bitmap_tables() -> Result<(), anyhow::Error>
{
	let lookup = build("tests/samples/valid/registers.cnx")?;
	assert!(lookup.known_bitmaps.contains("Status"));
	assert_eq!(lookup.bitmap_bit_widths.get("Color"), Some(&24));
	assert_eq!(
		lookup.bitmap_backing_types.get("Color").map(|x| x.as_str()),
		Some("u32")
	);
	let fields = lookup
		.bitmap_fields
		.get("Status")
		.ok_or(anyhow!("missing Status"))?;
	assert_eq!(
		fields.get("Mode"),
		Some(&BitLayout {
			offset: 2,
			width: 3
		})
	);
	Ok(())
}

#[test]
fn build_struct_tables() -> Result<(), anyhow::Error>
{
	let lookup = build("tests/samples/valid/structs.cnx")?;
	assert!(lookup.known_structs.contains("Packet"));
	let types = lookup
		.struct_field_types
		.get("Packet")
		.ok_or(anyhow!("missing Packet"))?;
	assert_eq!(types.get("origin").map(|x| x.as_str()), Some("Point"));
	let arrays = lookup
		.struct_field_arrays
		.get("Packet")
		.ok_or(anyhow!("missing Packet"))?;
	let mut arrays: Vec<&str> = arrays.iter().map(|x| x.as_str()).collect();
	arrays.sort();
	assert_eq!(arrays, vec!["data", "path"]);
	assert_eq!(
		lookup
			.struct_field_dimensions
			.get("Packet")
			.and_then(|x| x.get("data")),
		Some(&vec![Dimension::Resolved(8)])
	);
	Ok(())
}

#[test]
fn build_enum_tables() -> Result<(), anyhow::Error>
{
	let lookup = build("tests/samples/valid/structs.cnx")?;
	assert!(lookup.known_enums.contains("Mode"));
	assert!(lookup.known_enums.contains("Plain"));
	assert_eq!(lookup.enum_bit_widths.get("Mode"), Some(&16));
	assert_eq!(lookup.enum_bit_widths.get("Plain"), None);
	assert_eq!(
		lookup.enum_members.get("Mode").and_then(|x| x.get("STOP")),
		Some(&6)
	);
	Ok(())
}

#[test]
fn build_scope_tables() -> Result<(), anyhow::Error>
{
	let lookup = build("tests/samples/valid/scopes.cnx")?;
	assert!(lookup.known_scopes.contains("LED"));
	let members = lookup
		.scope_members
		.get("LED")
		.ok_or(anyhow!("missing LED"))?;
	assert!(members.contains("toggle"));
	assert!(members.contains("Pins"));
	let visibility = lookup
		.scope_member_visibility
		.get("LED")
		.ok_or(anyhow!("missing LED"))?;
	assert_eq!(visibility.get("toggle"), Some(&Visibility::Public));
	assert_eq!(visibility.get("refresh"), Some(&Visibility::Private));

	assert!(lookup.known_enums.contains("LED_Color"));
	assert!(lookup.known_bitmaps.contains("LED_Pins"));
	assert!(lookup.known_registers.contains("LED_PORT"));
	assert!(lookup.register_member_offsets.contains_key("LED_PORT_OUT"));
	assert!(lookup.is_enum_function("LED_current"));
	assert!(!lookup.is_enum_function("LED_toggle"));
	Ok(())
}

#[test]
fn merge_included_tables() -> Result<(), anyhow::Error>
{
	let structs = build("tests/samples/valid/structs.cnx")?;
	let scopes = build("tests/samples/valid/scopes.cnx")?;
	let merged = LookupTables::merge(&scopes, &[structs]);

	assert!(merged.known_enums.contains("Mode"));
	assert!(merged.known_enums.contains("LED_Color"));
	assert_eq!(
		merged.function_return_types.get("checksum").map(|x| x.as_str()),
		Some("u8")
	);
	assert!(merged.known_scopes.contains("LED"));
	// Struct and register facts come from the including file only.
	assert!(!merged.known_structs.contains("Packet"));
	assert!(merged.known_structs.contains("LED_State"));
	Ok(())
}

#[test]
fn merge_prefers_base_facts() -> Result<(), anyhow::Error>
{
	let mut base = LookupTables::default();
	base.function_return_types
		.insert("read".to_string(), "Mode".to_string());
	base.known_enums.insert("Mode".to_string());
	let mut included = LookupTables::default();
	included
		.function_return_types
		.insert("read".to_string(), "u8".to_string());
	included
		.function_return_types
		.insert("write".to_string(), "void".to_string());
	included.enum_bit_widths.insert("Mode".to_string(), 32);

	let merged = LookupTables::merge(&base, &[included]);
	assert_eq!(
		merged.function_return_types.get("read").map(|x| x.as_str()),
		Some("Mode")
	);
	assert_eq!(
		merged.function_return_types.get("write").map(|x| x.as_str()),
		Some("void")
	);
	assert_eq!(merged.enum_bit_widths.get("Mode"), Some(&32));
	assert!(merged.is_enum_function("read"));
	assert!(!merged.is_enum_function("write"));
	assert!(!merged.is_enum_function("missing"));
	Ok(())
}

#[test]
fn merge_nothing() -> Result<(), anyhow::Error>
{
	let base = build("tests/samples/valid/registers.cnx")?;
	let merged = LookupTables::merge(&base, &[]);
	assert_eq!(merged, base);
	Ok(())
}
