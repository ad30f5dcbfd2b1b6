//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! Adapters translate resolved symbols for two kinds of consumers:
//! tooling that wants one flat symbol per name, and code generation that
//! queries specialized lookup tables.

pub mod flatten;
pub mod lookup;

pub use flatten::{flatten, FlatSymbol, SymbolKind};
pub use lookup::LookupTables;
