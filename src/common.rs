//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The syntax tree produced by the parser and consumed by the collectors.
//! It only describes declarations; function bodies are not retained.

pub use crate::lexer::IntegerLiteral;
pub use crate::lexer::Location;

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

#[must_use]
#[derive(Debug, Clone)]
pub enum Declaration
{
	Include
	{
		path: String,
		is_system: bool,
		location: Location,
	},
	Variable(VariableDeclaration),
	Function(FunctionDeclaration),
	Structure(StructDeclaration),
	Enumeration(EnumDeclaration),
	Bitmap(BitmapDeclaration),
	Register(RegisterDeclaration),
	Scope(ScopeDeclaration),
}

impl Declaration
{
	pub fn location(&self) -> &Location
	{
		match self
		{
			Declaration::Include { location, .. } => location,
			Declaration::Variable(x) => &x.location,
			Declaration::Function(x) => &x.location,
			Declaration::Structure(x) => &x.location,
			Declaration::Enumeration(x) => &x.location,
			Declaration::Bitmap(x) => &x.location,
			Declaration::Register(x) => &x.location,
			Declaration::Scope(x) => &x.location,
		}
	}

	pub fn flags(&self) -> EnumSet<DeclarationFlag>
	{
		match self
		{
			Declaration::Include { .. } => EnumSet::new(),
			Declaration::Variable(x) => x.flags,
			Declaration::Function(x) => x.flags,
			Declaration::Structure(x) => x.flags,
			Declaration::Enumeration(x) => x.flags,
			Declaration::Bitmap(x) => x.flags,
			Declaration::Register(x) => x.flags,
			Declaration::Scope(_) => EnumSet::new(),
		}
	}
}

#[derive(Debug, EnumSetType)]
pub enum DeclarationFlag
{
	Const,
	Atomic,
	Volatile,
	Public,
	Private,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier
{
	pub name: String,
	pub location: Location,
}

/// A type as written, with scope qualifiers already joined by underscores.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName
{
	pub name: String,
	pub location: Location,
}

/// One bracketed suffix; `None` for an unsized `[]`.
pub type ArraySuffix = Option<Expression>;

#[must_use]
#[derive(Debug, Clone)]
pub struct VariableDeclaration
{
	pub name: Identifier,
	pub value_type: TypeName,
	pub dimensions: Vec<ArraySuffix>,
	pub value: Option<Expression>,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct FunctionDeclaration
{
	pub name: Identifier,
	pub return_type: TypeName,
	pub parameters: Vec<Parameter>,
	pub has_body: bool,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct Parameter
{
	pub name: Identifier,
	pub value_type: TypeName,
	pub dimensions: Vec<ArraySuffix>,
	pub flags: EnumSet<DeclarationFlag>,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct StructDeclaration
{
	pub name: Identifier,
	pub members: Vec<Member>,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct Member
{
	pub name: Identifier,
	pub value_type: TypeName,
	pub dimensions: Vec<ArraySuffix>,
	pub flags: EnumSet<DeclarationFlag>,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct EnumDeclaration
{
	pub name: Identifier,
	pub backing_type: Option<TypeName>,
	pub variants: Vec<Variant>,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct Variant
{
	pub name: Identifier,
	pub value: Option<Expression>,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct BitmapDeclaration
{
	pub name: Identifier,
	pub bit_width: u32,
	pub fields: Vec<BitmapField>,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct BitmapField
{
	pub name: Identifier,
	pub width: Option<Expression>,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct RegisterDeclaration
{
	pub name: Identifier,
	pub address: Expression,
	pub members: Vec<RegisterMember>,
	pub flags: EnumSet<DeclarationFlag>,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct RegisterMember
{
	pub name: Identifier,
	pub value_type: TypeName,
	pub access: AccessMode,
	pub offset: Expression,
}

#[must_use]
#[derive(Debug, Clone)]
pub struct ScopeDeclaration
{
	pub name: Identifier,
	pub members: Vec<Declaration>,
	pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode
{
	#[serde(rename = "rw")]
	ReadWrite,
	#[serde(rename = "ro")]
	ReadOnly,
	#[serde(rename = "wo")]
	WriteOnly,
	#[serde(rename = "w1c")]
	WriteOneToClear,
	#[serde(rename = "w1s")]
	WriteOneToSet,
}

serde_plain::derive_display_from_serialize!(AccessMode);
serde_plain::derive_fromstr_from_deserialize!(AccessMode);

impl AccessMode
{
	pub fn is_readable(&self) -> bool
	{
		match self
		{
			AccessMode::ReadWrite => true,
			AccessMode::ReadOnly => true,
			AccessMode::WriteOnly => false,
			AccessMode::WriteOneToClear => true,
			AccessMode::WriteOneToSet => true,
		}
	}

	pub fn is_writable(&self) -> bool
	{
		match self
		{
			AccessMode::ReadWrite => true,
			AccessMode::ReadOnly => false,
			AccessMode::WriteOnly => true,
			AccessMode::WriteOneToClear => true,
			AccessMode::WriteOneToSet => true,
		}
	}
}

#[must_use]
#[derive(Debug, Clone)]
pub enum Expression
{
	Integer
	{
		literal: IntegerLiteral,
		location: Location,
	},
	Literal
	{
		literal: Literal,
		location: Location,
	},
	Identifier(Identifier),
	Member
	{
		base: Box<Expression>,
		member: Identifier,
	},
	Element
	{
		base: Box<Expression>,
		index: Box<Expression>,
		location: Location,
	},
	Call
	{
		callee: Box<Expression>,
		arguments: Vec<Expression>,
		location: Location,
	},
	Binary
	{
		op: BinaryOp,
		left: Box<Expression>,
		right: Box<Expression>,
		location: Location,
	},
	Unary
	{
		op: UnaryOp,
		expression: Box<Expression>,
		location: Location,
	},
	Ternary
	{
		condition: Box<Expression>,
		then_value: Box<Expression>,
		else_value: Box<Expression>,
		location: Location,
	},
	Parenthesized
	{
		inner: Box<Expression>,
		location: Location,
	},
	ArrayLiteral
	{
		elements: Vec<Expression>,
		location: Location,
	},
	StructLiteral
	{
		members: Vec<(Identifier, Expression)>,
		location: Location,
	},
}

impl Expression
{
	pub fn location(&self) -> &Location
	{
		match self
		{
			Expression::Integer { location, .. } => location,
			Expression::Literal { location, .. } => location,
			Expression::Identifier(identifier) => &identifier.location,
			Expression::Member { member, .. } => &member.location,
			Expression::Element { location, .. } => location,
			Expression::Call { location, .. } => location,
			Expression::Binary { location, .. } => location,
			Expression::Unary { location, .. } => location,
			Expression::Ternary { location, .. } => location,
			Expression::Parenthesized { location, .. } => location,
			Expression::ArrayLiteral { location, .. } => location,
			Expression::StructLiteral { location, .. } => location,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal
{
	Bool(bool),
	Float(String),
	String(String),
	Char(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp
{
	Add,
	Subtract,
	Multiply,
	Divide,
	Modulo,
	ShiftLeft,
	ShiftRight,
	BitwiseAnd,
	BitwiseOr,
	BitwiseXor,
	LogicalAnd,
	LogicalOr,
	Equals,
	DoesNotEqual,
	IsGreater,
	IsGE,
	IsLess,
	IsLE,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp
{
	Negative,
	BitwiseComplement,
	LogicalNot,
}
