//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The parser takes lexed tokens and builds the declaration-level syntax tree.
//! Function bodies are skipped; only their signatures are retained.

use crate::common::*;
use crate::error::Error;
use crate::lexer::{LexedToken, Token};

use std::collections::VecDeque;

use enumset::EnumSet;

pub const MAX_EXPRESSION_DEPTH: usize = 127;

pub fn parse(tokens: Vec<LexedToken>) -> Result<Vec<Declaration>, Error>
{
	let mut tokens = Tokens::from(tokens);
	let mut declarations = Vec::new();
	while !tokens.is_empty()
	{
		if let Some(declaration) = parse_declaration(&mut tokens)?
		{
			declarations.push(declaration);
		}
	}
	Ok(declarations)
}

/// Parse tokens that form exactly one expression, such as a macro body.
pub fn parse_standalone_expression(
	tokens: Vec<LexedToken>,
) -> Result<Expression, Error>
{
	let mut tokens = Tokens::from(tokens);
	let expression = parse_expression(&mut tokens)?;
	match tokens.pop_front()
	{
		None => Ok(expression),
		Some(LexedToken { location, .. }) => Err(Error::UnexpectedToken {
			expectation: "expected end of expression".to_string(),
			location,
		}),
	}
}

struct Tokens
{
	tokens: VecDeque<LexedToken>,
	last_location: Location,
	depth: usize,
}

impl From<Vec<LexedToken>> for Tokens
{
	fn from(tokens: Vec<LexedToken>) -> Tokens
	{
		let last_location = match tokens.first()
		{
			Some(LexedToken {
				result: _,
				location,
			}) => location.clone(),
			None => Location {
				source_filename: String::new(),
				span: 0..0,
				line_number: 1,
				line_offset: 1,
			},
		};
		Tokens {
			tokens: VecDeque::from(tokens),
			last_location,
			depth: 0,
		}
	}
}

impl Tokens
{
	fn is_empty(&self) -> bool
	{
		self.tokens.is_empty()
	}

	fn pop_front(&mut self) -> Option<LexedToken>
	{
		let popped = self.tokens.pop_front();
		match &popped
		{
			Some(LexedToken {
				result: _,
				location,
			}) =>
			{
				self.last_location = location.clone();
			}
			None => (),
		}
		popped
	}

	fn start_location_span(&self) -> Option<Location>
	{
		match self.tokens.front()
		{
			Some(LexedToken {
				result: _,
				location,
			}) => Some(location.clone()),
			None => None,
		}
	}

	fn location_of_span(&self, start: Option<Location>) -> Location
	{
		match start
		{
			Some(location) => location.combined_with(&self.last_location),
			None => self.last_location.clone(),
		}
	}
}

fn peek(tokens: &mut Tokens) -> Option<&Token>
{
	match tokens.tokens.front()
	{
		Some(LexedToken {
			result: Ok(token),
			location: _,
		}) => Some(token),
		Some(LexedToken {
			result: Err(_),
			location: _,
		}) => None,
		None => None,
	}
}

fn consume(
	expected_token: Token,
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<(), Error>
{
	match tokens.pop_front()
	{
		Some(LexedToken {
			result: Ok(token),
			location: _,
		}) if token == expected_token => Ok(()),
		Some(LexedToken {
			result: Ok(_),
			location,
		}) => Err(Error::UnexpectedToken {
			expectation: expectation.to_string(),
			location,
		}),
		Some(LexedToken {
			result: Err(error),
			location,
		}) => Err(Error::Lexical {
			error,
			expectation: expectation.to_string(),
			location,
		}),
		None => Err(Error::UnexpectedEndOfFile {
			expectation: expectation.to_string(),
			last_location: tokens.last_location.clone(),
		}),
	}
}

fn extract_identifier(
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<Identifier, Error>
{
	match extract(expectation, tokens)?
	{
		(Token::Identifier(name), location) =>
		{
			Ok(Identifier { name, location })
		}
		(_, location) => Err(Error::UnexpectedToken {
			expectation: expectation.to_string(),
			location,
		}),
	}
}

fn extract(
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<(Token, Location), Error>
{
	match tokens.pop_front()
	{
		Some(LexedToken {
			result: Ok(token),
			location,
		}) => Ok((token, location)),
		Some(LexedToken {
			result: Err(error),
			location,
		}) => Err(Error::Lexical {
			error,
			expectation: expectation.to_string(),
			location,
		}),
		None => Err(Error::UnexpectedEndOfFile {
			expectation: expectation.to_string(),
			last_location: tokens.last_location.clone(),
		}),
	}
}

fn parse_declaration(tokens: &mut Tokens)
	-> Result<Option<Declaration>, Error>
{
	if let Some(Token::Directive(_)) = peek(tokens)
	{
		return match extract("expected directive", tokens)?
		{
			(Token::Directive(directive), location) =>
			{
				Ok(parse_directive(&directive, location))
			}
			_ => unreachable!(),
		};
	}

	let start = tokens.start_location_span();
	let mut flags = EnumSet::new();
	loop
	{
		let flag = match peek(tokens)
		{
			Some(Token::Public) => DeclarationFlag::Public,
			Some(Token::Private) => DeclarationFlag::Private,
			Some(Token::Const) => DeclarationFlag::Const,
			Some(Token::Atomic) => DeclarationFlag::Atomic,
			Some(Token::Volatile) => DeclarationFlag::Volatile,
			_ => break,
		};
		tokens.pop_front();
		flags.insert(flag);
	}

	let declaration = match peek(tokens)
	{
		Some(Token::Struct) =>
		{
			tokens.pop_front();
			parse_struct_declaration(flags, start, tokens)?
		}
		Some(Token::Enum) =>
		{
			tokens.pop_front();
			parse_enum_declaration(flags, start, tokens)?
		}
		Some(Token::Bitmap(bit_width)) =>
		{
			let bit_width = *bit_width;
			tokens.pop_front();
			parse_bitmap_declaration(bit_width, flags, start, tokens)?
		}
		Some(Token::Register) =>
		{
			tokens.pop_front();
			parse_register_declaration(flags, start, tokens)?
		}
		Some(Token::Scope) =>
		{
			tokens.pop_front();
			parse_scope_declaration(start, tokens)?
		}
		_ => parse_variable_or_function_declaration(flags, start, tokens)?,
	};
	Ok(Some(declaration))
}

/// Only include directives are retained; other preprocessor lines are left
/// for the C preprocessor.
fn parse_directive(directive: &str, location: Location) -> Option<Declaration>
{
	let rest = directive.strip_prefix("include")?.trim();
	let (path, is_system) = if let Some(quoted) =
		rest.strip_prefix('"').and_then(|x| x.strip_suffix('"'))
	{
		(quoted, false)
	}
	else if let Some(angled) =
		rest.strip_prefix('<').and_then(|x| x.strip_suffix('>'))
	{
		(angled, true)
	}
	else
	{
		return None;
	};
	Some(Declaration::Include {
		path: path.to_string(),
		is_system,
		location,
	})
}

fn parse_struct_declaration(
	flags: EnumSet<DeclarationFlag>,
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let name = extract_identifier("expected structure name", tokens)?;
	consume(Token::BraceLeft, "expected left brace", tokens)?;

	let mut members = Vec::new();
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			break;
		}
		members.push(parse_member(tokens)?);
	}

	consume(Token::BraceRight, "expected right brace", tokens)?;
	Ok(Declaration::Structure(StructDeclaration {
		name,
		members,
		flags,
		location: tokens.location_of_span(start),
	}))
}

fn parse_member(tokens: &mut Tokens) -> Result<Member, Error>
{
	let flags = parse_const_flag(tokens);
	let value_type = parse_type(tokens)?;
	let name = extract_identifier("expected member name", tokens)?;
	let dimensions = parse_array_suffixes(tokens)?;
	consume(Token::Semicolon, "expected semicolon", tokens)?;
	Ok(Member {
		name,
		value_type,
		dimensions,
		flags,
	})
}

fn parse_enum_declaration(
	flags: EnumSet<DeclarationFlag>,
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let name = extract_identifier("expected enum name", tokens)?;
	let backing_type = if let Some(Token::Colon) = peek(tokens)
	{
		tokens.pop_front();
		Some(parse_type(tokens)?)
	}
	else
	{
		None
	};
	consume(Token::BraceLeft, "expected left brace", tokens)?;

	let mut variants = Vec::new();
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			break;
		}

		let variant_name = extract_identifier("expected variant name", tokens)?;
		let value = if let Some(Token::Assignment) = peek(tokens)
		{
			tokens.pop_front();
			Some(parse_expression(tokens)?)
		}
		else
		{
			None
		};
		variants.push(Variant {
			name: variant_name,
			value,
		});

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			// Break now, we will try to consume a right brace
			// which will create an error.
			break;
		}
	}

	consume(Token::BraceRight, "expected right brace", tokens)?;
	Ok(Declaration::Enumeration(EnumDeclaration {
		name,
		backing_type,
		variants,
		flags,
		location: tokens.location_of_span(start),
	}))
}

fn parse_bitmap_declaration(
	bit_width: u32,
	flags: EnumSet<DeclarationFlag>,
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let name = extract_identifier("expected bitmap name", tokens)?;
	consume(Token::BraceLeft, "expected left brace", tokens)?;

	let mut fields = Vec::new();
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			break;
		}

		let field_name = extract_identifier("expected field name", tokens)?;
		let width = if let Some(Token::BracketLeft) = peek(tokens)
		{
			tokens.pop_front();
			let width = parse_expression(tokens)?;
			consume(Token::BracketRight, "expected right bracket", tokens)?;
			Some(width)
		}
		else
		{
			None
		};
		fields.push(BitmapField {
			name: field_name,
			width,
		});

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			break;
		}
	}

	consume(Token::BraceRight, "expected right brace", tokens)?;
	Ok(Declaration::Bitmap(BitmapDeclaration {
		name,
		bit_width,
		fields,
		flags,
		location: tokens.location_of_span(start),
	}))
}

fn parse_register_declaration(
	flags: EnumSet<DeclarationFlag>,
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let name = extract_identifier("expected register name", tokens)?;
	consume(Token::At, "expected '@' followed by base address", tokens)?;
	let address = parse_expression(tokens)?;
	consume(Token::BraceLeft, "expected left brace", tokens)?;

	let mut members = Vec::new();
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			break;
		}

		members.push(parse_register_member(tokens)?);

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			break;
		}
	}

	consume(Token::BraceRight, "expected right brace", tokens)?;
	Ok(Declaration::Register(RegisterDeclaration {
		name,
		address,
		members,
		flags,
		location: tokens.location_of_span(start),
	}))
}

fn parse_register_member(tokens: &mut Tokens) -> Result<RegisterMember, Error>
{
	let name = extract_identifier("expected register member name", tokens)?;
	consume(Token::Colon, "expected colon", tokens)?;
	let value_type = parse_type(tokens)?;
	let access = extract_identifier("expected access mode", tokens)?;
	let access = match access.name.parse::<AccessMode>()
	{
		Ok(access) => access,
		Err(_) =>
		{
			return Err(Error::UnexpectedToken {
				location: access.location,
				expectation: "expected one of rw, ro, wo, w1c or w1s"
					.to_string(),
			})
		}
	};
	consume(Token::At, "expected '@' followed by offset", tokens)?;
	let offset = parse_expression(tokens)?;
	Ok(RegisterMember {
		name,
		value_type,
		access,
		offset,
	})
}

fn parse_scope_declaration(
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let name = extract_identifier("expected scope name", tokens)?;
	consume(Token::BraceLeft, "expected left brace", tokens)?;

	let mut members = Vec::new();
	loop
	{
		match peek(tokens)
		{
			Some(Token::BraceRight) => break,
			Some(Token::Scope) =>
			{
				return Err(Error::UnexpectedToken {
					location: tokens
						.start_location_span()
						.unwrap_or_else(|| tokens.last_location.clone()),
					expectation: "scopes cannot be nested".to_string(),
				});
			}
			Some(_) => (),
			None => break,
		}
		if let Some(member) = parse_declaration(tokens)?
		{
			members.push(member);
		}
	}

	consume(Token::BraceRight, "expected right brace", tokens)?;
	Ok(Declaration::Scope(ScopeDeclaration {
		name,
		members,
		location: tokens.location_of_span(start),
	}))
}

fn parse_variable_or_function_declaration(
	flags: EnumSet<DeclarationFlag>,
	start: Option<Location>,
	tokens: &mut Tokens,
) -> Result<Declaration, Error>
{
	let value_type = parse_type(tokens)?;
	let name = extract_identifier("expected name", tokens)?;

	if let Some(Token::ParenLeft) = peek(tokens)
	{
		tokens.pop_front();
		let parameters = parse_parameters(tokens)?;
		let has_body = match peek(tokens)
		{
			Some(Token::Semicolon) =>
			{
				tokens.pop_front();
				false
			}
			_ =>
			{
				skip_function_body(tokens)?;
				true
			}
		};
		return Ok(Declaration::Function(FunctionDeclaration {
			name,
			return_type: value_type,
			parameters,
			has_body,
			flags,
			location: tokens.location_of_span(start),
		}));
	}

	let dimensions = parse_array_suffixes(tokens)?;
	let value = if let Some(Token::Assignment) = peek(tokens)
	{
		tokens.pop_front();
		Some(parse_expression(tokens)?)
	}
	else
	{
		None
	};
	consume(Token::Semicolon, "expected semicolon", tokens)?;
	Ok(Declaration::Variable(VariableDeclaration {
		name,
		value_type,
		dimensions,
		value,
		flags,
		location: tokens.location_of_span(start),
	}))
}

fn parse_parameters(tokens: &mut Tokens) -> Result<Vec<Parameter>, Error>
{
	let mut parameters = Vec::new();
	loop
	{
		if let Some(Token::ParenRight) = peek(tokens)
		{
			break;
		}

		let flags = parse_const_flag(tokens);
		let value_type = parse_type(tokens)?;
		let name = extract_identifier("expected parameter name", tokens)?;
		let dimensions = parse_array_suffixes(tokens)?;
		parameters.push(Parameter {
			name,
			value_type,
			dimensions,
			flags,
		});

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			// Break now, we will try to consume a right parenthesis
			// which will create an error.
			break;
		}
	}
	consume(Token::ParenRight, "expected right parenthesis", tokens)?;
	Ok(parameters)
}

fn skip_function_body(tokens: &mut Tokens) -> Result<(), Error>
{
	consume(Token::BraceLeft, "expected function body", tokens)?;
	let mut depth = 1;
	while depth > 0
	{
		match extract("expected right brace", tokens)?
		{
			(Token::BraceLeft, _) => depth += 1,
			(Token::BraceRight, _) => depth -= 1,
			_ => (),
		}
	}
	Ok(())
}

fn parse_const_flag(tokens: &mut Tokens) -> EnumSet<DeclarationFlag>
{
	let mut flags = EnumSet::new();
	if let Some(Token::Const) = peek(tokens)
	{
		tokens.pop_front();
		flags.insert(DeclarationFlag::Const);
	}
	flags
}

fn parse_type(tokens: &mut Tokens) -> Result<TypeName, Error>
{
	let start = tokens.start_location_span();
	let first = extract_identifier("expected type", tokens)?;
	let mut name = first.name;
	while let Some(Token::Dot) = peek(tokens)
	{
		tokens.pop_front();
		let part = extract_identifier("expected type name after dot", tokens)?;
		name.push('_');
		name.push_str(&part.name);
	}
	if let Some(Token::AngleLeft) = peek(tokens)
	{
		tokens.pop_front();
		match extract("expected capacity", tokens)?
		{
			(Token::Integer(literal), _) =>
			{
				name = format!("{}<{}>", name, literal.text);
			}
			(_, location) =>
			{
				return Err(Error::UnexpectedToken {
					location,
					expectation: "expected capacity".to_string(),
				})
			}
		}
		consume(Token::AngleRight, "expected right angle bracket", tokens)?;
	}
	Ok(TypeName {
		name,
		location: tokens.location_of_span(start),
	})
}

fn parse_array_suffixes(tokens: &mut Tokens)
	-> Result<Vec<ArraySuffix>, Error>
{
	let mut suffixes = Vec::new();
	while let Some(Token::BracketLeft) = peek(tokens)
	{
		tokens.pop_front();
		if let Some(Token::BracketRight) = peek(tokens)
		{
			tokens.pop_front();
			suffixes.push(None);
			continue;
		}
		let size = parse_expression(tokens)?;
		consume(Token::BracketRight, "expected right bracket", tokens)?;
		suffixes.push(Some(size));
	}
	Ok(suffixes)
}

fn parse_expression(tokens: &mut Tokens) -> Result<Expression, Error>
{
	if tokens.depth >= MAX_EXPRESSION_DEPTH
	{
		return Err(Error::UnexpectedToken {
			location: tokens.last_location.clone(),
			expectation: "expression is too deeply nested".to_string(),
		});
	}
	tokens.depth += 1;
	let result = parse_ternary(tokens);
	tokens.depth -= 1;
	result
}

fn parse_ternary(tokens: &mut Tokens) -> Result<Expression, Error>
{
	let start = tokens.start_location_span();
	let condition = parse_binary(0, tokens)?;
	if let Some(Token::Question) = peek(tokens)
	{
		tokens.pop_front();
		let then_value = parse_expression(tokens)?;
		consume(Token::Colon, "expected colon", tokens)?;
		let else_value = parse_expression(tokens)?;
		Ok(Expression::Ternary {
			condition: Box::new(condition),
			then_value: Box::new(then_value),
			else_value: Box::new(else_value),
			location: tokens.location_of_span(start),
		})
	}
	else
	{
		Ok(condition)
	}
}

const BINARY_PRECEDENCE: &[&[(Token, BinaryOp)]] = &[
	&[(Token::LogicalOr, BinaryOp::LogicalOr)],
	&[(Token::LogicalAnd, BinaryOp::LogicalAnd)],
	&[(Token::Pipe, BinaryOp::BitwiseOr)],
	&[(Token::Caret, BinaryOp::BitwiseXor)],
	&[(Token::Ampersand, BinaryOp::BitwiseAnd)],
	&[
		(Token::Equals, BinaryOp::Equals),
		(Token::DoesNotEqual, BinaryOp::DoesNotEqual),
	],
	&[
		(Token::AngleLeft, BinaryOp::IsLess),
		(Token::AngleRight, BinaryOp::IsGreater),
		(Token::IsLE, BinaryOp::IsLE),
		(Token::IsGE, BinaryOp::IsGE),
	],
	&[
		(Token::ShiftLeft, BinaryOp::ShiftLeft),
		(Token::ShiftRight, BinaryOp::ShiftRight),
	],
	&[
		(Token::Plus, BinaryOp::Add),
		(Token::Minus, BinaryOp::Subtract),
	],
	&[
		(Token::Times, BinaryOp::Multiply),
		(Token::Divide, BinaryOp::Divide),
		(Token::Modulo, BinaryOp::Modulo),
	],
];

fn parse_binary(level: usize, tokens: &mut Tokens)
	-> Result<Expression, Error>
{
	let operators = match BINARY_PRECEDENCE.get(level)
	{
		Some(operators) => operators,
		None => return parse_unary(tokens),
	};

	let start = tokens.start_location_span();
	let mut expression = parse_binary(level + 1, tokens)?;
	loop
	{
		let op = match peek(tokens)
		{
			Some(token) => operators
				.iter()
				.find(|(x, _)| x == token)
				.map(|(_, op)| *op),
			None => None,
		};
		let op = match op
		{
			Some(op) => op,
			None => break,
		};
		tokens.pop_front();
		let right = parse_binary(level + 1, tokens)?;
		expression = Expression::Binary {
			op,
			left: Box::new(expression),
			right: Box::new(right),
			location: tokens.location_of_span(start.clone()),
		};
	}
	Ok(expression)
}

fn parse_unary(tokens: &mut Tokens) -> Result<Expression, Error>
{
	let start = tokens.start_location_span();
	let op = match peek(tokens)
	{
		Some(Token::Minus) => Some(UnaryOp::Negative),
		Some(Token::Tilde) => Some(UnaryOp::BitwiseComplement),
		Some(Token::Exclamation) => Some(UnaryOp::LogicalNot),
		_ => None,
	};
	match op
	{
		Some(op) =>
		{
			tokens.pop_front();
			let expression = parse_unary(tokens)?;
			Ok(Expression::Unary {
				op,
				expression: Box::new(expression),
				location: tokens.location_of_span(start),
			})
		}
		None => parse_postfix(tokens),
	}
}

fn parse_postfix(tokens: &mut Tokens) -> Result<Expression, Error>
{
	let start = tokens.start_location_span();
	let mut expression = parse_primary(tokens)?;
	loop
	{
		match peek(tokens)
		{
			Some(Token::Dot) =>
			{
				tokens.pop_front();
				let member =
					extract_identifier("expected member name", tokens)?;
				expression = Expression::Member {
					base: Box::new(expression),
					member,
				};
			}
			Some(Token::BracketLeft) =>
			{
				tokens.pop_front();
				let index = parse_expression(tokens)?;
				consume(Token::BracketRight, "expected right bracket", tokens)?;
				expression = Expression::Element {
					base: Box::new(expression),
					index: Box::new(index),
					location: tokens.location_of_span(start.clone()),
				};
			}
			Some(Token::ParenLeft) =>
			{
				tokens.pop_front();
				let mut arguments = Vec::new();
				loop
				{
					if let Some(Token::ParenRight) = peek(tokens)
					{
						break;
					}
					arguments.push(parse_expression(tokens)?);
					if let Some(Token::Comma) = peek(tokens)
					{
						tokens.pop_front();
					}
					else
					{
						break;
					}
				}
				consume(
					Token::ParenRight,
					"expected right parenthesis",
					tokens,
				)?;
				expression = Expression::Call {
					callee: Box::new(expression),
					arguments,
					location: tokens.location_of_span(start.clone()),
				};
			}
			_ => return Ok(expression),
		}
	}
}

fn parse_primary(tokens: &mut Tokens) -> Result<Expression, Error>
{
	let (token, location) = extract("expected expression", tokens)?;
	match token
	{
		Token::Integer(literal) =>
		{
			Ok(Expression::Integer { literal, location })
		}
		Token::Float(text) => Ok(Expression::Literal {
			literal: Literal::Float(text),
			location,
		}),
		Token::Bool(value) => Ok(Expression::Literal {
			literal: Literal::Bool(value),
			location,
		}),
		Token::StringLiteral(text) => Ok(Expression::Literal {
			literal: Literal::String(text),
			location,
		}),
		Token::CharLiteral(text) => Ok(Expression::Literal {
			literal: Literal::Char(text),
			location,
		}),
		Token::Identifier(name) =>
		{
			Ok(Expression::Identifier(Identifier { name, location }))
		}
		Token::ParenLeft =>
		{
			let inner = parse_expression(tokens)?;
			consume(Token::ParenRight, "expected right parenthesis", tokens)?;
			Ok(Expression::Parenthesized {
				inner: Box::new(inner),
				location: location.combined_with(&tokens.last_location),
			})
		}
		Token::BracketLeft =>
		{
			let mut elements = Vec::new();
			loop
			{
				if let Some(Token::BracketRight) = peek(tokens)
				{
					break;
				}
				elements.push(parse_expression(tokens)?);
				if let Some(Token::Comma) = peek(tokens)
				{
					tokens.pop_front();
				}
				else
				{
					break;
				}
			}
			consume(Token::BracketRight, "expected right bracket", tokens)?;
			Ok(Expression::ArrayLiteral {
				elements,
				location: location.combined_with(&tokens.last_location),
			})
		}
		Token::BraceLeft =>
		{
			let mut members = Vec::new();
			loop
			{
				if let Some(Token::BraceRight) = peek(tokens)
				{
					break;
				}
				let name = extract_identifier("expected member name", tokens)?;
				consume(Token::Colon, "expected colon", tokens)?;
				let value = parse_expression(tokens)?;
				members.push((name, value));
				if let Some(Token::Comma) = peek(tokens)
				{
					tokens.pop_front();
				}
				else
				{
					break;
				}
			}
			consume(Token::BraceRight, "expected right brace", tokens)?;
			Ok(Expression::StructLiteral {
				members,
				location: location.combined_with(&tokens.last_location),
			})
		}
		_ => Err(Error::UnexpectedToken {
			location,
			expectation: "expected expression".to_string(),
		}),
	}
}
