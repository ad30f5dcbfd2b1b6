//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

//! The lexer turns source text into located tokens.
//! Lexical errors are kept in the token stream so that the parser can report
//! them with the expectation it had at that point.

use thiserror::Error;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token
{
	// Single-character tokens.
	ParenLeft,
	ParenRight,
	BraceLeft,
	BraceRight,
	BracketLeft,
	BracketRight,
	AngleLeft,
	AngleRight,
	Comma,
	Semicolon,
	Colon,
	Dot,
	At,
	Plus,
	Minus,
	Times,
	Divide,
	Modulo,
	Ampersand,
	Pipe,
	Caret,
	Tilde,
	Exclamation,
	Question,
	Equals, // =

	// Double-character tokens.
	Assignment, // <-
	ShiftLeft,
	ShiftRight,
	DoesNotEqual,
	IsLE,
	IsGE,
	LogicalAnd,
	LogicalOr,

	// Keywords.
	Const,
	Atomic,
	Volatile,
	Struct,
	Enum,
	Bitmap(u32),
	Register,
	Scope,
	Public,
	Private,

	// Literals.
	Identifier(String),
	Integer(IntegerLiteral),
	Float(String),
	Bool(bool),
	StringLiteral(String),
	CharLiteral(String),

	// Preprocessor lines, without the leading '#'.
	Directive(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral
{
	pub value: u64,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location
{
	pub source_filename: String,
	pub span: std::ops::Range<usize>,
	pub line_number: usize,
	pub line_offset: usize,
}

impl Location
{
	pub fn format(&self) -> String
	{
		format!(
			"at {}:{}:{}",
			self.source_filename, self.line_number, self.line_offset
		)
	}

	pub fn combined_with(&self, other: &Location) -> Location
	{
		if self.source_filename != other.source_filename
		{
			return self.clone();
		}
		let start = std::cmp::min(self.span.start, other.span.start);
		let end = std::cmp::max(self.span.end, other.span.end);
		Location {
			span: start..end,
			..self.clone()
		}
	}

	pub fn label(&self) -> ariadne::Label<(String, std::ops::Range<usize>)>
	{
		ariadne::Label::new((self.source_filename.clone(), self.span.clone()))
	}

	pub fn label_after_end(
		&self,
	) -> ariadne::Label<(String, std::ops::Range<usize>)>
	{
		let end = self.span.end;
		ariadne::Label::new((self.source_filename.clone(), end..end + 1))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedToken
{
	pub result: Result<Token, Error>,
	pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{
	#[error("unexpected character")]
	UnexpectedCharacter,
	#[error("invalid integer literal: {0}")]
	InvalidIntegerLiteral(#[from] std::num::ParseIntError),
	#[error("missing closing quote")]
	MissingClosingQuote,
	#[error("unterminated block comment")]
	UnterminatedComment,
}

pub fn lex(source: &str, source_filename: &str) -> Vec<LexedToken>
{
	let chars: Vec<char> = source.chars().collect();
	let mut tokens = Vec::new();
	let mut line_number = 1;
	let mut line_start = 0;
	let mut i = 0;

	while i < chars.len()
	{
		let start = i;
		let start_line_number = line_number;
		let start_line_offset = start - line_start + 1;
		let x = chars[i];
		i += 1;

		let result = match x
		{
			'\n' =>
			{
				line_number += 1;
				line_start = i;
				continue;
			}
			x if x.is_whitespace() => continue,
			'(' => Ok(Token::ParenLeft),
			')' => Ok(Token::ParenRight),
			'{' => Ok(Token::BraceLeft),
			'}' => Ok(Token::BraceRight),
			'[' => Ok(Token::BracketLeft),
			']' => Ok(Token::BracketRight),
			',' => Ok(Token::Comma),
			';' => Ok(Token::Semicolon),
			':' => Ok(Token::Colon),
			'.' => Ok(Token::Dot),
			'@' => Ok(Token::At),
			'+' => Ok(Token::Plus),
			'-' => Ok(Token::Minus),
			'*' => Ok(Token::Times),
			'%' => Ok(Token::Modulo),
			'^' => Ok(Token::Caret),
			'~' => Ok(Token::Tilde),
			'?' => Ok(Token::Question),
			'=' => Ok(Token::Equals),
			'&' => match chars.get(i)
			{
				Some('&') =>
				{
					i += 1;
					Ok(Token::LogicalAnd)
				}
				_ => Ok(Token::Ampersand),
			},
			'|' => match chars.get(i)
			{
				Some('|') =>
				{
					i += 1;
					Ok(Token::LogicalOr)
				}
				_ => Ok(Token::Pipe),
			},
			'!' => match chars.get(i)
			{
				Some('=') =>
				{
					i += 1;
					Ok(Token::DoesNotEqual)
				}
				_ => Ok(Token::Exclamation),
			},
			'<' => match chars.get(i)
			{
				Some('-') =>
				{
					i += 1;
					Ok(Token::Assignment)
				}
				Some('<') =>
				{
					i += 1;
					Ok(Token::ShiftLeft)
				}
				Some('=') =>
				{
					i += 1;
					Ok(Token::IsLE)
				}
				_ => Ok(Token::AngleLeft),
			},
			'>' => match chars.get(i)
			{
				Some('>') =>
				{
					i += 1;
					Ok(Token::ShiftRight)
				}
				Some('=') =>
				{
					i += 1;
					Ok(Token::IsGE)
				}
				_ => Ok(Token::AngleRight),
			},
			'/' => match chars.get(i)
			{
				Some('/') =>
				{
					while i < chars.len() && chars[i] != '\n'
					{
						i += 1;
					}
					continue;
				}
				Some('*') =>
				{
					i += 1;
					let mut is_terminated = false;
					while i < chars.len()
					{
						if chars[i] == '*' && chars.get(i + 1) == Some(&'/')
						{
							i += 2;
							is_terminated = true;
							break;
						}
						if chars[i] == '\n'
						{
							line_number += 1;
							line_start = i + 1;
						}
						i += 1;
					}
					if is_terminated
					{
						continue;
					}
					Err(Error::UnterminatedComment)
				}
				_ => Ok(Token::Divide),
			},
			'#' =>
			{
				let mut directive = String::new();
				while i < chars.len() && chars[i] != '\n'
				{
					directive.push(chars[i]);
					i += 1;
				}
				Ok(Token::Directive(directive.trim().to_string()))
			}
			'"' | '\'' =>
			{
				let quote = x;
				let mut contents = String::new();
				let mut is_closed = false;
				while i < chars.len() && chars[i] != '\n'
				{
					let y = chars[i];
					i += 1;
					if y == quote
					{
						is_closed = true;
						break;
					}
					contents.push(y);
					if y == '\\'
					{
						if let Some(&z) = chars.get(i)
						{
							contents.push(z);
							i += 1;
						}
					}
				}
				match (is_closed, quote)
				{
					(false, _) => Err(Error::MissingClosingQuote),
					(true, '"') => Ok(Token::StringLiteral(contents)),
					(true, _) => Ok(Token::CharLiteral(contents)),
				}
			}
			x if x.is_ascii_digit() =>
			{
				let mut literal = x.to_string();
				while i < chars.len()
					&& (chars[i].is_ascii_alphanumeric() || chars[i] == '_')
				{
					literal.push(chars[i]);
					i += 1;
				}
				let is_fractional = chars.get(i) == Some(&'.')
					&& chars.get(i + 1).map_or(false, |y| y.is_ascii_digit());
				if is_fractional
				{
					literal.push('.');
					i += 1;
					while i < chars.len()
						&& (chars[i].is_ascii_alphanumeric() || chars[i] == '_')
					{
						literal.push(chars[i]);
						i += 1;
					}
					Ok(Token::Float(literal))
				}
				else
				{
					lex_integer(literal)
				}
			}
			x if x.is_alphabetic() || x == '_' =>
			{
				let mut identifier = x.to_string();
				while i < chars.len()
					&& (chars[i].is_alphanumeric() || chars[i] == '_')
				{
					identifier.push(chars[i]);
					i += 1;
				}
				Ok(keyword_or_identifier(identifier))
			}
			_ => Err(Error::UnexpectedCharacter),
		};

		let location = Location {
			source_filename: source_filename.to_string(),
			span: start..i,
			line_number: start_line_number,
			line_offset: start_line_offset,
		};
		tokens.push(LexedToken { result, location });
	}

	tokens
}

fn lex_integer(literal: String) -> Result<Token, Error>
{
	let digits = literal.replace('_', "");
	let prefix = digits.get(0..2).map(|x| x.to_ascii_lowercase());
	let (digits, radix) = match prefix.as_deref()
	{
		Some("0x") => (&digits[2..], 16),
		Some("0b") => (&digits[2..], 2),
		_ => (&digits[..], 10),
	};
	let value = u64::from_str_radix(digits, radix)?;
	Ok(Token::Integer(IntegerLiteral {
		value,
		text: literal,
	}))
}

fn keyword_or_identifier(identifier: String) -> Token
{
	match identifier.as_str()
	{
		"const" => Token::Const,
		"atomic" => Token::Atomic,
		"volatile" => Token::Volatile,
		"struct" => Token::Struct,
		"enum" => Token::Enum,
		"bitmap8" => Token::Bitmap(8),
		"bitmap16" => Token::Bitmap(16),
		"bitmap24" => Token::Bitmap(24),
		"bitmap32" => Token::Bitmap(32),
		"register" => Token::Register,
		"scope" => Token::Scope,
		"public" => Token::Public,
		"private" => Token::Private,
		"true" => Token::Bool(true),
		"false" => Token::Bool(false),
		_ => Token::Identifier(identifier),
	}
}
