//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

pub use crate::lexer;
pub use crate::lexer::Location;

use ariadne::{Fmt, Report, ReportKind};

#[must_use]
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error
{
	#[error("unexpected end of file, {expectation}")]
	UnexpectedEndOfFile
	{
		last_location: Location,
		expectation: String,
	},
	#[error("{error}, {expectation}")]
	Lexical
	{
		error: lexer::Error,
		location: Location,
		expectation: String,
	},
	#[error("unexpected token, {expectation}")]
	UnexpectedToken
	{
		location: Location,
		expectation: String,
	},
	#[error(
		"bitmap '{name}' has fields totalling {actual} bits, \
		 but its backing type requires exactly {expected} bits"
	)]
	BitmapWidthMismatch
	{
		name: String,
		actual: u32,
		expected: u32,
		location: Location,
	},
}

impl Error
{
	pub fn code(&self) -> u16
	{
		match self
		{
			Error::UnexpectedEndOfFile { .. } => 100,
			Error::Lexical { .. } => 110,
			Error::UnexpectedToken { .. } => 300,
			Error::BitmapWidthMismatch { .. } => 420,
		}
	}

	pub fn location(&self) -> &Location
	{
		match self
		{
			Error::UnexpectedEndOfFile { last_location, .. } => last_location,
			Error::Lexical { location, .. } => location,
			Error::UnexpectedToken { location, .. } => location,
			Error::BitmapWidthMismatch { location, .. } => location,
		}
	}

	pub fn report(&self) -> Report<(String, std::ops::Range<usize>)>
	{
		self.build_report(ariadne::Config::default())
	}

	pub fn build_report(
		&self,
		config: ariadne::Config,
	) -> Report<(String, std::ops::Range<usize>)>
	{
		let mut colors = ariadne::ColorGenerator::new();
		let a = colors.next();
		let b = colors.next();

		let location = self.location();
		let report = Report::build(
			ReportKind::Error,
			&location.source_filename,
			location.span.start,
		)
		.with_code(format!("E{}", self.code()))
		.with_config(config);

		match self
		{
			Error::UnexpectedEndOfFile {
				expectation,
				last_location,
			} => report
				.with_message("Unexpected end of file")
				.with_label(
					last_location
						.label_after_end()
						.with_message(expectation)
						.with_order(1)
						.with_color(a),
				)
				.with_label(
					last_location
						.label()
						.with_message("Expected more after this.")
						.with_order(2)
						.with_color(b),
				)
				.finish(),

			Error::Lexical {
				error,
				expectation,
				location,
			} => report
				.with_message(format!("Lexical error: {}", error))
				.with_label(
					location
						.label()
						.with_message(expectation)
						.with_color(a),
				)
				.finish(),

			Error::UnexpectedToken {
				expectation,
				location,
			} => report
				.with_message("Unexpected token")
				.with_label(
					location
						.label()
						.with_message(expectation)
						.with_color(a),
				)
				.finish(),

			Error::BitmapWidthMismatch {
				name,
				actual,
				expected,
				location,
			} => report
				.with_message("Bitmap width mismatch")
				.with_label(
					location
						.label()
						.with_message(format!(
							"The fields of '{}' add up to {} bits.",
							name.fg(a),
							actual.fg(a)
						))
						.with_color(a),
				)
				.with_note(format!(
					"The backing type of this bitmap requires exactly {} \
					 bits; the default width of a field is 1.",
					expected.fg(b)
				))
				.finish(),
		}
	}
}
