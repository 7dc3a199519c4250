#![cfg(feature = "parse")]

//! Notation parsing: turns textual dice expressions like `3d6+2d4-1d8+5` or
//! `4d6k3` into ordered [`DiceLine`]s.
//!
//! The grammar is a sequence of signed terms. A dice term becomes one line
//! whose operation is derived from its sign; a flat number folds into the
//! modifier of the line immediately preceding it in token order, so
//! `2d6+3` is a single line with modifier `+3` rather than two terms.

use chumsky::prelude::*;

use crate::{
	dice::{Dice, DEFAULT_SIDES, MAX_COUNT, MAX_TOTAL_DICE},
	error::Error,
	line::{DiceLine, Keep, Operation},
};

/// How the parser treats notation that the legacy apps tolerated.
///
/// The platforms this engine consolidates scanned expressions into signed
/// tokens and silently defaulted any count or sides substring that failed to
/// parse (missing or malformed alike, so `2d` and `2dabc` both read as
/// `2d20`). [`Leniency::Lenient`] preserves that behavior;
/// [`Leniency::Strict`] rejects such input instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::exhaustive_enums)]
pub enum Leniency {
	/// Missing or malformed counts and sides fall back to their defaults,
	/// 1 and d20 (legacy-compatible).
	#[default]
	Lenient,

	/// Missing or malformed dice sides are an [`Error::InvalidNotation`].
	Strict,
}

/// A term as scanned, before range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawTerm {
	/// Dice group; `sides` is `None` when the notation omitted them
	Dice {
		/// Scanned die count (default 1)
		count: u32,
		/// Scanned side count, if present
		sides: Option<u32>,
		/// Keep rule: `(highest, n)`
		keep: Option<(bool, u32)>,
	},
	/// Flat numeric bonus/penalty
	Num(i32),
}

/// Generates a parser for one dice term like `d20`, `2d6`, `4d6k3`, `3d6kl2`.
fn dice_part<'src>() -> impl Parser<'src, &'src str, RawTerm, extra::Err<Rich<'src, char>>> + Clone {
	let keep = choice((
		just("kl")
			.ignore_then(text::int(10).or_not())
			.try_map(|n: Option<&str>, span| {
				let n = n
					.unwrap_or("1")
					.parse()
					.map_err(|err| Rich::custom(span, format!("Keep lowest count: {err}")))?;
				Ok((false, n))
			}),
		just('k')
			.ignore_then(just('h').or_not())
			.ignore_then(text::int(10).or_not())
			.try_map(|n: Option<&str>, span| {
				let n = n
					.unwrap_or("1")
					.parse()
					.map_err(|err| Rich::custom(span, format!("Keep highest count: {err}")))?;
				Ok((true, n))
			}),
	));

	text::int(10)
		.or_not()
		.then_ignore(just('d'))
		.then(text::int::<&'src str, _, _>(10).or_not())
		.then(keep.or_not())
		.try_map(|((count, sides), keep), span| {
			let count = count
				.unwrap_or("1")
				.parse()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;
			let sides = sides
				.map(str::parse)
				.transpose()
				.map_err(|err| Rich::custom(span, format!("Dice sides: {err}")))?;
			Ok(RawTerm::Dice { count, sides, keep })
		})
}

/// Generates a parser for a full signed-term expression.
fn terms<'src>() -> impl Parser<'src, &'src str, Vec<(i32, RawTerm)>, extra::Err<Rich<'src, char>>> {
	let number = text::int(10).try_map(|s: &str, span| {
		s.parse()
			.map(RawTerm::Num)
			.map_err(|err| Rich::custom(span, format!("Number: {err}")))
	});

	let term = dice_part().or(number).padded();
	let sign = choice((just('+').to(1i32), just('-').to(-1i32))).padded();

	sign.clone()
		.or_not()
		.then(term.clone())
		.map(|(sign, term)| (sign.unwrap_or(1), term))
		.then(sign.then(term).repeated().collect::<Vec<_>>())
		.map(|(first, rest)| {
			let mut all = Vec::with_capacity(rest.len() + 1);
			all.push(first);
			all.extend(rest);
			all
		})
		.then_ignore(end())
}

/// Generates the tolerant lexer: signed runs of alphanumeric characters,
/// classified term-by-term afterwards by [`classify`].
fn lenient_terms<'src>() -> impl Parser<'src, &'src str, Vec<(i32, String)>, extra::Err<Rich<'src, char>>> {
	let token = any()
		.filter(|c: &char| c.is_ascii_alphanumeric())
		.repeated()
		.at_least(1)
		.collect::<String>()
		.padded();
	let sign = choice((just('+').to(1i32), just('-').to(-1i32))).padded();

	sign.clone()
		.or_not()
		.then(token.clone())
		.map(|(sign, token)| (sign.unwrap_or(1), token))
		.then(sign.then(token).repeated().collect::<Vec<_>>())
		.map(|(first, rest)| {
			let mut all = Vec::with_capacity(rest.len() + 1);
			all.push(first);
			all.extend(rest);
			all
		})
		.then_ignore(end())
}

/// Integer prefix of a token substring, with overflow saturated so range
/// validation still fires on absurd values. `None` when there is no digit
/// to consume.
fn leading_int(s: &str) -> Option<u32> {
	let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
	let digits = &s[..end];
	if digits.is_empty() {
		None
	} else {
		Some(digits.parse().unwrap_or(u32::MAX))
	}
}

/// Classifies one lenient token into a raw term.
///
/// Mirrors the legacy scanners: a token containing `d` splits there into
/// count and sides substrings, and a substring that fails to parse falls
/// back to its default (count 1, sides d20) instead of failing the whole
/// expression. A token without `d` must carry a leading number.
fn classify(token: &str) -> Result<RawTerm, Error> {
	let Some(split) = token.find('d') else {
		let value = leading_int(token)
			.ok_or_else(|| Error::InvalidNotation(format!("unrecognized term `{token}`")))?;
		let value = i32::try_from(value)
			.map_err(|_| Error::InvalidNotation(format!("number `{token}` is out of range")))?;
		return Ok(RawTerm::Num(value));
	};

	let count = leading_int(&token[..split]).unwrap_or(1);
	let rest = &token[split + 1..];

	let (sides_part, keep) = match rest.find('k') {
		Some(kpos) => {
			let keep_part = &rest[kpos + 1..];
			let (highest, n_part) = match keep_part.strip_prefix('l') {
				Some(n_part) => (false, n_part),
				None => (true, keep_part.strip_prefix('h').unwrap_or(keep_part)),
			};
			(&rest[..kpos], Some((highest, leading_int(n_part).unwrap_or(1))))
		}
		None => (rest, None),
	};

	Ok(RawTerm::Dice {
		count,
		sides: leading_int(sides_part),
		keep,
	})
}

/// Parses a dice expression into lines using lenient (legacy-compatible)
/// semantics.
///
/// # Errors
/// See [`parse_with`].
///
/// # Examples
/// ```
/// use fortuna::{line::Operation, parse::parse};
///
/// let lines = parse("3d6+2d4-1d8+5")?;
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[2].operation, Operation::Subtract);
/// assert_eq!(lines[2].modifier, 5);
/// # Ok::<(), fortuna::Error>(())
/// ```
pub fn parse(expression: &str) -> Result<Vec<DiceLine>, Error> {
	parse_with(expression, Leniency::Lenient)
}

/// Parses a dice expression into lines with an explicit leniency mode.
///
/// # Errors
/// - [`Error::InvalidNotation`] when nothing parseable is found, a flat
///   number precedes any dice term or overflows the modifier, or sides are
///   missing or malformed in strict mode.
/// - [`Error::OutOfRangeDice`] when sides, count, or the aggregate dice
///   count exceed the engine bounds.
/// - [`Error::IncompatibleModifiers`] when a keep rule retains zero dice,
///   more dice than rolled, or is applied to a single die.
pub fn parse_with(expression: &str, leniency: Leniency) -> Result<Vec<DiceLine>, Error> {
	let normalized = expression.trim().to_lowercase();
	if normalized.is_empty() {
		return Err(Error::InvalidNotation("empty expression".into()));
	}

	let raw = match leniency {
		Leniency::Strict => terms().parse(&normalized).into_result().map_err(notation_error)?,
		Leniency::Lenient => lenient_terms()
			.parse(&normalized)
			.into_result()
			.map_err(notation_error)?
			.into_iter()
			.map(|(sign, token)| Ok((sign, classify(&token)?)))
			.collect::<Result<Vec<_>, Error>>()?,
	};

	let lines = build_lines(raw, leniency)?;
	tracing::trace!(expression = %normalized, lines = lines.len(), "parsed dice expression");
	Ok(lines)
}

/// Joins parser diagnostics into one [`Error::InvalidNotation`].
fn notation_error(errs: Vec<Rich<'_, char>>) -> Error {
	Error::InvalidNotation(errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
}

/// Validates raw terms and folds them into lines.
fn build_lines(terms: Vec<(i32, RawTerm)>, leniency: Leniency) -> Result<Vec<DiceLine>, Error> {
	let mut lines: Vec<DiceLine> = Vec::new();
	let mut total_dice: u32 = 0;

	for (sign, term) in terms {
		match term {
			RawTerm::Dice { count, sides, keep } => {
				let sides = match (sides, leniency) {
					(Some(sides), _) => sides,
					(None, Leniency::Lenient) => u32::from(DEFAULT_SIDES),
					(None, Leniency::Strict) => {
						return Err(Error::InvalidNotation("dice sides missing".into()));
					}
				};

				if count == 0 || count > u32::from(MAX_COUNT) {
					return Err(Error::OutOfRangeDice(format!(
						"count must be within 1..={MAX_COUNT}, got {count}"
					)));
				}
				let sides = u16::try_from(sides).map_err(|_| {
					Error::OutOfRangeDice(format!("sides value {sides} is too large"))
				})?;
				#[allow(clippy::cast_possible_truncation)]
				let dice = Dice::new(count as u8, sides)?;

				let keep = keep
					.map(|(highest, n)| {
						if dice.count == 1 {
							return Err(Error::IncompatibleModifiers(
								"keep-N requires more than one die".into(),
							));
						}
						if n == 0 || n > u32::from(dice.count) {
							return Err(Error::IncompatibleModifiers(format!(
								"cannot keep {n} of {} dice",
								dice.count
							)));
						}
						Ok(if highest {
							Keep::Highest(n as u8)
						} else {
							Keep::Lowest(n as u8)
						})
					})
					.transpose()?;

				total_dice += u32::from(dice.count);

				let mut line = DiceLine::new(dice);
				line.keep = keep;
				line.operation = if sign < 0 { Operation::Subtract } else { Operation::Add };
				lines.push(line);
			}
			RawTerm::Num(value) => {
				let line = lines.last_mut().ok_or_else(|| {
					Error::InvalidNotation("flat modifier before any dice term".into())
				})?;
				line.modifier = value
					.checked_mul(sign)
					.and_then(|signed| line.modifier.checked_add(signed))
					.ok_or_else(|| {
						Error::InvalidNotation(format!("flat modifier {value} overflows the total"))
					})?;
			}
		}
	}

	if lines.is_empty() {
		return Err(Error::InvalidNotation("no dice terms recognized".into()));
	}
	if total_dice > MAX_TOTAL_DICE {
		return Err(Error::OutOfRangeDice(format!(
			"expression rolls {total_dice} dice, more than the {MAX_TOTAL_DICE} allowed"
		)));
	}

	Ok(lines)
}

impl core::str::FromStr for DiceLine {
	type Err = Error;

	/// Parses a single dice term; expressions with more than one line are
	/// rejected.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut lines = parse(s)?;
		if lines.len() != 1 {
			return Err(Error::InvalidNotation(format!(
				"expected a single dice term, got {}",
				lines.len()
			)));
		}
		Ok(lines.remove(0))
	}
}

impl core::str::FromStr for Dice {
	type Err = Error;

	/// Parses a bare dice group like `2d6`; keep rules and modifiers are
	/// rejected.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let line: DiceLine = s.parse()?;
		if line.keep.is_some() || line.modifier != 0 {
			return Err(Error::InvalidNotation(
				"expected a plain dice group without modifiers".into(),
			));
		}
		Ok(line.dice)
	}
}
