//! Error types shared across the engine.

/// An error produced while parsing or validating a dice configuration.
///
/// Parse-time problems are recoverable and surfaced to the caller; they never
/// panic past the parser boundary. Roll-time caller contract violations
/// (such as an advantage roll on more than one die) are not represented here
/// and fail fast with an assertion instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The expression contained no recognizable dice or numeric tokens,
	/// or could not be parsed at all.
	#[error("invalid notation: {0}")]
	InvalidNotation(String),

	/// A dice group fell outside the allowed ranges for sides, count,
	/// or the aggregate dice-per-expression cap.
	#[error("dice out of range: {0}")]
	OutOfRangeDice(String),

	/// Modifiers were combined in a way that has no defined meaning,
	/// such as keep-N on a single die.
	#[error("incompatible modifiers: {0}")]
	IncompatibleModifiers(String),
}
