//! Dice expression engine for tabletop-game companion apps.
//!
//! `fortuna` consolidates the dice logic those apps reimplement per
//! platform: parsing dice notation (`3d6+2d4-1d8+5`, `4d6k3`, `2d20` with
//! advantage), rolling under modifiers (exploding, advantage/disadvantage,
//! keep-N), aggregating multi-line totals, and deriving history and
//! statistics. Persistence, rendering, and transport stay outside; their
//! only contract with this crate is accepting a [`RollResult`]/[`DiceLine`].
//!
//! ```
//! use fortuna::{dice::roller::FastRand, line, parse::parse};
//!
//! let mut rng = FastRand::default();
//! let mut lines = parse("3d6+2d4-1d8+5")?;
//! for line in &mut lines {
//! 	line.roll_in_place(&mut rng);
//! }
//! let total = line::combine(&lines);
//! assert!(total >= 0);
//! # Ok::<(), fortuna::Error>(())
//! ```
//!
//! Rolls consume entropy from a caller-supplied [`dice::Roller`], so tests
//! and replay tooling can substitute deterministic sources, and concurrent
//! callers each own their RNG state instead of sharing a global one.

#![deny(macro_use_extern_crate, meta_variable_misuse, unit_bindings)]
#![warn(
	explicit_outlives_requirements,
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_qualifications,
	clippy::clone_on_ref_ptr,
	clippy::dbg_macro,
	clippy::expect_used,
	clippy::if_then_some_else_none,
	clippy::infinite_loop,
	clippy::map_err_ignore,
	clippy::panic_in_result_fn,
	clippy::redundant_type_annotations,
	clippy::str_to_string,
	clippy::unwrap_in_result,
	clippy::unwrap_used
)]

pub mod contract;
pub mod dice;
pub mod error;
pub mod history;
pub mod line;
#[cfg(feature = "parse")]
pub mod parse;
pub mod stats;

pub use dice::Dice;
pub use error::Error;
pub use history::History;
pub use line::{DiceLine, RollResult};

#[cfg(test)]
mod tests;
