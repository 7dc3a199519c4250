//! Dice primitives: a validated dice group and the design constants that
//! bound every roll the engine performs.

pub mod roller;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use self::roller::Roller;
use crate::error::Error;

/// Smallest legal number of sides for a die.
pub const MIN_SIDES: u16 = 2;

/// Largest legal number of sides for a die.
pub const MAX_SIDES: u16 = 1000;

/// Largest legal number of dice in a single group.
pub const MAX_COUNT: u8 = 100;

/// Cap on the aggregate number of dice across all groups of one parsed
/// expression or one roll request.
pub const MAX_TOTAL_DICE: u32 = 200;

/// Hard cap on the number of additional dice an exploding roll may add per
/// original die. Chained explosions past this point are silently stopped;
/// the result is valid but deliberately incomplete. This is a termination
/// guarantee, not an error condition.
pub const EXPLOSION_LIMIT: usize = 100;

/// Number of sides a die defaults to when notation omits or mangles them and
/// the parser is running leniently.
pub const DEFAULT_SIDES: u16 = 20;

/// A set of one or more rollable dice with a specific number of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u8,

	/// Number of sides for each die
	pub sides: u16,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides,
	/// validating both against the engine's bounds.
	///
	/// # Errors
	/// Returns [`Error::OutOfRangeDice`] if `sides` is outside
	/// [`MIN_SIDES`]`..=`[`MAX_SIDES`] or `count` is outside `1..=`[`MAX_COUNT`].
	pub fn new(count: u8, sides: u16) -> Result<Self, Error> {
		if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
			return Err(Error::OutOfRangeDice(format!(
				"sides must be within {MIN_SIDES}..={MAX_SIDES}, got {sides}"
			)));
		}
		if count < 1 || count > MAX_COUNT {
			return Err(Error::OutOfRangeDice(format!(
				"count must be within 1..={MAX_COUNT}, got {count}"
			)));
		}
		Ok(Self { count, sides })
	}

	/// Indicates whether this group is twenty-sided, the only die type that
	/// carries critical-success/failure markers.
	#[must_use]
	#[inline]
	pub const fn is_d20(&self) -> bool {
		self.sides == 20
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self { count: 1, sides: 20 }
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}
