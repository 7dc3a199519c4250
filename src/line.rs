//! Roll lines: the named, user-editable roll configurations that the engine
//! evaluates, the results they produce, and aggregation across several lines.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dice::{roller::Roller, Dice, EXPLOSION_LIMIT};

/// How a line's total contributes to a combined multi-line total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::exhaustive_enums)]
pub enum Operation {
	/// The line's total is added to the combined total.
	#[default]
	Add,

	/// The line's roll sum is negated before its modifier is applied once
	/// (single-negation semantics).
	Subtract,
}

/// Keep-N rule for a multi-die group: sum only the N highest or lowest dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::exhaustive_enums)]
pub enum Keep {
	/// Keep the N highest dice (`4d6k3`).
	Highest(u8),

	/// Keep the N lowest dice (`4d6kl3`).
	Lowest(u8),
}

impl Keep {
	/// Number of dice the rule retains.
	#[must_use]
	pub const fn n(&self) -> u8 {
		match self {
			Self::Highest(n) | Self::Lowest(n) => *n,
		}
	}
}

impl fmt::Display for Keep {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Highest(n) => write!(f, "k{n}"),
			Self::Lowest(n) => write!(f, "kl{n}"),
		}
	}
}

/// The result of evaluating a single [`DiceLine`].
///
/// Invariant: for a standard roll, `total` equals the sum of the kept
/// individual rolls plus `modifier`. For advantage/disadvantage,
/// `individual_rolls` holds both candidate rolls and `total` reflects only
/// the selected one plus `modifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RollResult {
	/// Every die face value produced while evaluating the line, in roll
	/// order, including exploded dice and both advantage candidates
	pub individual_rolls: Vec<u16>,

	/// Final total: selected/kept roll sum plus the flat modifier
	pub total: i32,

	/// Flat modifier that was applied to the roll sum
	pub modifier: i32,

	/// Whether the roll was made with advantage
	pub advantage: bool,

	/// Whether the roll was made with disadvantage
	pub disadvantage: bool,

	/// Whether maximum faces triggered additional rolls
	pub exploding: bool,

	/// Any counted d20 face showed a natural 20
	pub critical_success: bool,

	/// Any counted d20 face showed a natural 1
	pub critical_failure: bool,

	/// When the roll was made
	pub timestamp: DateTime<Utc>,
}

impl RollResult {
	/// The portion of the total contributed by dice alone.
	#[must_use]
	pub const fn roll_sum(&self) -> i32 {
		self.total - self.modifier
	}
}

impl fmt::Display for RollResult {
	/// Formats as the list of individual rolls, the signed modifier if any,
	/// and the total, e.g. `[3, 5] + 2 = 10`.
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{:?}{} = {}",
			self.individual_rolls,
			match self.modifier {
				0 => String::new(),
				m if m > 0 => format!(" + {m}"),
				m => format!(" - {}", -m),
			},
			self.total
		)
	}
}

/// A named, user-editable roll configuration.
///
/// Lines are created by the caller (UI state or request scope) with 1d20
/// defaults, mutated through edits, and rolled in place. They live only as
/// long as their session unless a result is explicitly committed to a
/// [`History`](crate::history::History).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceLine {
	/// Unique id for UI bookkeeping
	pub id: Uuid,

	/// Display label ("Attack", "Fireball", ...)
	pub label: String,

	/// The dice group this line rolls
	pub dice: Dice,

	/// Flat modifier added to the roll sum
	pub modifier: i32,

	/// Advantage flag; mutually exclusive with disadvantage
	advantage: bool,

	/// Disadvantage flag; mutually exclusive with advantage
	disadvantage: bool,

	/// Whether maximum faces chain into additional rolls
	pub exploding: bool,

	/// Keep-N rule, if any
	pub keep: Option<Keep>,

	/// How this line contributes to a combined total
	pub operation: Operation,

	/// Result of the most recent roll of this line, if any
	pub result: Option<RollResult>,
}

impl DiceLine {
	/// Creates a line for the given dice with no modifiers and an empty label.
	#[must_use]
	pub fn new(dice: Dice) -> Self {
		Self {
			id: Uuid::new_v4(),
			label: String::new(),
			dice,
			modifier: 0,
			advantage: false,
			disadvantage: false,
			exploding: false,
			keep: None,
			operation: Operation::Add,
			result: None,
		}
	}

	/// Whether the line rolls with advantage.
	#[must_use]
	#[inline]
	pub const fn advantage(&self) -> bool {
		self.advantage
	}

	/// Whether the line rolls with disadvantage.
	#[must_use]
	#[inline]
	pub const fn disadvantage(&self) -> bool {
		self.disadvantage
	}

	/// Sets the advantage flag. Enabling it clears disadvantage.
	pub fn set_advantage(&mut self, on: bool) {
		self.advantage = on;
		if on {
			self.disadvantage = false;
		}
	}

	/// Sets the disadvantage flag. Enabling it clears advantage.
	pub fn set_disadvantage(&mut self, on: bool) {
		self.disadvantage = on;
		if on {
			self.advantage = false;
		}
	}

	/// Evaluates the line against a roller, producing a result without
	/// mutating the line.
	///
	/// The evaluation is pure given a deterministic roller; its only side
	/// effect is consuming entropy.
	///
	/// # Panics
	/// Panics if the line violates the caller contract: advantage or
	/// disadvantage with more than one die, or a keep rule that retains
	/// zero dice or more dice than were rolled. User input is validated at
	/// the parser boundary before it can reach here.
	#[must_use]
	pub fn roll(&self, rng: &mut impl Roller) -> RollResult {
		if self.advantage || self.disadvantage {
			return self.roll_candidates(rng);
		}

		let mut rolls = rng.roll_pool(&self.dice);
		if self.exploding {
			self.explode_into(&mut rolls, rng);
		}

		let roll_sum: i32 = match self.keep {
			Some(keep) => {
				let n = keep.n() as usize;
				assert!(
					n >= 1 && n <= rolls.len(),
					"keep rule must retain between 1 and {} dice",
					rolls.len()
				);
				let mut sorted = rolls.clone();
				match keep {
					Keep::Highest(..) => sorted.sort_unstable_by(|a, b| b.cmp(a)),
					Keep::Lowest(..) => sorted.sort_unstable(),
				}
				sorted.iter().take(n).map(|&val| i32::from(val)).sum()
			}
			None => rolls.iter().map(|&val| i32::from(val)).sum(),
		};

		let total = roll_sum.saturating_add(self.modifier);
		let critical_success = self.dice.is_d20() && rolls.contains(&20);
		let critical_failure = self.dice.is_d20() && rolls.contains(&1);
		tracing::trace!(line = %self, total, rolls = rolls.len(), "rolled line");

		RollResult {
			individual_rolls: rolls,
			total,
			modifier: self.modifier,
			advantage: false,
			disadvantage: false,
			exploding: self.exploding,
			critical_success,
			critical_failure,
			timestamp: Utc::now(),
		}
	}

	/// Evaluates the line and stores the result on it.
	pub fn roll_in_place(&mut self, rng: &mut impl Roller) -> &RollResult {
		let result = self.roll(rng);
		self.result.insert(result)
	}

	/// Advantage/disadvantage path: two independent candidate rolls of a
	/// single die, keeping the higher or lower one. Candidates never explode.
	fn roll_candidates(&self, rng: &mut impl Roller) -> RollResult {
		assert_eq!(
			self.dice.count, 1,
			"advantage and disadvantage apply to single-die rolls only"
		);

		let first = rng.roll_die(self.dice.sides);
		let second = rng.roll_die(self.dice.sides);
		let selected = if self.advantage {
			first.max(second)
		} else {
			first.min(second)
		};

		let total = i32::from(selected).saturating_add(self.modifier);
		tracing::trace!(line = %self, first, second, selected, "rolled candidates");

		RollResult {
			individual_rolls: vec![first, second],
			total,
			modifier: self.modifier,
			advantage: self.advantage,
			disadvantage: self.disadvantage,
			exploding: false,
			critical_success: self.dice.is_d20() && selected == 20,
			critical_failure: self.dice.is_d20() && selected == 1,
			timestamp: Utc::now(),
		}
	}

	/// Appends a new die for every rolled maximum, chaining while the newly
	/// rolled die also shows maximum. Iterative rather than recursive; each
	/// original die carries its own budget of [`EXPLOSION_LIMIT`] extra dice,
	/// so one hot die cannot consume another die's allowance.
	fn explode_into(&self, rolls: &mut Vec<u16>, rng: &mut impl Roller) {
		let original = rolls.len();
		for die in 0..original {
			let mut face = rolls[die];
			let mut budget = EXPLOSION_LIMIT;
			while face == self.dice.sides && budget > 0 {
				face = rng.roll_die(self.dice.sides);
				rolls.push(face);
				budget -= 1;
			}
		}
	}
}

impl Default for DiceLine {
	/// Creates the default line: a plain 1d20 with no modifiers.
	fn default() -> Self {
		Self::new(Dice::default())
	}
}

impl fmt::Display for DiceLine {
	/// Formats the line back to notation: `{count}d{sides}[kN|klN][+/-mod]`.
	/// Re-parsing the output yields an equivalent line (ignoring id/label).
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.dice)?;
		if let Some(keep) = self.keep {
			write!(f, "{keep}")?;
		}
		match self.modifier {
			0 => Ok(()),
			m if m > 0 => write!(f, "+{m}"),
			m => write!(f, "{m}"),
		}
	}
}

/// Combines the results of multiple lines into one total.
///
/// Each rolled line contributes its roll sum, negated when its operation is
/// [`Operation::Subtract`], with its modifier applied exactly once. Lines
/// that have not been rolled are skipped. The combined total is clamped to
/// zero from below, since the quantities displayed (damage and the like)
/// should not go negative.
#[must_use]
pub fn combine(lines: &[DiceLine]) -> i32 {
	let sum = lines
		.iter()
		.filter_map(|line| line.result.as_ref().map(|result| (line.operation, result)))
		.map(|(operation, result)| {
			let sign = match operation {
				Operation::Add => 1,
				Operation::Subtract => -1,
			};
			(sign * result.roll_sum()).saturating_add(result.modifier)
		})
		.fold(0i32, i32::saturating_add);
	sum.max(0)
}
