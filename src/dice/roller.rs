//! Abstractions for producing die face values from various entropy sources.
//!
//! Everything in the engine consumes `&mut impl Roller`, so callers can
//! substitute a deterministic roller for tests and each request scope can
//! own its own RNG state rather than sharing a global one.

use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::Dice;

/// Produces uniformly distributed die face values.
pub trait Roller {
	/// Rolls a single die, returning a value in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u16) -> u16;

	/// Rolls every die in a group once, with no modifiers applied.
	#[must_use]
	fn roll_pool(&mut self, dice: &Dice) -> Vec<u16>
	where
		Self: Sized,
	{
		let mut rolls = Vec::with_capacity(dice.count as usize);
		for _ in 0..dice.count {
			rolls.push(self.roll_die(dice.sides));
		}
		rolls
	}
}

/// Generates rolls with random values using [fastrand]. Requires the
/// `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use fortuna::dice::{roller::FastRand, Dice, Roller};
///
/// let mut roller = FastRand::default();
/// let rolls = roller.roll_pool(&Dice::new(4, 6)?);
/// assert!(rolls.iter().all(|&val| (1..=6).contains(&val)));
/// # Ok::<(), fortuna::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use fortuna::dice::{roller::FastRand, Roller};
///
/// let mut roller = FastRand::with_seed(0x750c38d574400);
/// let val = roller.roll_die(20);
/// assert!((1..=20).contains(&val));
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to
	/// generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to
	/// generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		if sides > 0 {
			self.0.u16(1..=sides)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
#[derive(Debug, Default, Clone)]
#[allow(clippy::exhaustive_structs)]
pub struct Val(pub u16);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0
	}
}

/// Generates rolls that always have their max value. Useful for exercising
/// explosion caps and critical-success paths.
#[derive(Debug, Default, Clone)]
#[allow(clippy::exhaustive_structs)]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use fortuna::dice::{roller::Iter, Dice, Roller};
///
/// let mut roller = Iter::new(vec![1, 2, 3, 4]);
/// assert_eq!(roller.roll_pool(&Dice::new(4, 6)?), vec![1, 2, 3, 4]);
/// # Ok::<(), fortuna::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u16>>(Peekable<I>);

impl<I: Iterator<Item = u16>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u16>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0.next().expect("iterator is finished")
	}
}
