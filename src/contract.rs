//! JSON request/response shapes for the boundary between the engine and the
//! surrounding HTTP handlers, UI view-models, and mobile bindings.
//!
//! The engine stays transport-agnostic: this module defines the serde
//! contract and evaluates requests against a caller-supplied roller, and
//! nothing here knows about HTTP.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
	dice::{roller::Roller, Dice, MAX_TOTAL_DICE},
	error::Error,
};

/// One dice group in a request: either a bare count (sides derived from the
/// face key, e.g. `"d8": 3`) or an explicit `{ "count": 3, "sides": 8 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(clippy::exhaustive_enums)]
pub enum DiceRequest {
	/// Bare die count; sides come from the face key
	Count(u8),

	/// Explicit count and sides
	Full {
		/// Number of dice to roll
		count: u8,
		/// Number of sides per die
		sides: u16,
	},
}

/// Flat bonus/penalty applied to the combined request total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Modifiers {
	/// Added to the total
	#[serde(default)]
	pub bonus: i32,

	/// Subtracted from the total
	#[serde(default)]
	pub penalty: i32,
}

/// A roll request keyed by die face, e.g.
/// `{ "dice": { "d20": 1, "d6": { "count": 8, "sides": 6 } }, "modifiers": { "bonus": 3 } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RollRequest {
	/// Dice groups keyed by face name
	pub dice: BTreeMap<String, DiceRequest>,

	/// Optional flat modifiers
	#[serde(default)]
	pub modifiers: Option<Modifiers>,
}

/// Per-group detail in a [`RollResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Breakdown {
	/// Face key the group was requested under
	pub key: String,

	/// The dice that were rolled
	pub dice: Dice,

	/// Individual face values
	pub rolls: Vec<u16>,

	/// Sum of this group's rolls
	pub subtotal: i32,
}

/// The response to a [`RollRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RollResponse {
	/// Individual face values keyed by the request's face keys
	pub results: BTreeMap<String, Vec<u16>>,

	/// Combined total of all groups plus bonus minus penalty, clamped to
	/// zero from below like combined line totals
	pub total: i32,

	/// Per-group detail in key order
	pub breakdown: Vec<Breakdown>,
}

/// Evaluates a roll request against a roller.
///
/// # Errors
/// - [`Error::InvalidNotation`] when the request has no dice groups, or a
///   bare-count group's face key does not name a die (`"d8"`, `"d20"`, ...).
/// - [`Error::OutOfRangeDice`] when a group's sides/count are out of bounds
///   or the aggregate dice count exceeds [`MAX_TOTAL_DICE`].
pub fn roll_request(request: &RollRequest, rng: &mut impl Roller) -> Result<RollResponse, Error> {
	if request.dice.is_empty() {
		return Err(Error::InvalidNotation("request contains no dice".into()));
	}

	let mut total_dice: u32 = 0;
	let mut response = RollResponse::default();
	let mut dice_sum: i64 = 0;

	for (key, group) in &request.dice {
		let dice = match *group {
			DiceRequest::Full { count, sides } => Dice::new(count, sides)?,
			DiceRequest::Count(count) => Dice::new(count, sides_from_key(key)?)?,
		};

		total_dice += u32::from(dice.count);
		if total_dice > MAX_TOTAL_DICE {
			return Err(Error::OutOfRangeDice(format!(
				"request rolls more than the {MAX_TOTAL_DICE} dice allowed"
			)));
		}

		let rolls = rng.roll_pool(&dice);
		let subtotal: i32 = rolls.iter().map(|&val| i32::from(val)).sum();
		dice_sum += i64::from(subtotal);

		response.results.insert(key.clone(), rolls.clone());
		response.breakdown.push(Breakdown {
			key: key.clone(),
			dice,
			rolls,
			subtotal,
		});
	}

	let modifiers = request.modifiers.unwrap_or_default();
	let total = dice_sum + i64::from(modifiers.bonus) - i64::from(modifiers.penalty);
	response.total = i32::try_from(total.max(0)).unwrap_or(i32::MAX);

	tracing::debug!(groups = response.breakdown.len(), total = response.total, "evaluated roll request");
	Ok(response)
}

/// Derives the number of sides from a face key like `d8` or `D20`.
fn sides_from_key(key: &str) -> Result<u16, Error> {
	key.trim()
		.trim_start_matches(['d', 'D'])
		.parse()
		.map_err(|_| Error::InvalidNotation(format!("face key {key:?} does not name a die")))
}
