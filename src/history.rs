//! Bounded, most-recent-first log of committed rolls.
//!
//! A [`History`] is owned per user/session and constructed explicitly by the
//! caller; there is no process-wide store. Entries are immutable snapshots:
//! once added they are never mutated, only evicted oldest-first when the
//! store grows past its capacity.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::line::{DiceLine, RollResult};

/// Capacity policy for long-lived session history.
pub const SESSION_CAPACITY: usize = 1000;

/// Capacity policy for lightweight widget history.
pub const WIDGET_CAPACITY: usize = 20;

/// The rule under which a committed roll was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RollType {
	/// Plain sum of all rolled dice
	Standard,

	/// Two candidates, higher kept
	Advantage,

	/// Two candidates, lower kept
	Disadvantage,

	/// Maximum faces chained into additional rolls
	Exploding,

	/// Only the N highest dice counted
	KeepHighest,

	/// Only the N lowest dice counted
	KeepLowest,
}

/// Immutable snapshot of one committed roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct HistoryEntry {
	/// Unique entry id
	pub id: Uuid,

	/// When the roll was made
	pub timestamp: DateTime<Utc>,

	/// Label of the line that produced the roll
	pub label: String,

	/// Notation the roll was configured as, e.g. `2d6+3`
	pub configuration: String,

	/// Every die face value the roll produced
	pub individual_rolls: Vec<u16>,

	/// Final total including the modifier
	pub total: i32,

	/// Flat modifier applied to the roll
	pub modifier: i32,

	/// Number of sides of the rolled die type, kept structurally so the
	/// stats layer never has to re-parse the configuration string
	pub sides: u16,

	/// Rule the roll was made under
	pub roll_type: RollType,
}

impl HistoryEntry {
	/// Creates an entry snapshotting a line and the result it produced.
	#[must_use]
	pub fn from_roll(line: &DiceLine, result: &RollResult) -> Self {
		let roll_type = if result.advantage {
			RollType::Advantage
		} else if result.disadvantage {
			RollType::Disadvantage
		} else if result.exploding {
			RollType::Exploding
		} else {
			match line.keep {
				Some(crate::line::Keep::Highest(..)) => RollType::KeepHighest,
				Some(crate::line::Keep::Lowest(..)) => RollType::KeepLowest,
				None => RollType::Standard,
			}
		};

		Self {
			id: Uuid::new_v4(),
			timestamp: result.timestamp,
			label: line.label.clone(),
			configuration: line.to_string(),
			individual_rolls: result.individual_rolls.clone(),
			total: result.total,
			modifier: result.modifier,
			sides: line.dice.sides,
			roll_type,
		}
	}

	/// Whether this entry was rolled on a twenty-sided die.
	#[must_use]
	#[inline]
	pub const fn is_d20(&self) -> bool {
		self.sides == 20
	}
}

/// Bounded most-recent-first roll log with ring-buffer eviction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
	/// Entries, most recent at the front
	entries: VecDeque<HistoryEntry>,

	/// Maximum number of retained entries; 0 means unbounded
	capacity: usize,
}

impl History {
	/// Creates a history bounded at the given capacity.
	#[must_use]
	pub fn new(capacity: usize) -> Self {
		Self {
			entries: VecDeque::with_capacity(capacity.min(SESSION_CAPACITY)),
			capacity,
		}
	}

	/// Creates a history with the long-lived session capacity policy.
	#[must_use]
	#[inline]
	pub fn session() -> Self {
		Self::new(SESSION_CAPACITY)
	}

	/// Creates a history with the lightweight widget capacity policy.
	#[must_use]
	#[inline]
	pub fn widget() -> Self {
		Self::new(WIDGET_CAPACITY)
	}

	/// Commits an entry, evicting the oldest entry when past capacity.
	pub fn add(&mut self, entry: HistoryEntry) {
		tracing::debug!(id = %entry.id, config = %entry.configuration, total = entry.total, "roll committed to history");
		self.entries.push_front(entry);
		if self.capacity > 0 {
			self.entries.truncate(self.capacity);
		}
	}

	/// Iterates over entries, most recent first.
	pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
		self.entries.iter()
	}

	/// Lists all entries, most recent first.
	#[must_use]
	pub fn list(&self) -> Vec<&HistoryEntry> {
		self.entries.iter().collect()
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Number of retained entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the history holds no entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Configured capacity bound.
	#[must_use]
	pub const fn capacity(&self) -> usize {
		self.capacity
	}
}
