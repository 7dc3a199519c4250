//! Derived statistics over roll history: campaign-wide counters, trailing
//! session summaries, and the plain-text history export.
//!
//! Everything here is a recomputed view; no independent state is owned and
//! nothing is persisted separately from the [`History`] it reads.

use core::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::history::{History, HistoryEntry};

/// Campaign-wide counters derived from the full history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CampaignStats {
	/// Total committed rolls
	pub total_rolls: usize,

	/// d20 rolls that produced a natural 20
	pub natural_twenties: usize,

	/// d20 rolls that produced a natural 1
	pub natural_ones: usize,

	/// Mean of all individual d20 face values across history
	/// (face values, not roll totals)
	pub average_d20_roll: f64,
}

/// Summary of rolls inside a trailing session window.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct SessionSummary {
	/// Rolls inside the window
	pub roll_count: usize,

	/// Highest roll total in the window
	pub highest: i32,

	/// Lowest roll total in the window
	pub lowest: i32,

	/// Mean roll total in the window
	pub average: f64,

	/// d20 rolls in the window that produced a natural 20
	pub critical_hits: usize,

	/// d20 rolls in the window that produced a natural 1
	pub critical_fails: usize,

	/// Sum of all roll totals in the window
	pub total_damage: i32,

	/// Span from the oldest to the newest roll in the window
	pub session_duration: Duration,
}

impl Default for SessionSummary {
	fn default() -> Self {
		Self {
			roll_count: 0,
			highest: 0,
			lowest: 0,
			average: 0.0,
			critical_hits: 0,
			critical_fails: 0,
			total_damage: 0,
			session_duration: Duration::zero(),
		}
	}
}

/// Default trailing window for a play session.
#[must_use]
pub fn default_session_window() -> Duration {
	Duration::hours(6)
}

/// Computes campaign-wide statistics over the full history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn campaign_stats(history: &History) -> CampaignStats {
	let mut stats = CampaignStats {
		total_rolls: history.len(),
		..CampaignStats::default()
	};

	let mut d20_faces: u64 = 0;
	let mut d20_face_sum: u64 = 0;
	for entry in history.iter().filter(|entry| entry.is_d20()) {
		if entry.individual_rolls.contains(&20) {
			stats.natural_twenties += 1;
		}
		if entry.individual_rolls.contains(&1) {
			stats.natural_ones += 1;
		}
		d20_faces += entry.individual_rolls.len() as u64;
		d20_face_sum += entry.individual_rolls.iter().map(|&val| u64::from(val)).sum::<u64>();
	}

	if d20_faces > 0 {
		stats.average_d20_roll = d20_face_sum as f64 / d20_faces as f64;
	}
	stats
}

/// Computes a summary of the rolls made within the trailing `window` of now.
#[must_use]
pub fn session_summary(history: &History, window: Duration) -> SessionSummary {
	session_summary_at(history, window, Utc::now())
}

/// Computes a session summary with an explicit "now", for deterministic use.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn session_summary_at(history: &History, window: Duration, now: DateTime<Utc>) -> SessionSummary {
	let cutoff = now - window;
	let in_window: Vec<&HistoryEntry> = history.iter().filter(|entry| entry.timestamp >= cutoff).collect();

	let Some(first) = in_window.first() else {
		return SessionSummary::default();
	};

	let mut summary = SessionSummary {
		roll_count: in_window.len(),
		highest: first.total,
		lowest: first.total,
		..SessionSummary::default()
	};

	let mut newest = first.timestamp;
	let mut oldest = first.timestamp;
	let mut total_sum: i64 = 0;
	for entry in &in_window {
		summary.highest = summary.highest.max(entry.total);
		summary.lowest = summary.lowest.min(entry.total);
		total_sum += i64::from(entry.total);
		if entry.is_d20() {
			if entry.individual_rolls.contains(&20) {
				summary.critical_hits += 1;
			}
			if entry.individual_rolls.contains(&1) {
				summary.critical_fails += 1;
			}
		}
		newest = newest.max(entry.timestamp);
		oldest = oldest.min(entry.timestamp);
	}

	#[allow(clippy::cast_possible_truncation)]
	{
		summary.total_damage = total_sum as i32;
	}
	summary.average = total_sum as f64 / in_window.len() as f64;
	summary.session_duration = newest - oldest;
	summary
}

/// Formats the campaign statistics and the chronological roll log as a
/// plain-text report, suitable for export or sharing.
#[must_use]
pub fn export_report(history: &History) -> String {
	let stats = campaign_stats(history);
	let mut out = String::new();

	out.push_str("=== Campaign Statistics ===\n");
	let _ = writeln!(out, "Total rolls: {}", stats.total_rolls);
	let _ = writeln!(out, "Natural 20s: {}", stats.natural_twenties);
	let _ = writeln!(out, "Natural 1s: {}", stats.natural_ones);
	let _ = writeln!(out, "Average d20 roll: {:.2}", stats.average_d20_roll);
	out.push_str("\n=== Roll History ===\n");

	// History iterates most recent first; the report reads oldest first.
	for entry in history.list().into_iter().rev() {
		let _ = writeln!(
			out,
			"{} | {} | {} | {:?} | {}",
			entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
			if entry.label.is_empty() { "(unlabeled)" } else { &entry.label },
			entry.configuration,
			entry.individual_rolls,
			entry.total
		);
	}

	out
}
