use crate::{
	dice::{
		roller::{Iter, Val},
		Dice,
	},
	history::{History, HistoryEntry, RollType, SESSION_CAPACITY, WIDGET_CAPACITY},
	line::DiceLine,
};

fn committed_entry(label: &str, total: u16) -> HistoryEntry {
	let mut line = DiceLine::new(Dice::new(1, 20).unwrap());
	line.label = label.into();
	let result = line.roll(&mut Val(total));
	HistoryEntry::from_roll(&line, &result)
}

#[test]
fn entries_snapshot_the_roll() {
	let mut line = DiceLine::new(Dice::new(2, 6).unwrap());
	line.label = "Attack".into();
	line.modifier = 3;
	let result = line.roll(&mut Iter::new(vec![4, 2]));
	let entry = HistoryEntry::from_roll(&line, &result);

	assert_eq!(entry.label, "Attack");
	assert_eq!(entry.configuration, "2d6+3");
	assert_eq!(entry.individual_rolls, vec![4, 2]);
	assert_eq!(entry.total, 9);
	assert_eq!(entry.modifier, 3);
	assert_eq!(entry.sides, 6);
	assert_eq!(entry.roll_type, RollType::Standard);
	assert_eq!(entry.timestamp, result.timestamp);
}

#[test]
fn entry_roll_type_reflects_rule() {
	let mut line = DiceLine::new(Dice::new(1, 20).unwrap());
	line.set_advantage(true);
	let result = line.roll(&mut Iter::new(vec![3, 17]));
	assert_eq!(HistoryEntry::from_roll(&line, &result).roll_type, RollType::Advantage);

	let mut line = DiceLine::new(Dice::new(1, 6).unwrap());
	line.exploding = true;
	let result = line.roll(&mut Iter::new(vec![2]));
	assert_eq!(HistoryEntry::from_roll(&line, &result).roll_type, RollType::Exploding);

	let mut line = DiceLine::new(Dice::new(4, 6).unwrap());
	line.keep = Some(crate::line::Keep::Highest(3));
	let result = line.roll(&mut Iter::new(vec![1, 2, 3, 4]));
	assert_eq!(HistoryEntry::from_roll(&line, &result).roll_type, RollType::KeepHighest);
}

#[test]
fn bounded_eviction_drops_oldest() {
	let mut history = History::new(3);
	for label in ["a", "b", "c", "d"] {
		history.add(committed_entry(label, 10));
	}

	assert_eq!(history.len(), 3);
	let labels: Vec<&str> = history.iter().map(|entry| entry.label.as_str()).collect();
	// Most recent first, oldest ("a") evicted
	assert_eq!(labels, vec!["d", "c", "b"]);
}

#[test]
fn list_is_most_recent_first() {
	let mut history = History::session();
	history.add(committed_entry("first", 5));
	history.add(committed_entry("second", 7));

	let listed = history.list();
	assert_eq!(listed[0].label, "second");
	assert_eq!(listed[1].label, "first");
}

#[test]
fn clear_empties_the_store() {
	let mut history = History::widget();
	history.add(committed_entry("a", 4));
	assert!(!history.is_empty());

	history.clear();
	assert!(history.is_empty());
	assert_eq!(history.len(), 0);
}

#[test]
fn capacity_policies() {
	assert_eq!(History::session().capacity(), SESSION_CAPACITY);
	assert_eq!(History::widget().capacity(), WIDGET_CAPACITY);
	assert_eq!(SESSION_CAPACITY, 1000);
	assert_eq!(WIDGET_CAPACITY, 20);
}

#[test]
fn entries_serialize_round_trip() {
	let entry = committed_entry("serialized", 12);
	let json = serde_json::to_string(&entry).unwrap();
	let back: HistoryEntry = serde_json::from_str(&json).unwrap();
	assert_eq!(back, entry);
}
