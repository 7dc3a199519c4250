use crate::{
	contract::{roll_request, DiceRequest, Modifiers, RollRequest},
	dice::roller::{Iter, Val},
	error::Error,
};

fn request_json(json: &str) -> RollRequest {
	serde_json::from_str(json).unwrap()
}

#[test]
fn deserializes_bare_counts_and_full_groups() {
	let request = request_json(r#"{"dice": {"d20": 1, "d6": {"count": 8, "sides": 6}}, "modifiers": {"bonus": 3}}"#);
	assert_eq!(request.dice["d20"], DiceRequest::Count(1));
	assert_eq!(request.dice["d6"], DiceRequest::Full { count: 8, sides: 6 });
	assert_eq!(request.modifiers, Some(Modifiers { bonus: 3, penalty: 0 }));
}

#[test]
fn evaluates_groups_and_modifiers() {
	let request = request_json(r#"{"dice": {"d20": 1, "d6": {"count": 8, "sides": 6}}, "modifiers": {"bonus": 3}}"#);
	let response = roll_request(&request, &mut Val(2)).unwrap();

	assert_eq!(response.results["d20"], vec![2]);
	assert_eq!(response.results["d6"], vec![2; 8]);
	// 2 + 16 dice sum, +3 bonus
	assert_eq!(response.total, 21);

	assert_eq!(response.breakdown.len(), 2);
	let d6 = response.breakdown.iter().find(|group| group.key == "d6").unwrap();
	assert_eq!(d6.subtotal, 16);
	assert_eq!(d6.dice.sides, 6);
}

#[test]
fn bare_count_derives_sides_from_face_key() {
	let request = request_json(r#"{"dice": {"d8": 3}}"#);
	let response = roll_request(&request, &mut Iter::new(vec![8, 1, 4])).unwrap();
	assert_eq!(response.results["d8"], vec![8, 1, 4]);
	assert_eq!(response.total, 13);
}

#[test]
fn rejects_unrecognizable_face_key() {
	let request = request_json(r#"{"dice": {"bonus": 2}}"#);
	assert!(matches!(
		roll_request(&request, &mut Val(1)),
		Err(Error::InvalidNotation(..))
	));
}

#[test]
fn rejects_empty_request() {
	let request = request_json(r#"{"dice": {}}"#);
	assert!(matches!(
		roll_request(&request, &mut Val(1)),
		Err(Error::InvalidNotation(..))
	));
}

#[test]
fn rejects_out_of_range_groups() {
	let request = request_json(r#"{"dice": {"d1": 1}}"#);
	assert!(matches!(
		roll_request(&request, &mut Val(1)),
		Err(Error::OutOfRangeDice(..))
	));
}

#[test]
fn rejects_aggregate_dice_past_cap() {
	let request = request_json(r#"{"dice": {"d4": 100, "d6": 100, "d8": 50}}"#);
	assert!(matches!(
		roll_request(&request, &mut Val(1)),
		Err(Error::OutOfRangeDice(..))
	));
}

#[test]
fn penalty_clamps_total_at_zero() {
	let request = request_json(r#"{"dice": {"d6": 1}, "modifiers": {"penalty": 50}}"#);
	let response = roll_request(&request, &mut Val(3)).unwrap();
	assert_eq!(response.total, 0);
}

#[test]
fn response_serializes() {
	let request = request_json(r#"{"dice": {"d6": 2}}"#);
	let response = roll_request(&request, &mut Val(3)).unwrap();
	let json = serde_json::to_value(&response).unwrap();
	assert_eq!(json["total"], 6);
	assert_eq!(json["results"]["d6"][0], 3);
	assert!(json["breakdown"].is_array());
}
