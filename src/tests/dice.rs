use crate::{
	dice::{
		roller::{FastRand, Iter, Max, Val},
		Dice, Roller, MAX_COUNT, MAX_SIDES, MIN_SIDES,
	},
	error::Error,
};

#[test]
fn construct_in_bounds() {
	let dice = Dice::new(4, 6).unwrap();
	assert_eq!(dice.count, 4);
	assert_eq!(dice.sides, 6);

	assert!(Dice::new(1, MIN_SIDES).is_ok());
	assert!(Dice::new(MAX_COUNT, MAX_SIDES).is_ok());
}

#[test]
fn construct_out_of_bounds() {
	assert!(matches!(Dice::new(1, 1), Err(Error::OutOfRangeDice(..))));
	assert!(matches!(Dice::new(1, 0), Err(Error::OutOfRangeDice(..))));
	assert!(matches!(Dice::new(1, MAX_SIDES + 1), Err(Error::OutOfRangeDice(..))));
	assert!(matches!(Dice::new(0, 6), Err(Error::OutOfRangeDice(..))));
	assert!(matches!(Dice::new(MAX_COUNT + 1, 6), Err(Error::OutOfRangeDice(..))));
}

#[test]
fn default_is_1d20() {
	let dice = Dice::default();
	assert_eq!(dice, Dice::new(1, 20).unwrap());
	assert!(dice.is_d20());
}

#[test]
fn display_notation() {
	assert_eq!(Dice::new(3, 6).unwrap().to_string(), "3d6");
	assert_eq!(Dice::new(1, 100).unwrap().to_string(), "1d100");
}

#[test]
fn fastrand_rolls_stay_in_range() {
	let mut rng = FastRand::with_seed(0x5eed);
	for _ in 0..1000 {
		let val = rng.roll_die(20);
		assert!((1..=20).contains(&val));
	}
}

#[test]
fn fastrand_all_d6_sides_occur() {
	let mut rng = FastRand::with_seed(0xd1ce);
	let rolls: Vec<u16> = (0..1000).map(|_| rng.roll_die(6)).collect();
	for side in 1..=6 {
		assert!(rolls.contains(&side), "side {side} never occurred");
	}
}

#[test]
fn roll_pool_length_and_range() {
	let dice = Dice::new(10, 8).unwrap();
	let mut rng = FastRand::default();
	let rolls = rng.roll_pool(&dice);
	assert_eq!(rolls.len(), 10);
	assert!(rolls.iter().all(|&val| (1..=8).contains(&val)));
}

#[test]
fn val_roller_is_constant() {
	let mut rng = Val(7);
	assert!(rng.roll_pool(&Dice::new(5, 8).unwrap()).iter().all(|&val| val == 7));
}

#[test]
fn max_roller_matches_sides() {
	let mut rng = Max;
	assert_eq!(rng.roll_die(6), 6);
	assert_eq!(rng.roll_die(20), 20);
}

#[test]
fn iter_roller_yields_in_order() {
	let mut rng = Iter::new(vec![1, 2, 3]);
	assert!(rng.can_roll());
	assert_eq!(rng.roll_pool(&Dice::new(3, 6).unwrap()), vec![1, 2, 3]);
	assert!(!rng.can_roll());
}
