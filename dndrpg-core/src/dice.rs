//! Dice rolling primitives.
//!
//! Every roll takes the RNG as a parameter so callers can substitute a
//! seeded or stepped generator in tests.

use rand::Rng;
use thiserror::Error;

/// Error type for die rolls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid die size: {0}")]
    InvalidSides(u32),
    #[error("Invalid die count: {0}")]
    InvalidCount(u32),
}

/// Roll a single die with the given number of sides, uniformly in `[1, sides]`.
pub fn roll_die<R: Rng>(rng: &mut R, sides: u32) -> Result<u32, DiceError> {
    if sides == 0 {
        return Err(DiceError::InvalidSides(sides));
    }
    Ok(rng.gen_range(1..=sides))
}

/// Roll `count` independent dice with the given number of sides.
pub fn roll_dice<R: Rng>(rng: &mut R, count: u32, sides: u32) -> Result<Vec<u32>, DiceError> {
    if count == 0 {
        return Err(DiceError::InvalidCount(count));
    }
    if sides == 0 {
        return Err(DiceError::InvalidSides(sides));
    }
    Ok((0..count).map(|_| rng.gen_range(1..=sides)).collect())
}

/// Roll a d20.
pub fn d20<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(1..=20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_die_range() {
        let mut rng = rand::thread_rng();
        for sides in [1, 4, 6, 8, 10, 12, 20, 100] {
            for _ in 0..10_000 {
                let roll = roll_die(&mut rng, sides).unwrap();
                assert!((1..=sides).contains(&roll));
            }
        }
    }

    #[test]
    fn test_one_sided_die_is_constant() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert_eq!(roll_die(&mut rng, 1).unwrap(), 1);
        }
    }

    #[test]
    fn test_zero_sides_rejected() {
        let mut rng = rand::thread_rng();
        assert_eq!(roll_die(&mut rng, 0), Err(DiceError::InvalidSides(0)));
        assert_eq!(roll_dice(&mut rng, 4, 0), Err(DiceError::InvalidSides(0)));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut rng = rand::thread_rng();
        assert_eq!(roll_dice(&mut rng, 0, 6), Err(DiceError::InvalidCount(0)));
    }

    #[test]
    fn test_roll_dice_count_and_range() {
        let mut rng = rand::thread_rng();
        let rolls = roll_dice(&mut rng, 4, 6).unwrap();
        assert_eq!(rolls.len(), 4);
        assert!(rolls.iter().all(|r| (1..=6).contains(r)));
    }

    #[test]
    fn test_d20_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let roll = d20(&mut rng);
            assert!((1..=20).contains(&roll));
        }
    }
}
