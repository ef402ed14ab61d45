//! Ability score generation.
//!
//! Two strategies share the [`AbilityScoreGenerator`] contract: rolling
//! 4d6-drop-lowest per ability, and a 27-point point-buy budget. The
//! point-buy state machine is pure; interactive presentation belongs to
//! the caller.

use crate::character::{Ability, AbilityScores};
use rand::Rng;
use thiserror::Error;

/// Produces a full set of base ability scores, one per ability.
pub trait AbilityScoreGenerator {
    fn generate(&mut self) -> Result<AbilityScores, GenerateError>;
}

/// Error from score generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("{0} unspent point(s) remain in the point-buy budget")]
    PointsRemaining(u8),
}

// ============================================================================
// Rolled scores
// ============================================================================

/// The four dice and resulting score for one ability.
#[derive(Debug, Clone, Copy)]
pub struct AbilityRoll {
    pub rolls: [u8; 4],
    pub score: u8,
}

/// Roll 4d6 and sum the highest three. Score range: 3-18.
pub fn roll_ability_score<R: Rng>(rng: &mut R) -> AbilityRoll {
    let mut rolls = [0u8; 4];
    for roll in &mut rolls {
        *roll = rng.gen_range(1..=6);
    }
    // Dropping any one of several equal-minimum dice leaves the same sum.
    let lowest = rolls.iter().copied().min().unwrap_or(0);
    let score = rolls.iter().copied().sum::<u8>() - lowest;
    AbilityRoll { rolls, score }
}

/// Random generator: an independent 4d6-drop-lowest roll per ability.
#[derive(Debug)]
pub struct Rolled<R: Rng> {
    rng: R,
}

impl<R: Rng> Rolled<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate scores along with the individual dice, for display.
    pub fn generate_detailed(&mut self) -> Vec<(Ability, AbilityRoll)> {
        Ability::all()
            .into_iter()
            .map(|ability| (ability, roll_ability_score(&mut self.rng)))
            .collect()
    }
}

impl<R: Rng> AbilityScoreGenerator for Rolled<R> {
    fn generate(&mut self) -> Result<AbilityScores, GenerateError> {
        let mut scores = AbilityScores::flat();
        for (ability, roll) in self.generate_detailed() {
            scores.set_base(ability, roll.score);
        }
        Ok(scores)
    }
}

// ============================================================================
// Point buy
// ============================================================================

/// Total points available for point buy.
pub const POINT_BUY_BUDGET: u8 = 27;

/// Lowest purchasable score.
pub const POINT_BUY_MIN: u8 = 8;

/// Highest purchasable score.
pub const POINT_BUY_MAX: u8 = 15;

/// Cumulative point cost of a score, counted up from 8.
pub fn point_buy_cost(score: u8) -> Option<u8> {
    match score {
        8 => Some(0),
        9 => Some(1),
        10 => Some(2),
        11 => Some(3),
        12 => Some(4),
        13 => Some(5),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

/// Error from a point-buy edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointBuyError {
    #[error("Score {0} is outside the point-buy range ({POINT_BUY_MIN}-{POINT_BUY_MAX})")]
    ScoreOutOfRange(u8),
    #[error("Raising to that score costs {cost} point(s) but only {remaining} remain")]
    InsufficientPoints { cost: u8, remaining: u8 },
}

/// Point-buy allocation state machine.
///
/// Every ability starts at 8 against a 27-point budget. Each edit moves
/// one ability to a new score, spending `cost(new) - cost(current)`
/// points; lowering a score refunds the difference. An edit that would
/// overdraw the budget is rejected and leaves the allocation unchanged.
#[derive(Debug, Clone)]
pub struct PointBuy {
    scores: AbilityScores,
}

impl PointBuy {
    pub fn new() -> Self {
        Self {
            scores: AbilityScores::from_base(
                POINT_BUY_MIN,
                POINT_BUY_MIN,
                POINT_BUY_MIN,
                POINT_BUY_MIN,
                POINT_BUY_MIN,
                POINT_BUY_MIN,
            ),
        }
    }

    /// Current score for one ability.
    pub fn score(&self, ability: Ability) -> u8 {
        self.scores.get(ability).base
    }

    /// Points spent so far across all six abilities.
    pub fn spent(&self) -> u8 {
        Ability::all()
            .into_iter()
            .map(|a| point_buy_cost(self.score(a)).unwrap_or(0))
            .sum()
    }

    /// Points left in the budget.
    pub fn remaining(&self) -> u8 {
        POINT_BUY_BUDGET - self.spent()
    }

    /// Whether the budget has been spent exactly.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Move one ability to a new score, validating range and budget.
    pub fn set(&mut self, ability: Ability, new_score: u8) -> Result<(), PointBuyError> {
        let new_cost = point_buy_cost(new_score)
            .ok_or(PointBuyError::ScoreOutOfRange(new_score))?
            as i16;
        let current_cost = point_buy_cost(self.score(ability)).unwrap_or(0) as i16;

        let delta = new_cost - current_cost;
        if delta > self.remaining() as i16 {
            return Err(PointBuyError::InsufficientPoints {
                cost: delta as u8,
                remaining: self.remaining(),
            });
        }

        self.scores.set_base(ability, new_score);
        Ok(())
    }

    /// Apply a sequence of edits, stopping at the first rejection.
    pub fn apply(&mut self, edits: &[(Ability, u8)]) -> Result<(), PointBuyError> {
        for &(ability, score) in edits {
            self.set(ability, score)?;
        }
        Ok(())
    }
}

impl Default for PointBuy {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityScoreGenerator for PointBuy {
    fn generate(&mut self) -> Result<AbilityScores, GenerateError> {
        if !self.is_complete() {
            return Err(GenerateError::PointsRemaining(self.remaining()));
        }
        Ok(self.scores.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolled_score_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            let roll = roll_ability_score(&mut rng);
            assert!((3..=18).contains(&roll.score));
            assert!(roll.rolls.iter().all(|r| (1..=6).contains(r)));
        }
    }

    #[test]
    fn test_rolled_score_drops_exactly_one_die() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            let roll = roll_ability_score(&mut rng);
            let sum: u8 = roll.rolls.iter().sum();
            let lowest = roll.rolls.iter().copied().min().unwrap();
            assert_eq!(roll.score, sum - lowest);
        }
    }

    #[test]
    fn test_rolled_generator_covers_all_abilities() {
        let mut generator = Rolled::new(rand::thread_rng());
        let scores = generator.generate().unwrap();
        for ability in Ability::all() {
            let entry = scores.get(ability);
            assert!((3..=18).contains(&entry.base));
            assert_eq!(entry.bonus, 0);
        }
    }

    #[test]
    fn test_rolled_mean_is_statistically_sane() {
        // 4d6-drop-lowest has an expected value of ~12.24.
        let mut rng = rand::thread_rng();
        let trials = 10_000u32;
        let sum: u32 = (0..trials)
            .map(|_| roll_ability_score(&mut rng).score as u32)
            .sum();
        let mean = sum as f64 / trials as f64;
        assert!(
            (11.9..12.6).contains(&mean),
            "mean {mean} outside sanity bound"
        );
    }

    #[test]
    fn test_point_buy_starts_at_floor_with_full_budget() {
        let pb = PointBuy::new();
        for ability in Ability::all() {
            assert_eq!(pb.score(ability), 8);
        }
        assert_eq!(pb.spent(), 0);
        assert_eq!(pb.remaining(), POINT_BUY_BUDGET);
        assert!(!pb.is_complete());
    }

    #[test]
    fn test_point_buy_cost_table() {
        let expected = [(8, 0), (9, 1), (10, 2), (11, 3), (12, 4), (13, 5), (14, 7), (15, 9)];
        for (score, cost) in expected {
            assert_eq!(point_buy_cost(score), Some(cost));
        }
        assert_eq!(point_buy_cost(7), None);
        assert_eq!(point_buy_cost(16), None);
    }

    #[test]
    fn test_point_buy_rejects_out_of_range() {
        let mut pb = PointBuy::new();
        assert_eq!(
            pb.set(Ability::Strength, 16),
            Err(PointBuyError::ScoreOutOfRange(16))
        );
        assert_eq!(
            pb.set(Ability::Strength, 7),
            Err(PointBuyError::ScoreOutOfRange(7))
        );
    }

    #[test]
    fn test_point_buy_all_fifteens_exceeds_budget() {
        // Raising every ability to 15 would cost 54 points; the fourth
        // raise (27 spent) succeeds and the fifth is rejected.
        let mut pb = PointBuy::new();
        for ability in [Ability::Strength, Ability::Dexterity, Ability::Constitution] {
            pb.set(ability, 15).unwrap();
        }
        assert_eq!(pb.remaining(), 0);
        assert!(matches!(
            pb.set(Ability::Intelligence, 15),
            Err(PointBuyError::InsufficientPoints { cost: 9, remaining: 0 })
        ));
    }

    #[test]
    fn test_point_buy_lowering_refunds() {
        let mut pb = PointBuy::new();
        pb.set(Ability::Strength, 15).unwrap();
        assert_eq!(pb.remaining(), 18);

        // 15 -> 13 refunds cost(15) - cost(13) = 4 points.
        pb.set(Ability::Strength, 13).unwrap();
        assert_eq!(pb.remaining(), 22);

        // Back down to the floor refunds everything.
        pb.set(Ability::Strength, 8).unwrap();
        assert_eq!(pb.remaining(), POINT_BUY_BUDGET);
    }

    #[test]
    fn test_point_buy_edit_sequence() {
        let mut pb = PointBuy::new();
        pb.set(Ability::Strength, 15).unwrap();
        assert_eq!(pb.remaining(), 18);
        pb.set(Ability::Dexterity, 14).unwrap();
        assert_eq!(pb.remaining(), 11);

        // Spending 3 more leaves 8, under the 9 Con->15 needs.
        pb.set(Ability::Wisdom, 11).unwrap();
        assert_eq!(pb.remaining(), 8);
        assert_eq!(
            pb.set(Ability::Constitution, 15),
            Err(PointBuyError::InsufficientPoints { cost: 9, remaining: 8 })
        );

        // A rejected edit leaves the allocation untouched.
        assert_eq!(pb.score(Ability::Constitution), 8);

        pb.set(Ability::Constitution, 13).unwrap();
        assert_eq!(pb.remaining(), 3);
    }

    #[test]
    fn test_point_buy_generate_requires_spent_budget() {
        let mut pb = PointBuy::new();
        assert_eq!(pb.generate(), Err(GenerateError::PointsRemaining(27)));

        pb.apply(&[
            (Ability::Strength, 15),
            (Ability::Dexterity, 15),
            (Ability::Constitution, 15),
        ])
        .unwrap();
        assert!(pb.is_complete());

        let scores = pb.generate().unwrap();
        assert_eq!(scores.get(Ability::Strength).base, 15);
        assert_eq!(scores.get(Ability::Charisma).base, 8);
    }
}
