//! The escalating-risk dice roll.
//!
//! A throw on attempt `n` draws a face uniformly from `n..=faces` and loses
//! on the top face. The loss chance is therefore `1/(faces + 1 - n)`: for a
//! six-sided dice 1/6, 1/5, 1/4, 1/3, 1/2 and finally certain loss on the
//! sixth attempt. Attempts past `faces` stay certain.

use crate::core::{DiceOutcome, GameRng};

/// Dice with a fixed number of faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceRule {
    faces: u8,
}

impl Default for DiceRule {
    fn default() -> Self {
        Self { faces: 6 }
    }
}

impl DiceRule {
    /// Dice with `faces` faces (at least 1).
    #[must_use]
    pub fn new(faces: u8) -> Self {
        Self {
            faces: faces.max(1),
        }
    }

    #[must_use]
    pub fn faces(self) -> u8 {
        self.faces
    }

    fn lowest_face(self, attempt: u8) -> u8 {
        attempt.clamp(1, self.faces)
    }

    /// Exact chance that throw number `attempt` eliminates the roller.
    ///
    /// ```
    /// use liars_bar::rules::DiceRule;
    ///
    /// let dice = DiceRule::new(6);
    /// assert_eq!(dice.loss_probability(1), 1.0 / 6.0);
    /// assert_eq!(dice.loss_probability(5), 0.5);
    /// assert_eq!(dice.loss_probability(6), 1.0);
    /// ```
    #[must_use]
    pub fn loss_probability(self, attempt: u8) -> f64 {
        1.0 / f64::from(self.faces - self.lowest_face(attempt) + 1)
    }

    /// Throw for `attempt`.
    pub fn roll(self, attempt: u8, rng: &mut GameRng) -> DiceOutcome {
        let face = rng.gen_face(self.lowest_face(attempt)..=self.faces);
        DiceOutcome {
            face,
            attempt,
            is_loss: face == self.faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_probability_escalates() {
        let dice = DiceRule::new(6);
        let expected = [1.0 / 6.0, 1.0 / 5.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 2.0, 1.0];
        for (i, p) in expected.iter().enumerate() {
            let attempt = i as u8 + 1;
            assert!((dice.loss_probability(attempt) - p).abs() < 1e-12, "attempt {attempt}");
        }
        assert_eq!(dice.loss_probability(9), 1.0);
        assert_eq!(dice.loss_probability(0), dice.loss_probability(1));
    }

    #[test]
    fn test_final_attempt_always_loses() {
        let dice = DiceRule::default();
        let mut rng = GameRng::new(11);
        for attempt in 6..10 {
            let outcome = dice.roll(attempt, &mut rng);
            assert!(outcome.is_loss);
            assert_eq!(outcome.face, 6);
            assert_eq!(outcome.attempt, attempt);
        }
    }

    #[test]
    fn test_faces_in_range() {
        let dice = DiceRule::default();
        let mut rng = GameRng::new(12);
        for attempt in 1..=6 {
            for _ in 0..200 {
                let outcome = dice.roll(attempt, &mut rng);
                assert!((attempt..=6).contains(&outcome.face));
                assert_eq!(outcome.is_loss, outcome.face == 6);
            }
        }
    }

    #[test]
    fn test_first_attempt_rate() {
        let dice = DiceRule::default();
        let mut rng = GameRng::new(13);
        let trials = 6000;
        let losses = (0..trials).filter(|_| dice.roll(1, &mut rng).is_loss).count();
        // Expected 1000.
        assert!((700..1300).contains(&losses), "losses = {losses}");
    }

    #[test]
    fn test_single_face_dice() {
        let dice = DiceRule::new(0);
        assert_eq!(dice.faces(), 1);
        let mut rng = GameRng::new(1);
        assert!(dice.roll(1, &mut rng).is_loss);
    }
}
