use serde::{Deserialize, Serialize};

use crate::classify::RewardOutcome;

/// Running total of eco points earned this process lifetime.
///
/// The only mutation path is [`PointsLedger::apply`], which credits exactly
/// the points of an accepted outcome and ignores everything else, so the
/// total never decreases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsLedger {
    total: u32,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Credits an accepted outcome's points and returns the delta actually
    /// applied (0 for rejected outcomes).
    pub fn apply(&mut self, outcome: &RewardOutcome) -> u32 {
        if !outcome.accepted {
            return 0;
        }
        self.total += outcome.points_awarded;
        outcome.points_awarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Category, Rejection};

    fn outcome(points: u32, accepted: bool) -> RewardOutcome {
        RewardOutcome {
            points_awarded: if accepted { points } else { 0 },
            matched_label: "Tin Can".into(),
            confidence: 0.9,
            category: Category::Metal,
            accepted,
            rejection: (!accepted).then_some(Rejection::LowConfidence),
        }
    }

    #[test]
    fn accepted_outcomes_credit_their_points() {
        let mut ledger = PointsLedger::new();
        assert_eq!(ledger.apply(&outcome(40, true)), 40);
        assert_eq!(ledger.total(), 40);
    }

    #[test]
    fn rejected_outcomes_leave_the_total_unchanged() {
        let mut ledger = PointsLedger::new();
        assert_eq!(ledger.apply(&outcome(40, false)), 0);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn total_is_the_sum_of_accepted_deltas_only() {
        let mut ledger = PointsLedger::new();
        let sessions = [
            outcome(20, true),
            outcome(40, false),
            outcome(40, true),
            outcome(20, false),
            outcome(20, true),
        ];
        for o in &sessions {
            ledger.apply(o);
        }
        assert_eq!(ledger.total(), 80);
    }
}
