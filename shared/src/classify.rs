use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::ScanError;

/// Confidence a prediction must strictly exceed before points are credited.
/// The boundary is exclusive: exactly 0.70 is rejected.
pub const ACCEPT_THRESHOLD: f32 = 0.70;

/// A still image grabbed from the live camera stream.
///
/// Owned by the session that requested it and discarded once classification
/// completes. Pixels are RGBA, row-major, as read back from the capture
/// canvas.
#[derive(Clone, PartialEq)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub captured_at_ms: f64,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("captured_at_ms", &self.captured_at_ms)
            .finish()
    }
}

/// One candidate label from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Ranked model output for one frame. Guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    predictions: Vec<Prediction>,
}

impl Classification {
    /// Wraps raw model output. An empty prediction list means the model
    /// produced nothing usable and is reported as an inference failure.
    pub fn new(predictions: Vec<Prediction>) -> Result<Self, ScanError> {
        if predictions.is_empty() {
            return Err(ScanError::InferenceError);
        }
        Ok(Self { predictions })
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// The maximum-confidence entry. Ties keep the first occurrence in
    /// ranked order, so comparison is strictly-greater only.
    pub fn best(&self) -> &Prediction {
        let mut best = &self.predictions[0];
        for p in &self.predictions[1..] {
            if p.confidence > best.confidence {
                best = p;
            }
        }
        best
    }
}

/// Material category a label can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Plastic,
    Metal,
    Unknown,
}

impl Category {
    /// Fixed point value for this category.
    pub fn points(self) -> u32 {
        match self {
            Category::Plastic => 20,
            Category::Metal => 40,
            Category::Unknown => 0,
        }
    }
}

/// Why a classification was rejected by the acceptance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The label matched no recognized category.
    NoMatch,
    /// The label matched but confidence was at or below the threshold.
    LowConfidence,
}

/// Terminal artifact of a session: the decision derived from one
/// classification (or synthesized by a manual add).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub points_awarded: u32,
    pub matched_label: String,
    pub confidence: f32,
    pub category: Category,
    pub accepted: bool,
    pub rejection: Option<Rejection>,
}

/// Lowercase the label and strip all whitespace so that any model's class
/// naming ("Plastic Bottle", "plastic-bottle ", "PLASTICBOTTLE") matches the
/// same rules.
fn normalize(label: &str) -> String {
    label.to_lowercase().split_whitespace().collect()
}

/// Ordered substring rules, evaluated top-down, first match wins.
fn categorize(normalized: &str) -> Category {
    if normalized.contains("bottle") || normalized.contains("plastic") {
        Category::Plastic
    } else if normalized.contains("can") || normalized.contains("tin") {
        Category::Metal
    } else {
        Category::Unknown
    }
}

/// Applies the label decision policy to a classification.
///
/// Picks the top-ranked prediction, resolves its category from the rule
/// table, then gates on confidence: points are credited only when the label
/// matched a category AND confidence is strictly above [`ACCEPT_THRESHOLD`].
/// Rejected outcomes always carry `points_awarded = 0`.
pub fn decide(classification: &Classification) -> RewardOutcome {
    let best = classification.best();
    let category = categorize(&normalize(&best.label));
    let points = category.points();
    let accepted = best.confidence > ACCEPT_THRESHOLD && points > 0;

    let rejection = if accepted {
        None
    } else if points == 0 {
        Some(Rejection::NoMatch)
    } else {
        Some(Rejection::LowConfidence)
    };

    RewardOutcome {
        points_awarded: if accepted { points } else { 0 },
        matched_label: best.label.clone(),
        confidence: best.confidence,
        category,
        accepted,
        rejection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(entries: &[(&str, f32)]) -> Classification {
        Classification::new(
            entries
                .iter()
                .map(|(l, c)| Prediction::new(*l, *c))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_model_output_is_an_inference_error() {
        assert_eq!(
            Classification::new(Vec::new()).unwrap_err(),
            ScanError::InferenceError
        );
    }

    #[test]
    fn best_picks_maximum_confidence() {
        let c = classification(&[("Paper", 0.10), ("Tin Can", 0.85), ("Glass", 0.05)]);
        assert_eq!(c.best().label, "Tin Can");
    }

    #[test]
    fn best_breaks_ties_by_ranked_order() {
        let c = classification(&[("First", 0.50), ("Second", 0.50)]);
        assert_eq!(c.best().label, "First");
    }

    #[test]
    fn plastic_bottle_scores_twenty() {
        // Scenario: [("Plastic Bottle", 0.92), ("Tin Can", 0.05)]
        let outcome = decide(&classification(&[("Plastic Bottle", 0.92), ("Tin Can", 0.05)]));
        assert!(outcome.accepted);
        assert_eq!(outcome.points_awarded, 20);
        assert_eq!(outcome.category, Category::Plastic);
        assert_eq!(outcome.matched_label, "Plastic Bottle");
    }

    #[test]
    fn tin_can_scores_forty() {
        let outcome = decide(&classification(&[("Tin Can", 0.95)]));
        assert!(outcome.accepted);
        assert_eq!(outcome.points_awarded, 40);
        assert_eq!(outcome.category, Category::Metal);
    }

    #[test]
    fn unmatched_label_is_rejected_regardless_of_confidence() {
        let outcome = decide(&classification(&[("Paper", 0.99)]));
        assert!(!outcome.accepted);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(outcome.rejection, Some(Rejection::NoMatch));
    }

    #[test]
    fn matched_label_below_threshold_is_low_confidence() {
        let outcome = decide(&classification(&[("Tin Can", 0.50)]));
        assert!(!outcome.accepted);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(outcome.category, Category::Metal);
        assert_eq!(outcome.rejection, Some(Rejection::LowConfidence));
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let at = decide(&classification(&[("Plastic Bottle", 0.70)]));
        assert!(!at.accepted);
        assert_eq!(at.rejection, Some(Rejection::LowConfidence));

        let above = decide(&classification(&[("Plastic Bottle", 0.700_000_1)]));
        assert!(above.accepted);
        assert_eq!(above.points_awarded, 20);
    }

    #[test]
    fn labels_normalize_case_and_whitespace() {
        let outcome = decide(&classification(&[("  PLASTIC  Bottle ", 0.90)]));
        assert!(outcome.accepted);
        assert_eq!(outcome.points_awarded, 20);
    }

    #[test]
    fn plastic_rule_wins_over_metal_rule() {
        // "bottlecan" matches both rule rows; the table is ordered, plastic first.
        let outcome = decide(&classification(&[("Bottle Can", 0.90)]));
        assert_eq!(outcome.category, Category::Plastic);
        assert_eq!(outcome.points_awarded, 20);
    }
}
