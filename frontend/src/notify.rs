//! Notification records handed to the toast renderer: one per session
//! outcome, fire-and-forget, auto-dismissed after a few seconds.

use shared::{Rejection, SessionOutcome};

/// How long a toast stays on screen before auto-dismissal.
pub const TOAST_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Maps a terminal session outcome to its user-visible notification.
pub fn toast_for(id: u64, outcome: &SessionOutcome) -> Toast {
    match outcome {
        SessionOutcome::Accepted(o) => Toast {
            id,
            title: format!("+{} Eco Points!", o.points_awarded),
            description: format!("{} detected.", o.matched_label),
            severity: Severity::Info,
        },
        SessionOutcome::ManualEntry(o) => Toast {
            id,
            title: format!("+{} Eco Points!", o.points_awarded),
            description: format!("{} added manually.", o.matched_label),
            severity: Severity::Info,
        },
        SessionOutcome::Rejected(o) => match o.rejection {
            Some(Rejection::LowConfidence) => Toast {
                id,
                title: "Low confidence".into(),
                description: "Try scanning again under good lighting.".into(),
                severity: Severity::Error,
            },
            _ => Toast {
                id,
                title: "Invalid Item".into(),
                description: "This item is not recognized.".into(),
                severity: Severity::Error,
            },
        },
        SessionOutcome::Failed(err) => Toast {
            id,
            title: err.title().into(),
            description: err.to_string(),
            severity: Severity::Error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, RewardOutcome, ScanError};

    fn accepted(points: u32, label: &str) -> RewardOutcome {
        RewardOutcome {
            points_awarded: points,
            matched_label: label.into(),
            confidence: 0.92,
            category: Category::Plastic,
            accepted: true,
            rejection: None,
        }
    }

    #[test]
    fn accepted_toast_carries_amount_and_label() {
        let toast = toast_for(1, &SessionOutcome::Accepted(accepted(20, "Plastic Bottle")));
        assert_eq!(toast.title, "+20 Eco Points!");
        assert_eq!(toast.description, "Plastic Bottle detected.");
        assert_eq!(toast.severity, Severity::Info);
    }

    #[test]
    fn manual_toast_is_worded_differently() {
        let toast = toast_for(1, &SessionOutcome::ManualEntry(accepted(40, "Tin Can")));
        assert_eq!(toast.description, "Tin Can added manually.");
        assert_eq!(toast.severity, Severity::Info);
    }

    #[test]
    fn rejections_and_failures_are_errors() {
        let mut rejected = accepted(0, "Paper");
        rejected.accepted = false;
        rejected.rejection = Some(Rejection::NoMatch);
        let toast = toast_for(1, &SessionOutcome::Rejected(rejected));
        assert_eq!(toast.title, "Invalid Item");
        assert_eq!(toast.severity, Severity::Error);

        let toast = toast_for(2, &SessionOutcome::Failed(ScanError::PermissionDenied));
        assert_eq!(toast.title, "Camera blocked");
        assert_eq!(toast.severity, Severity::Error);
    }
}
