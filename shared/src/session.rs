//! The capture session state machine.
//!
//! One `CaptureSession` is one user attempt to scan-and-classify an item:
//! `Idle → Requesting → Live → Capturing → Resolved | Failed`, with
//! `Cancelled` reachable from any non-terminal state. The machine is purely
//! event-driven: the host feeds it completions of the async browser calls and
//! executes the [`Command`]s it emits in return. Keeping the side effects in
//! the host makes the sequencing and exactly-once rules testable natively.

use crate::catalog::CatalogItem;
use crate::classify::{decide, Classification, Frame, RewardOutcome};
use crate::error::ScanError;

/// Identifies a session so the host can discard completions that arrive
/// after the session they belong to was torn down.
pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Requesting,
    Live,
    Capturing,
    Resolved(RewardOutcome),
    Failed(ScanError),
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Resolved(_) | SessionState::Failed(_) | SessionState::Cancelled
        )
    }
}

/// Terminal result the host is told about, exactly once per session that
/// reaches `Resolved` or `Failed`. Cancelled sessions produce none.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Accepted(RewardOutcome),
    Rejected(RewardOutcome),
    /// Manual catalog entry, accepted unconditionally.
    ManualEntry(RewardOutcome),
    Failed(ScanError),
}

impl SessionOutcome {
    /// The outcome the ledger should credit, if any.
    pub fn credited(&self) -> Option<&RewardOutcome> {
        match self {
            SessionOutcome::Accepted(o) | SessionOutcome::ManualEntry(o) => Some(o),
            SessionOutcome::Rejected(_) | SessionOutcome::Failed(_) => None,
        }
    }
}

/// Side effect the host must run in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Request a camera stream.
    Acquire,
    /// Grab a still frame from the live stream.
    GrabFrame,
    /// Run the classifier over the grabbed frame.
    Classify(Frame),
    /// Stop the camera stream. Emitted at most once per acquired stream.
    Release,
    /// Surface the terminal outcome: mutate the ledger (accepted outcomes
    /// only) and show one notification.
    Notify(SessionOutcome),
}

pub struct CaptureSession {
    id: SessionId,
    state: SessionState,
    holds_stream: bool,
}

impl CaptureSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            state: SessionState::Idle,
            holds_stream: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// `Idle → Requesting`: kick off camera acquisition.
    pub fn start(&mut self) -> Vec<Command> {
        if self.state != SessionState::Idle {
            return self.reject("start");
        }
        self.state = SessionState::Requesting;
        vec![Command::Acquire]
    }

    /// Acquisition succeeded, `Requesting → Live`. A stream that lands after
    /// cancellation is not adopted; the host is told to stop it.
    pub fn stream_acquired(&mut self) -> Vec<Command> {
        match self.state {
            SessionState::Requesting => {
                self.state = SessionState::Live;
                self.holds_stream = true;
                Vec::new()
            }
            SessionState::Cancelled => vec![Command::Release],
            _ => self.reject("stream_acquired"),
        }
    }

    /// Acquisition failed, `Requesting → Failed`.
    pub fn acquire_failed(&mut self, err: ScanError) -> Vec<Command> {
        if self.state != SessionState::Requesting {
            return self.reject("acquire_failed");
        }
        self.fail(err)
    }

    /// User hit capture, `Live → Capturing`: grab a frame.
    pub fn capture(&mut self) -> Vec<Command> {
        if self.state != SessionState::Live {
            return self.reject("capture");
        }
        self.state = SessionState::Capturing;
        vec![Command::GrabFrame]
    }

    /// A frame is in hand; hand it to the classifier. Frames racing a
    /// cancellation are dropped.
    pub fn frame_grabbed(&mut self, frame: Frame) -> Vec<Command> {
        if self.state != SessionState::Capturing {
            return self.reject("frame_grabbed");
        }
        vec![Command::Classify(frame)]
    }

    pub fn frame_failed(&mut self, err: ScanError) -> Vec<Command> {
        if self.state != SessionState::Capturing {
            return self.reject("frame_failed");
        }
        self.fail(err)
    }

    /// Classification finished, `Capturing → Resolved`: apply the decision
    /// policy. Results arriving after cancellation are dropped, not queued.
    pub fn classified(&mut self, classification: &Classification) -> Vec<Command> {
        if self.state != SessionState::Capturing {
            return self.reject("classified");
        }
        let outcome = decide(classification);
        self.state = SessionState::Resolved(outcome.clone());

        let notice = if outcome.accepted {
            SessionOutcome::Accepted(outcome)
        } else {
            SessionOutcome::Rejected(outcome)
        };
        let mut commands = self.release_if_held();
        commands.push(Command::Notify(notice));
        commands
    }

    pub fn classify_failed(&mut self, err: ScanError) -> Vec<Command> {
        if self.state != SessionState::Capturing {
            return self.reject("classify_failed");
        }
        self.fail(err)
    }

    /// Explicit user cancel or host teardown. Releases the stream if one is
    /// held, emits no notification, and is a no-op on terminal sessions.
    pub fn cancel(&mut self) -> Vec<Command> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.state = SessionState::Cancelled;
        self.release_if_held()
    }

    /// Manual "I recycled this" entry: `Idle → Resolved` directly, bypassing
    /// the camera and the classifier, with the catalog item's fixed value and
    /// unconditional acceptance.
    pub fn manual_add(&mut self, item: &CatalogItem) -> Vec<Command> {
        if self.state != SessionState::Idle {
            return self.reject("manual_add");
        }
        let outcome = RewardOutcome {
            points_awarded: item.points,
            matched_label: item.name.to_string(),
            confidence: 1.0,
            category: item.category,
            accepted: true,
            rejection: None,
        };
        self.state = SessionState::Resolved(outcome.clone());
        vec![Command::Notify(SessionOutcome::ManualEntry(outcome))]
    }

    fn fail(&mut self, err: ScanError) -> Vec<Command> {
        self.state = SessionState::Failed(err.clone());
        let mut commands = self.release_if_held();
        commands.push(Command::Notify(SessionOutcome::Failed(err)));
        commands
    }

    fn release_if_held(&mut self) -> Vec<Command> {
        if self.holds_stream {
            self.holds_stream = false;
            vec![Command::Release]
        } else {
            Vec::new()
        }
    }

    fn reject(&self, event: &str) -> Vec<Command> {
        log::warn!(
            "session {}: dropping event `{}` in state {:?}",
            self.id,
            event,
            self.state
        );
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog_item;
    use crate::classify::Prediction;
    use crate::ledger::PointsLedger;

    fn classification(entries: &[(&str, f32)]) -> Classification {
        Classification::new(
            entries
                .iter()
                .map(|(l, c)| Prediction::new(*l, *c))
                .collect(),
        )
        .unwrap()
    }

    fn frame() -> Frame {
        Frame {
            pixels: vec![0; 16],
            width: 2,
            height: 2,
            captured_at_ms: 0.0,
        }
    }

    /// Drives a session to `Live`.
    fn live_session() -> CaptureSession {
        let mut session = CaptureSession::new(1);
        assert_eq!(session.start(), vec![Command::Acquire]);
        assert_eq!(session.stream_acquired(), Vec::new());
        session
    }

    /// Runs a full scan against a ledger, mirroring what the host does with
    /// the emitted commands, and returns the notified outcomes.
    fn run_scan(
        id: SessionId,
        entries: &[(&str, f32)],
        ledger: &mut PointsLedger,
    ) -> Vec<SessionOutcome> {
        let mut session = CaptureSession::new(id);
        session.start();
        session.stream_acquired();
        session.capture();
        session.frame_grabbed(frame());
        let commands = session.classified(&classification(entries));

        let mut notified = Vec::new();
        for command in commands {
            if let Command::Notify(outcome) = command {
                if let Some(o) = outcome.credited() {
                    ledger.apply(o);
                }
                notified.push(outcome);
            }
        }
        notified
    }

    #[test]
    fn happy_path_emits_commands_in_sequence() {
        let mut session = live_session();
        assert_eq!(*session.state(), SessionState::Live);

        assert_eq!(session.capture(), vec![Command::GrabFrame]);
        let f = frame();
        assert_eq!(session.frame_grabbed(f.clone()), vec![Command::Classify(f)]);

        let commands = session.classified(&classification(&[("Plastic Bottle", 0.92)]));
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], Command::Release);
        match &commands[1] {
            Command::Notify(SessionOutcome::Accepted(o)) => {
                assert_eq!(o.points_awarded, 20);
                assert_eq!(o.matched_label, "Plastic Bottle");
            }
            other => panic!("expected accepted notify, got {other:?}"),
        }
        assert!(session.is_terminal());
    }

    #[test]
    fn acquire_failure_notifies_without_release() {
        let mut session = CaptureSession::new(1);
        session.start();
        let commands = session.acquire_failed(ScanError::PermissionDenied);
        // No stream was ever held, so no Release.
        assert_eq!(
            commands,
            vec![Command::Notify(SessionOutcome::Failed(
                ScanError::PermissionDenied
            ))]
        );
        assert_eq!(*session.state(), SessionState::Failed(ScanError::PermissionDenied));
    }

    #[test]
    fn classify_failure_releases_then_notifies() {
        let mut session = live_session();
        session.capture();
        session.frame_grabbed(frame());
        let commands = session.classify_failed(ScanError::InferenceError);
        assert_eq!(
            commands,
            vec![
                Command::Release,
                Command::Notify(SessionOutcome::Failed(ScanError::InferenceError)),
            ]
        );
    }

    #[test]
    fn cancel_while_live_releases_exactly_once() {
        let mut session = live_session();
        assert_eq!(session.cancel(), vec![Command::Release]);
        assert_eq!(*session.state(), SessionState::Cancelled);
        // Second cancel is a no-op, no double release.
        assert_eq!(session.cancel(), Vec::new());
    }

    #[test]
    fn late_classification_after_cancel_is_dropped() {
        let mut session = live_session();
        session.capture();
        assert_eq!(session.cancel(), vec![Command::Release]);

        // The in-flight classification resolves afterwards: no notification,
        // no further commands, state stays Cancelled.
        let commands = session.classified(&classification(&[("Tin Can", 0.95)]));
        assert_eq!(commands, Vec::new());
        assert_eq!(*session.state(), SessionState::Cancelled);
    }

    #[test]
    fn late_frame_after_cancel_is_dropped() {
        let mut session = live_session();
        session.capture();
        session.cancel();
        assert_eq!(session.frame_grabbed(frame()), Vec::new());
    }

    #[test]
    fn stream_arriving_after_cancel_is_stopped() {
        let mut session = CaptureSession::new(1);
        session.start();
        assert_eq!(session.cancel(), Vec::new());
        // Acquisition raced the cancel and won; the host must stop it.
        assert_eq!(session.stream_acquired(), vec![Command::Release]);
        assert_eq!(*session.state(), SessionState::Cancelled);
    }

    #[test]
    fn events_out_of_order_are_rejected() {
        let mut session = CaptureSession::new(1);
        assert_eq!(session.capture(), Vec::new());
        assert_eq!(session.frame_grabbed(frame()), Vec::new());
        assert_eq!(*session.state(), SessionState::Idle);

        session.start();
        // start twice is invalid.
        assert_eq!(session.start(), Vec::new());
        assert_eq!(*session.state(), SessionState::Requesting);
    }

    #[test]
    fn terminal_sessions_reject_restart() {
        let mut session = live_session();
        session.capture();
        session.frame_grabbed(frame());
        session.classified(&classification(&[("Tin Can", 0.95)]));
        assert!(session.is_terminal());
        assert_eq!(session.start(), Vec::new());
        assert_eq!(session.manual_add(catalog_item("tin").unwrap()), Vec::new());
    }

    #[test]
    fn manual_add_skips_camera_and_classifier() {
        let mut session = CaptureSession::new(1);
        let commands = session.manual_add(catalog_item("tin").unwrap());
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            Command::Notify(SessionOutcome::ManualEntry(o)) => {
                assert_eq!(o.points_awarded, 40);
                assert_eq!(o.matched_label, "Tin Can");
                assert!(o.accepted);
            }
            other => panic!("expected manual-entry notify, got {other:?}"),
        }
        assert!(matches!(session.state(), SessionState::Resolved(_)));
    }

    #[test]
    fn manual_add_credits_the_fixed_catalog_value() {
        let mut ledger = PointsLedger::new();
        let mut session = CaptureSession::new(1);
        for command in session.manual_add(catalog_item("tin").unwrap()) {
            if let Command::Notify(outcome) = command {
                if let Some(o) = outcome.credited() {
                    ledger.apply(o);
                }
            }
        }
        assert_eq!(ledger.total(), 40);
    }

    #[test]
    fn ledger_accumulates_only_accepted_sessions() {
        let mut ledger = PointsLedger::new();

        let a = run_scan(1, &[("Plastic Bottle", 0.92), ("Tin Can", 0.05)], &mut ledger);
        assert!(matches!(a[0], SessionOutcome::Accepted(_)));
        assert_eq!(ledger.total(), 20);

        let b = run_scan(2, &[("Tin Can", 0.95)], &mut ledger);
        assert!(matches!(b[0], SessionOutcome::Accepted(_)));
        assert_eq!(ledger.total(), 60);

        let c = run_scan(3, &[("Paper", 0.99)], &mut ledger);
        assert!(matches!(c[0], SessionOutcome::Rejected(_)));
        assert_eq!(ledger.total(), 60);

        let d = run_scan(4, &[("Tin Can", 0.50)], &mut ledger);
        assert!(matches!(d[0], SessionOutcome::Rejected(_)));
        assert_eq!(ledger.total(), 60);

        // A cancelled session contributes nothing.
        let mut cancelled = CaptureSession::new(5);
        cancelled.start();
        cancelled.stream_acquired();
        cancelled.cancel();
        assert_eq!(ledger.total(), 60);
    }

    #[test]
    fn exactly_one_notify_per_session() {
        let mut ledger = PointsLedger::new();
        for (id, entries) in [
            (1, &[("Plastic Bottle", 0.92)][..]),
            (2, &[("Paper", 0.99)][..]),
            (3, &[("Tin Can", 0.50)][..]),
        ] {
            let notified = run_scan(id, entries, &mut ledger);
            assert_eq!(notified.len(), 1, "session {id}");
        }
    }
}
