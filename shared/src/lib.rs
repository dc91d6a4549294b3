pub mod catalog;
pub mod classify;
pub mod error;
pub mod ledger;
pub mod session;

pub use catalog::{CatalogItem, LeaderboardEntry, Quote, Reward};
pub use classify::{Category, Classification, Frame, Prediction, Rejection, RewardOutcome};
pub use error::ScanError;
pub use ledger::PointsLedger;
pub use session::{CaptureSession, Command, SessionId, SessionOutcome, SessionState};
