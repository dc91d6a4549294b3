use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a scan session can hit between "open camera" and "classify".
///
/// Every variant's `Display` string is the user-facing description shown by
/// the notifier; hardware and model errors are mapped into these at the
/// session boundary and never reach the UI raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ScanError {
    #[error("Please allow camera access in browser settings.")]
    PermissionDenied,

    #[error("No usable camera was found on this device.")]
    CameraUnavailable,

    #[error("The camera has not produced a frame yet. Try again in a moment.")]
    NotReady,

    #[error("Please wait a few seconds and try again.")]
    ModelNotReady,

    #[error("The detection model failed to load.")]
    ModelLoadError,

    #[error("Error analyzing the image.")]
    InferenceError,
}

impl ScanError {
    /// Short toast title for this failure.
    pub fn title(&self) -> &'static str {
        match self {
            ScanError::PermissionDenied => "Camera blocked",
            ScanError::CameraUnavailable => "Camera not supported",
            ScanError::NotReady => "Camera warming up",
            ScanError::ModelNotReady => "Model not ready",
            ScanError::ModelLoadError => "Model load failed",
            ScanError::InferenceError => "Detection failed",
        }
    }
}
