use ort::Error as OrtError;

/// Represents the different types of errors that can occur in the letterform
/// classifier.
///
/// All four kinds surface synchronously to the caller of the classification
/// entry point; none are retried internally and none are swallowed. The only
/// case handled internally is an out-of-vocabulary class index, which becomes
/// the `"Unrecognized"` sentinel label rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The model artifact or label vocabulary is missing, unreadable, or
    /// fails schema validation. Fatal to the session.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// The input bytes are not a decodable image. Recoverable per request;
    /// the caller should prompt for a new capture or selection.
    #[error("Decode error: {0}")]
    Decode(String),
    /// The backend call failed, or its output length does not match the
    /// vocabulary. Recoverable per request; a length mismatch indicates a
    /// model/vocabulary version skew.
    #[error("Inference error: {0}")]
    Inference(String),
    /// Classification was attempted before `initialize()` completed
    /// successfully. A caller-contract violation, not a runtime condition.
    #[error("Classifier is not ready: {0}")]
    NotReady(String),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::Inference(err.to_string())
    }
}

impl From<crate::model_assets::AssetError> for ClassifierError {
    fn from(err: crate::model_assets::AssetError) -> Self {
        ClassifierError::Initialization(err.to_string())
    }
}
