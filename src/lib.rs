//! A thread-safe, fully offline Jawi letterform classifier using ONNX models.
//!
//! The pipeline takes raw encoded image bytes (camera capture, gallery pick,
//! file on disk), decodes and resizes them to the classifier's 224x224 input,
//! normalizes the pixels into an NCHW tensor, runs a single forward pass and
//! decodes the raw scores into one letterform label such as `"Ca_Isolated"`.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use huruf::{Classifier, BuiltinModel};
//!
//! let classifier = Classifier::builder()
//!     .with_model(BuiltinModel::JawiLetterNet)?
//!     .build()?;
//!
//! let bytes = std::fs::read("letter.png")?;
//! let result = classifier.classify(&bytes)?;
//! println!("Predicted letterform: {}", result.label);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is thread-safe and can be shared across threads using `Arc`.
//! The underlying model session serializes forward passes internally, so
//! overlapping `classify` calls never race on the native inference handle:
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use huruf::{Classifier, BuiltinModel};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let classifier = Arc::new(Classifier::builder()
//!     .with_model(BuiltinModel::JawiLetterNet)?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         let bytes = std::fs::read("letter.png").unwrap();
//!         classifier.classify(&bytes).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod model_assets;
pub mod models;
mod runtime;

pub use classifier::{
    resolve_label, select_top1, softmax, Classification, Classifier, ClassifierBuilder,
    ClassifierError, ClassifierInfo, ImagePreprocessor, LabelVocabulary, ModelSession,
    ScoreInterpreter, UNRECOGNIZED_LABEL,
};
pub use model_assets::{AssetError, ModelAssets};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
