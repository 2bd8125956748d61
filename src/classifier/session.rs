use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use ort::session::Session;

use super::error::ClassifierError;
use super::inference;
use super::preprocess::InputTensor;
use super::vocabulary::LabelVocabulary;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Failed initializations may be retried this many times before the session
/// is permanently failed for the process lifetime.
const MAX_INIT_ATTEMPTS: u32 = 3;

#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Loading,
    Ready {
        session: Session,
        vocabulary: Arc<LabelVocabulary>,
    },
    Failed {
        attempts: u32,
        reason: String,
    },
}

/// Owns the loaded ONNX session and the label vocabulary, and gates every
/// inference call on readiness.
///
/// Lifecycle: `Uninitialized -> Loading -> Ready`, or `Loading -> Failed`.
/// `initialize` is idempotent once Ready, and the whole load runs under the
/// state lock so two concurrent calls can never race-load the model. The
/// same lock is held across each forward pass, serializing overlapping
/// classification requests onto the single native handle.
#[derive(Debug)]
pub struct ModelSession {
    model_path: PathBuf,
    vocabulary_path: PathBuf,
    runtime_config: RuntimeConfig,
    state: Mutex<SessionState>,
}

impl ModelSession {
    /// Creates a session in the `Uninitialized` state. No resources are
    /// loaded until [`ModelSession::initialize`] is called.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        vocabulary_path: Q,
        runtime_config: RuntimeConfig,
    ) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            vocabulary_path: vocabulary_path.as_ref().to_path_buf(),
            state: Mutex::new(SessionState::Uninitialized),
            runtime_config,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn vocabulary_path(&self) -> &Path {
        &self.vocabulary_path
    }

    /// Loads the model artifact and the label vocabulary.
    ///
    /// A call while already Ready is a no-op. After a failure, up to
    /// [`MAX_INIT_ATTEMPTS`] total attempts are permitted; once the budget
    /// is exhausted the session stays Failed until process restart.
    pub fn initialize(&self) -> Result<(), ClassifierError> {
        let mut state = self.lock_state()?;

        let prior_attempts = match &*state {
            SessionState::Ready { .. } => return Ok(()),
            SessionState::Uninitialized | SessionState::Loading => 0,
            SessionState::Failed { attempts, reason } => {
                if *attempts >= MAX_INIT_ATTEMPTS {
                    return Err(ClassifierError::Initialization(format!(
                        "Giving up after {} failed attempts; last error: {}",
                        attempts, reason
                    )));
                }
                warn!(
                    "Retrying session initialization (attempt {} of {})",
                    attempts + 1,
                    MAX_INIT_ATTEMPTS
                );
                *attempts
            }
        };

        *state = SessionState::Loading;
        match self.load() {
            Ok((session, vocabulary)) => {
                info!(
                    "Model session ready: {} classes from {}",
                    vocabulary.len(),
                    self.vocabulary_path.display()
                );
                *state = SessionState::Ready {
                    session,
                    vocabulary: Arc::new(vocabulary),
                };
                Ok(())
            }
            Err(e) => {
                error!("Session initialization failed: {}", e);
                *state = SessionState::Failed {
                    attempts: prior_attempts + 1,
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Pure readiness query, no side effects.
    pub fn is_ready(&self) -> bool {
        self.lock_state()
            .map(|state| matches!(&*state, SessionState::Ready { .. }))
            .unwrap_or(false)
    }

    /// The vocabulary of a Ready session.
    pub fn vocabulary(&self) -> Result<Arc<LabelVocabulary>, ClassifierError> {
        let state = self.lock_state()?;
        match &*state {
            SessionState::Ready { vocabulary, .. } => Ok(Arc::clone(vocabulary)),
            _ => Err(not_ready(&state)),
        }
    }

    /// Runs one forward pass, returning a score vector of vocabulary length.
    ///
    /// The state lock is held for the duration of the call, so overlapping
    /// requests execute one at a time. An inference failure leaves the
    /// session Ready; only initialization errors change its state.
    pub fn run(&self, tensor: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
        let mut state = self.lock_state()?;
        match &mut *state {
            SessionState::Ready { session, vocabulary } => {
                inference::execute(session, tensor, vocabulary.len())
            }
            _ => Err(not_ready(&state)),
        }
    }

    fn load(&self) -> Result<(Session, LabelVocabulary), ClassifierError> {
        if !self.model_path.exists() {
            return Err(ClassifierError::Initialization(format!(
                "Model file not found: {}",
                self.model_path.display()
            )));
        }

        let vocabulary = LabelVocabulary::from_file(&self.vocabulary_path)?;
        info!(
            "Loaded vocabulary of {} classes from {}",
            vocabulary.len(),
            self.vocabulary_path.display()
        );

        let session = create_session_builder(&self.runtime_config)
            .map_err(|e| {
                ClassifierError::Initialization(format!(
                    "Failed to create session builder: {}",
                    e
                ))
            })?
            .commit_from_file(&self.model_path)
            .map_err(|e| {
                ClassifierError::Initialization(format!(
                    "Failed to load model {}: {}",
                    self.model_path.display(),
                    e
                ))
            })?;

        inference::validate_model(&session)?;
        info!("Model structure validated successfully");

        Ok((session, vocabulary))
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, SessionState>, ClassifierError> {
        self.state
            .lock()
            .map_err(|_| ClassifierError::Inference("Session state lock poisoned".into()))
    }
}

fn not_ready(state: &SessionState) -> ClassifierError {
    let phase = match state {
        SessionState::Uninitialized => "session has not been initialized",
        SessionState::Loading => "session is still loading",
        SessionState::Failed { .. } => "session initialization failed",
        SessionState::Ready { .. } => "session is ready",
    };
    ClassifierError::NotReady(phase.to_string())
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ModelSession>();
    }
};
