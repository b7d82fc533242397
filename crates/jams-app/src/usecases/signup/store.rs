use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use jams_core::ports::SignupFormStatePort;
use jams_core::signup::{FormStep, SignupFormData, SignupFormPatch, SignupFormState};

/// Wizard position and collected values, mirrored to durable storage.
///
/// Shared between the navigator and the submission coordinator, so it is
/// handed around as `Arc<SignupFormStore>`. Every mutation writes the new
/// snapshot through [`SignupFormStatePort`]; a failed write is logged and
/// otherwise ignored, the in-memory state stays authoritative.
pub struct SignupFormStore {
    state: Mutex<SignupFormState>,
    persistence: Arc<dyn SignupFormStatePort>,
}

impl SignupFormStore {
    /// Creates a store at the initial state without reading storage.
    pub fn new(persistence: Arc<dyn SignupFormStatePort>) -> Self {
        Self::with_state(SignupFormState::default(), persistence)
    }

    pub fn with_state(state: SignupFormState, persistence: Arc<dyn SignupFormStatePort>) -> Self {
        Self {
            state: Mutex::new(state),
            persistence,
        }
    }

    /// Creates a store from the persisted snapshot.
    ///
    /// A missing snapshot starts a fresh wizard, and so does one that cannot
    /// be read.
    pub async fn restore(persistence: Arc<dyn SignupFormStatePort>) -> Self {
        let state = match persistence.load().await {
            Ok(Some(state)) => {
                debug!(step = ?state.current_step, "restored signup form state");
                state
            }
            Ok(None) => SignupFormState::default(),
            Err(err) => {
                warn!(error = %err, "failed to restore signup form state, starting over");
                SignupFormState::default()
            }
        };
        Self::with_state(state, persistence)
    }

    /// Returns the store wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn snapshot(&self) -> SignupFormState {
        self.state.lock().await.clone()
    }

    pub async fn current_step(&self) -> FormStep {
        self.state.lock().await.current_step
    }

    pub async fn is_first_step(&self) -> bool {
        self.state.lock().await.is_first_step()
    }

    pub async fn is_last_step(&self) -> bool {
        self.state.lock().await.is_last_step()
    }

    /// Jump to `step` unconditionally.
    pub async fn set_current_step(&self, step: FormStep) {
        self.mutate(|state| state.current_step = step).await;
    }

    /// Advance one step, staying on the last one. Returns the new position.
    pub async fn next_step(&self) -> FormStep {
        self.mutate(|state| {
            state.current_step = state.current_step.next();
            state.current_step
        })
        .await
    }

    /// Go back one step, staying on the first one. Returns the new position.
    pub async fn previous_step(&self) -> FormStep {
        self.mutate(|state| {
            state.current_step = state.current_step.previous();
            state.current_step
        })
        .await
    }

    /// Shallow-merge `patch` into the collected values.
    pub async fn update_form_data(&self, patch: SignupFormPatch) {
        self.mutate(|state| state.form_data.merge(patch)).await;
    }

    /// Back to the first step with every field empty.
    pub async fn reset_form(&self) {
        self.mutate(|state| *state = SignupFormState::default()).await;
    }

    /// Everything collected so far.
    pub async fn get_all_form_data(&self) -> SignupFormData {
        self.state.lock().await.form_data.clone()
    }

    async fn mutate<R>(&self, apply: impl FnOnce(&mut SignupFormState) -> R) -> R {
        // Held across the write so snapshots reach storage in mutation order.
        let mut guard = self.state.lock().await;
        let result = apply(&mut *guard);
        if let Err(err) = self.persistence.save(&*guard).await {
            warn!(error = %err, "failed to persist signup form state");
        }
        result
    }
}
