use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use jams_app::usecases::{
    BackOutcome, CurrentSession, NavigationError, NextOutcome, SignOut, SignupFormStore,
    StepNavigator, SubmissionCoordinator, SubmissionError,
};
use jams_core::identity::{
    AuthError, AuthSession, AuthUser, Credentials, SignUpRequest, SignUpResponse,
};
use jams_core::ports::{AuthSessionPort, IdentityPort, SignupFormStatePort};
use jams_core::signup::{FormStep, SignupFormState, StepInput, SubmissionPhase};
use jams_infra::auth_session::FileAuthSessionRepository;
use jams_infra::signup_form::{FileSignupFormStateRepository, InMemorySignupFormStateRepository};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SignUp { email: String, phone: String },
    SignIn { email: String },
    GetUser { token: String },
    SignOut { token: String },
}

#[derive(Default)]
struct RecordingIdentity {
    calls: Mutex<Vec<Call>>,
    signup_error: Option<AuthError>,
    login_error: Option<AuthError>,
    user_error: Option<AuthError>,
}

impl RecordingIdentity {
    fn rejecting_signup(message: &str) -> Self {
        Self {
            signup_error: Some(AuthError::new(message, 422)),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn user(email: &str) -> AuthUser {
        AuthUser {
            id: "user-1".into(),
            email: Some(email.to_string()),
            user_metadata: serde_json::Value::Null,
            created_at: None,
        }
    }
}

#[async_trait]
impl IdentityPort for RecordingIdentity {
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError> {
        self.calls.lock().unwrap().push(Call::SignUp {
            email: request.email.clone(),
            phone: request.metadata.phone_number.clone(),
        });
        if let Some(err) = &self.signup_error {
            return Err(err.clone());
        }
        Ok(SignUpResponse {
            user: Self::user(&request.email),
            session: None,
        })
    }

    async fn sign_in_with_password(
        &self,
        credentials: Credentials,
    ) -> Result<AuthSession, AuthError> {
        self.calls.lock().unwrap().push(Call::SignIn {
            email: credentials.email.clone(),
        });
        if let Some(err) = &self.login_error {
            return Err(err.clone());
        }
        Ok(AuthSession {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            user: Self::user(&credentials.email),
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        self.calls.lock().unwrap().push(Call::GetUser {
            token: access_token.to_string(),
        });
        if let Some(err) = &self.user_error {
            return Err(err.clone());
        }
        Ok(Self::user("john.doe@example.com"))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.calls.lock().unwrap().push(Call::SignOut {
            token: access_token.to_string(),
        });
        Ok(())
    }
}

async fn navigator(
    persistence: Arc<dyn SignupFormStatePort>,
    identity: Arc<RecordingIdentity>,
) -> StepNavigator {
    let store = SignupFormStore::restore(persistence).await.arc();
    let submission = Arc::new(SubmissionCoordinator::new(identity, store.clone()));
    StepNavigator::new(store, submission)
}

const ANSWERS: [&str; 5] = [
    "  John Doe ",
    "John.Doe@Example.com",
    "Password123!",
    "University of Sydney",
    "0412345678",
];

#[tokio::test]
async fn full_wizard_registers_and_clears_progress() {
    let identity = Arc::new(RecordingIdentity::default());
    let persistence = Arc::new(InMemorySignupFormStateRepository::new());
    let nav = navigator(persistence.clone(), identity.clone()).await;

    for (index, answer) in ANSWERS.iter().enumerate() {
        let step = nav.store().current_step().await;
        let outcome = nav
            .submit_step(StepInput::for_step(step, *answer))
            .await
            .unwrap();

        if index < ANSWERS.len() - 1 {
            assert_eq!(outcome, NextOutcome::Advanced(step.next()));
        } else {
            let NextOutcome::Submitted(outcome) = outcome else {
                panic!("expected submission on last step");
            };
            assert_eq!(outcome.user.email.as_deref(), Some("john.doe@example.com"));
        }
    }

    assert_eq!(
        identity.calls(),
        vec![
            Call::SignUp {
                email: "john.doe@example.com".into(),
                phone: "0412345678".into(),
            },
            Call::SignIn {
                email: "john.doe@example.com".into(),
            },
        ]
    );
    assert_eq!(nav.submission().phase().await, SubmissionPhase::Success);
    assert_eq!(
        persistence.load().await.unwrap(),
        Some(SignupFormState::default())
    );
}

#[tokio::test]
async fn progress_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("signup-form-storage.json");
    let identity = Arc::new(RecordingIdentity::default());

    {
        let repo = Arc::new(FileSignupFormStateRepository::new(state_path.clone()));
        let nav = navigator(repo, identity.clone()).await;
        nav.submit_step(StepInput::Name("Ann Lee".into())).await.unwrap();
        nav.submit_step(StepInput::Email("ann@example.com".into()))
            .await
            .unwrap();
    }

    let repo = Arc::new(FileSignupFormStateRepository::new(state_path));
    let nav = navigator(repo, identity.clone()).await;

    assert_eq!(nav.store().current_step().await, FormStep::Password);
    let data = nav.store().get_all_form_data().await;
    assert_eq!(data.name, "Ann Lee");
    assert_eq!(data.email, "ann@example.com");
    assert!(identity.calls().is_empty());
}

#[tokio::test]
async fn rejected_signup_keeps_data_and_skips_login() {
    let identity = Arc::new(RecordingIdentity::rejecting_signup("User already registered"));
    let nav = navigator(Arc::new(InMemorySignupFormStateRepository::new()), identity.clone()).await;

    for answer in &ANSWERS[..4] {
        let step = nav.store().current_step().await;
        nav.submit_step(StepInput::for_step(step, *answer))
            .await
            .unwrap();
    }

    let err = nav
        .submit_step(StepInput::Phone("+61412345678".into()))
        .await
        .unwrap_err();

    match err {
        NavigationError::Submission(SubmissionError::Signup(auth)) => {
            assert_eq!(auth.message, "User already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(identity.calls().len(), 1);
    assert_eq!(nav.store().current_step().await, FormStep::Phone);
    assert_eq!(
        nav.store().get_all_form_data().await.phone_number,
        "+61412345678"
    );
}

#[tokio::test]
async fn back_walks_to_first_step_then_leaves() {
    let identity = Arc::new(RecordingIdentity::default());
    let nav = navigator(
        Arc::new(InMemorySignupFormStateRepository::with_state(SignupFormState {
            current_step: FormStep::Password,
            ..SignupFormState::default()
        })),
        identity,
    )
    .await;

    assert_eq!(nav.handle_back().await, BackOutcome::Moved(FormStep::Email));
    assert_eq!(nav.handle_back().await, BackOutcome::Moved(FormStep::Name));
    assert_eq!(nav.handle_back().await, BackOutcome::LeaveFlow);
}

#[tokio::test]
async fn corrupt_snapshot_starts_fresh_wizard() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("signup-form-storage.json");
    tokio::fs::write(
        &state_path,
        r#"{"state":{"currentStep":9,"formData":{}},"version":0}"#,
    )
    .await
    .unwrap();

    let nav = navigator(
        Arc::new(FileSignupFormStateRepository::new(state_path)),
        Arc::new(RecordingIdentity::default()),
    )
    .await;

    assert_eq!(nav.store().snapshot().await, SignupFormState::default());
}

#[tokio::test]
async fn registration_session_is_resumed_then_signed_out() {
    let temp_dir = TempDir::new().unwrap();
    let sessions: Arc<dyn AuthSessionPort> = Arc::new(FileAuthSessionRepository::with_defaults(
        temp_dir.path().to_path_buf(),
    ));
    let identity = Arc::new(RecordingIdentity::default());

    let store = SignupFormStore::restore(Arc::new(InMemorySignupFormStateRepository::new()))
        .await
        .arc();
    let submission = Arc::new(
        SubmissionCoordinator::new(identity.clone(), store.clone())
            .with_session_store(sessions.clone()),
    );
    let nav = StepNavigator::new(store, submission);
    for (step, answer) in FormStep::ALL.iter().zip(ANSWERS) {
        nav.submit_step(StepInput::for_step(*step, answer)).await.unwrap();
    }

    // A later run picks the session up from disk.
    let resumed = CurrentSession::new(identity.clone(), sessions.clone())
        .execute()
        .await
        .unwrap()
        .expect("session kept after registration");
    assert_eq!(resumed.user.email.as_deref(), Some("john.doe@example.com"));

    assert!(SignOut::new(identity.clone(), sessions.clone())
        .execute()
        .await
        .unwrap());
    assert!(sessions.load().await.unwrap().is_none());
    assert_eq!(
        &identity.calls()[2..],
        &[
            Call::GetUser {
                token: "access".into()
            },
            Call::SignOut {
                token: "access".into()
            },
        ]
    );
}

#[tokio::test]
async fn expired_session_is_dropped_on_resume() {
    let temp_dir = TempDir::new().unwrap();
    let sessions: Arc<dyn AuthSessionPort> = Arc::new(FileAuthSessionRepository::with_defaults(
        temp_dir.path().to_path_buf(),
    ));
    let identity = Arc::new(RecordingIdentity {
        user_error: Some(AuthError::new("Session expired", 401)),
        ..RecordingIdentity::default()
    });
    let session = identity
        .sign_in_with_password(Credentials {
            email: "john.doe@example.com".into(),
            password: "Password123!".into(),
        })
        .await
        .unwrap();
    sessions.save(&session).await.unwrap();

    let err = CurrentSession::new(identity, sessions.clone())
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Session expired");
    assert!(sessions.load().await.unwrap().is_none());
}
