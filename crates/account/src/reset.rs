//! Password reset flow.
//!
//! A linear validate, then lookup, then update sequence with explicit
//! loading/error/success states and a delayed redirect to the login page.
//!
//! The whole submission is one future: dropping it (component teardown)
//! cancels the in-flight remote call and the pending redirect, so no
//! navigation happens after disposal. The flow is cheap to clone; clones
//! share the observable state, which is how a reactive shell holds one
//! handle for rendering and moves another into the submit task.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use jewelmart_core::{Navigator, Route};

use crate::remote::RemoteIdentityStore;

/// Fixed delay between the success message and the redirect to login.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// One-shot delay capability; the host supplies the clock.
///
/// Implementations must be cancel-safe: dropping the returned future
/// abandons the delay without side effects.
#[allow(async_fn_in_trait)]
pub trait RedirectTimer {
    async fn sleep(&self, delay: Duration);
}

/// Which local precondition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    MissingFields,
    PasswordMismatch,
}

impl core::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValidationFailure::MissingFields => f.write_str("all fields are required"),
            ValidationFailure::PasswordMismatch => f.write_str("passwords do not match"),
        }
    }
}

/// Terminal failure of a submission attempt. Never retried automatically;
/// the user must resubmit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResetError {
    /// A local precondition failed; no remote call was made.
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),

    /// The remote lookup found no account (or the lookup itself failed).
    #[error("no account found for email")]
    NotFound,

    /// The remote mutation failed; the stored password is unchanged.
    #[error("password update failed: {0}")]
    Remote(String),

    /// The remote store broke its contract; logged and shown generically.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ResetError {
    /// The single user-visible message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResetError::Validation(ValidationFailure::MissingFields) => "All fields are required.",
            ResetError::Validation(ValidationFailure::PasswordMismatch) => {
                "Passwords do not match."
            }
            ResetError::NotFound => "No account found with this email.",
            ResetError::Remote(_) => "Failed to reset password. Please try again.",
            ResetError::Unexpected(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    LookingUp,
    Updating,
    Succeeded,
    Failed(ResetError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// The single user-visible message slot. Last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: &'static str,
}

/// What became of a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission ran to completion and the redirect was performed.
    Completed,
    /// A prior submission was still in flight; this one was ignored with
    /// no state change and no remote call.
    AlreadyInFlight,
}

/// Check the three form fields. No remote call is ever made before this
/// passes.
pub fn validate_fields(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationFailure> {
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(ValidationFailure::MissingFields);
    }
    if password != confirm_password {
        return Err(ValidationFailure::PasswordMismatch);
    }
    Ok(())
}

/// State a reactive shell mirrors into the view.
#[derive(Debug, Clone, Default)]
struct Observable {
    state: FlowState,
    message: Option<StatusMessage>,
    loading: bool,
}

/// Clears the loading flag when a submission ends, including when its
/// future is dropped mid-flight, so a surviving flow handle never wedges.
struct LoadingGuard {
    observable: Arc<Mutex<Observable>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Ok(mut obs) = self.observable.lock() {
            obs.loading = false;
        }
    }
}

/// The password reset control flow.
///
/// Collaborators are injected: the remote identity store, the navigation
/// surface, and the redirect timer.
#[derive(Debug, Clone)]
pub struct PasswordResetFlow<R, N, T> {
    remote: R,
    navigator: N,
    timer: T,
    redirect_delay: Duration,
    observable: Arc<Mutex<Observable>>,
}

impl<R, N, T> PasswordResetFlow<R, N, T>
where
    R: RemoteIdentityStore,
    N: Navigator,
    T: RedirectTimer,
{
    pub fn new(remote: R, navigator: N, timer: T) -> Self {
        Self {
            remote,
            navigator,
            timer,
            redirect_delay: REDIRECT_DELAY,
            observable: Arc::new(Mutex::new(Observable::default())),
        }
    }

    /// Override the redirect delay (tests, demo shells).
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn state(&self) -> FlowState {
        self.observe(|obs| obs.state.clone())
    }

    /// The current user-visible message, if any.
    pub fn message(&self) -> Option<StatusMessage> {
        self.observe(|obs| obs.message.clone())
    }

    /// While true, the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.observe(|obs| obs.loading)
    }

    /// Whether the inputs should render in their errored style. All three
    /// are marked uniformly; there is no per-field highlighting.
    pub fn fields_errored(&self) -> bool {
        self.observe(|obs| matches!(obs.state, FlowState::Failed(_)))
    }

    /// Run one submission attempt to completion.
    ///
    /// Ordering guarantee: lookup completes strictly before the update is
    /// attempted; the update completes strictly before the success state
    /// and the redirect delay are armed. Exactly one navigation to the
    /// login destination happens on success.
    pub async fn submit(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SubmitOutcome, ResetError> {
        let accepted = self.mutate(|obs| {
            if obs.loading {
                return false;
            }
            obs.loading = true;
            obs.message = None;
            obs.state = FlowState::Validating;
            true
        });
        if !accepted {
            return Ok(SubmitOutcome::AlreadyInFlight);
        }

        let _guard = LoadingGuard {
            observable: Arc::clone(&self.observable),
        };

        match self.run(email, password, confirm_password).await {
            Ok(()) => Ok(SubmitOutcome::Completed),
            Err(err) => {
                self.mutate(|obs| {
                    obs.message = Some(StatusMessage {
                        kind: MessageKind::Error,
                        text: err.user_message(),
                    });
                    obs.state = FlowState::Failed(err.clone());
                    obs.loading = false;
                    true
                });
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ResetError> {
        validate_fields(email, password, confirm_password).map_err(ResetError::Validation)?;

        self.transition(FlowState::LookingUp);
        let found = match self.remote.find_by_email(email).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Err(ResetError::NotFound),
            Err(err) => {
                // Lookup failure and "no rows" are indistinguishable to the
                // user in the observed contract.
                tracing::warn!(%err, "account lookup failed");
                return Err(ResetError::NotFound);
            }
        };

        if found.email != email {
            tracing::error!(
                queried = %email,
                returned = %found.email,
                "remote store returned a record for a different email"
            );
            return Err(ResetError::Unexpected(
                "lookup returned a mismatched account".to_string(),
            ));
        }

        self.transition(FlowState::Updating);
        self.remote
            .update_password(email, password)
            .await
            .map_err(|err| ResetError::Remote(err.to_string()))?;

        self.mutate(|obs| {
            obs.state = FlowState::Succeeded;
            obs.message = Some(StatusMessage {
                kind: MessageKind::Success,
                text: "Password reset successfully! Redirecting...",
            });
            // Mirrors the observed contract: the control re-enables as soon
            // as the success message shows, while the redirect is pending.
            obs.loading = false;
            true
        });

        self.timer.sleep(self.redirect_delay).await;
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    fn observe<V>(&self, read: impl FnOnce(&Observable) -> V) -> V
    where
        V: Default,
    {
        match self.observable.lock() {
            Ok(obs) => read(&obs),
            Err(_) => V::default(),
        }
    }

    fn mutate(&self, write: impl FnOnce(&mut Observable) -> bool) -> bool {
        match self.observable.lock() {
            Ok(mut obs) => write(&mut obs),
            Err(_) => false,
        }
    }

    fn transition(&self, state: FlowState) {
        self.mutate(|obs| {
            obs.state = state;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MemoryIdentityStore, StoreError};
    use jewelmart_core::{Identity, RecordingNavigator};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Timer that completes immediately, recording each requested delay.
    #[derive(Debug, Default, Clone)]
    struct InstantTimer {
        slept: Arc<Mutex<Vec<Duration>>>,
    }

    impl InstantTimer {
        fn delays(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    impl RedirectTimer for InstantTimer {
        async fn sleep(&self, delay: Duration) {
            self.slept.lock().unwrap().push(delay);
        }
    }

    /// Timer that never completes; used to park a submission mid-redirect.
    #[derive(Debug, Clone)]
    struct NeverTimer;

    impl RedirectTimer for NeverTimer {
        async fn sleep(&self, _delay: Duration) {
            std::future::pending::<()>().await;
        }
    }

    /// Counts remote calls so tests can assert "zero remote calls".
    #[derive(Debug, Clone)]
    struct CountingStore<R> {
        inner: R,
        finds: Arc<AtomicUsize>,
        updates: Arc<AtomicUsize>,
    }

    impl<R> CountingStore<R> {
        fn new(inner: R) -> Self {
            Self {
                inner,
                finds: Arc::new(AtomicUsize::new(0)),
                updates: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn remote_calls(&self) -> usize {
            self.finds.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
        }
    }

    impl<R: RemoteIdentityStore> RemoteIdentityStore for CountingStore<R> {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_email(email).await
        }

        async fn update_password(
            &self,
            email: &str,
            new_password: &str,
        ) -> Result<(), StoreError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update_password(email, new_password).await
        }
    }

    /// Store whose lookup never completes; parks a submission mid-lookup.
    #[derive(Debug, Clone)]
    struct StalledStore;

    impl RemoteIdentityStore for StalledStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<Identity>, StoreError> {
            std::future::pending::<()>().await;
            Ok(None)
        }

        async fn update_password(&self, _email: &str, _pw: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Store whose update always fails after a successful lookup.
    #[derive(Debug, Clone)]
    struct FailingUpdateStore {
        inner: MemoryIdentityStore,
    }

    impl RemoteIdentityStore for FailingUpdateStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
            self.inner.find_by_email(email).await
        }

        async fn update_password(&self, _email: &str, _pw: &str) -> Result<(), StoreError> {
            Err(StoreError::Api(500, "write rejected".to_string()))
        }
    }

    /// Store that breaks the lookup contract by answering for another email.
    #[derive(Debug, Clone)]
    struct MismatchedStore;

    impl RemoteIdentityStore for MismatchedStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<Identity>, StoreError> {
            let mut identity = Identity::guest();
            identity.email = "someone-else@x.com".to_string();
            Ok(Some(identity))
        }

        async fn update_password(&self, _email: &str, _pw: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn account(email: &str) -> Identity {
        let mut identity = Identity::guest();
        identity.email = email.to_string();
        identity
    }

    fn flow_with<R: RemoteIdentityStore>(
        remote: R,
    ) -> (
        PasswordResetFlow<R, RecordingNavigator, InstantTimer>,
        RecordingNavigator,
        InstantTimer,
    ) {
        let navigator = RecordingNavigator::new();
        let timer = InstantTimer::default();
        let flow = PasswordResetFlow::new(remote, navigator.clone(), timer.clone());
        (flow, navigator, timer)
    }

    #[tokio::test]
    async fn empty_fields_fail_validation_with_zero_remote_calls() {
        let store = CountingStore::new(MemoryIdentityStore::new());
        let (flow, navigator, _) = flow_with(store.clone());

        for (email, password, confirm) in [
            ("", "", ""),
            ("a@x.com", "", ""),
            ("", "p1", "p1"),
            ("a@x.com", "p1", ""),
            ("a@x.com", "", "p1"),
        ] {
            let err = flow.submit(email, password, confirm).await.unwrap_err();
            assert_eq!(err, ResetError::Validation(ValidationFailure::MissingFields));
        }

        assert_eq!(store.remote_calls(), 0);
        assert!(navigator.visits().is_empty());
        assert!(flow.fields_errored());
        assert_eq!(flow.message().unwrap().text, "All fields are required.");
    }

    #[tokio::test]
    async fn mismatched_passwords_fail_validation_with_zero_remote_calls() {
        let store = CountingStore::new(MemoryIdentityStore::new());
        let (flow, navigator, _) = flow_with(store.clone());

        let err = flow.submit("a@x.com", "p1", "p2").await.unwrap_err();
        assert_eq!(err, ResetError::Validation(ValidationFailure::PasswordMismatch));
        assert_eq!(store.remote_calls(), 0);
        assert!(navigator.visits().is_empty());
        assert_eq!(flow.message().unwrap().text, "Passwords do not match.");
    }

    #[tokio::test]
    async fn unknown_email_fails_with_not_found() {
        let (flow, navigator, _) = flow_with(MemoryIdentityStore::new());

        let err = flow.submit("a@x.com", "p1", "p1").await.unwrap_err();
        assert_eq!(err, ResetError::NotFound);
        assert_eq!(flow.state(), FlowState::Failed(ResetError::NotFound));
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn failed_update_leaves_stored_password_unchanged() {
        let accounts = MemoryIdentityStore::new().with_account(account("b@x.com"), "original");
        let (flow, navigator, _) = flow_with(FailingUpdateStore {
            inner: accounts.clone(),
        });

        let err = flow.submit("b@x.com", "p1", "p1").await.unwrap_err();
        assert!(matches!(err, ResetError::Remote(_)));
        assert_eq!(accounts.password_of("b@x.com").as_deref(), Some("original"));
        assert!(navigator.visits().is_empty());
        assert_eq!(
            flow.message().unwrap().text,
            "Failed to reset password. Please try again."
        );
    }

    #[tokio::test]
    async fn successful_submit_updates_password_and_redirects_once_after_delay() {
        let accounts = MemoryIdentityStore::new().with_account(account("c@x.com"), "old");
        let (flow, navigator, timer) = flow_with(accounts.clone());

        let outcome = flow.submit("c@x.com", "p1", "p1").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(flow.state(), FlowState::Succeeded);
        assert_eq!(accounts.password_of("c@x.com").as_deref(), Some("p1"));

        // Exactly one navigation to login, armed with the fixed delay.
        assert_eq!(navigator.visits(), vec![Route::Login]);
        assert_eq!(timer.delays(), vec![REDIRECT_DELAY]);
        assert_eq!(
            flow.message().unwrap().text,
            "Password reset successfully! Redirecting..."
        );
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn success_message_shows_before_the_redirect_fires() {
        let accounts = MemoryIdentityStore::new().with_account(account("c@x.com"), "old");
        let navigator = RecordingNavigator::new();
        let flow = PasswordResetFlow::new(accounts, navigator.clone(), NeverTimer);

        let submission = flow.submit("c@x.com", "p1", "p1");
        tokio::pin!(submission);

        // Drive until the flow parks on the redirect delay.
        assert!(
            tokio::time::timeout(Duration::from_millis(20), submission.as_mut())
                .await
                .is_err()
        );
        assert_eq!(flow.state(), FlowState::Succeeded);
        assert_eq!(
            flow.message().unwrap().text,
            "Password reset successfully! Redirecting..."
        );
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn dropping_a_parked_submission_cancels_the_redirect() {
        let accounts = MemoryIdentityStore::new().with_account(account("c@x.com"), "old");
        let navigator = RecordingNavigator::new();
        let flow = PasswordResetFlow::new(accounts.clone(), navigator.clone(), NeverTimer);

        let task = flow.clone();
        let handle = tokio::spawn(async move {
            let _ = task.submit("c@x.com", "p1", "p1").await;
        });

        // Let the submission reach the parked redirect, then tear it down.
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();
        let _ = handle.await;

        // The password write happened before the park; the redirect did not,
        // and the surviving handle is not wedged.
        assert_eq!(accounts.password_of("c@x.com").as_deref(), Some("p1"));
        assert!(navigator.visits().is_empty());
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_ignored() {
        let store = CountingStore::new(StalledStore);
        let (flow, navigator, _) = flow_with(store.clone());

        let task = flow.clone();
        let parked = tokio::spawn(async move {
            let _ = task.submit("a@x.com", "p1", "p1").await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(flow.is_loading());

        let outcome = flow.submit("a@x.com", "p1", "p1").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::AlreadyInFlight);

        // Only the first submission reached the remote store.
        assert_eq!(store.remote_calls(), 1);
        assert_eq!(flow.state(), FlowState::LookingUp);
        assert!(navigator.visits().is_empty());

        parked.abort();
        let _ = parked.await;
    }

    #[tokio::test]
    async fn contract_breaking_lookup_surfaces_unexpected() {
        let (flow, navigator, _) = flow_with(MismatchedStore);

        let err = flow.submit("a@x.com", "p1", "p1").await.unwrap_err();
        assert!(matches!(err, ResetError::Unexpected(_)));
        assert!(navigator.visits().is_empty());
        assert_eq!(
            flow.message().unwrap().text,
            "An unexpected error occurred. Please try again."
        );
    }

    #[tokio::test]
    async fn error_message_slot_is_last_write_wins() {
        let accounts = MemoryIdentityStore::new().with_account(account("c@x.com"), "old");
        let (flow, _, _) = flow_with(accounts);

        let _ = flow.submit("", "", "").await;
        assert_eq!(flow.message().unwrap().text, "All fields are required.");

        let _ = flow.submit("c@x.com", "p1", "p2").await;
        assert_eq!(flow.message().unwrap().text, "Passwords do not match.");

        // A successful attempt replaces the error with the success message.
        let _ = flow.submit("c@x.com", "p1", "p1").await;
        assert_eq!(flow.message().unwrap().kind, MessageKind::Success);
    }

    mod validation_properties {
        use super::*;
        use proptest::prelude::*;

        fn non_empty() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9@.]{1,24}"
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: any combination with at least one empty field fails
            /// before any remote work.
            #[test]
            fn any_empty_combination_is_rejected(
                mask in (any::<bool>(), any::<bool>(), any::<bool>())
                    .prop_filter("at least one empty", |(a, b, c)| *a || *b || *c),
                email in non_empty(),
                password in non_empty(),
            ) {
                let (empty_email, empty_password, empty_confirm) = mask;
                let email = if empty_email { String::new() } else { email };
                let password_field = if empty_password { String::new() } else { password.clone() };
                let confirm = if empty_confirm { String::new() } else { password };

                prop_assert_eq!(
                    validate_fields(&email, &password_field, &confirm),
                    Err(ValidationFailure::MissingFields)
                );
            }

            /// Property: distinct non-empty passwords always mismatch.
            #[test]
            fn distinct_passwords_are_rejected(
                email in non_empty(),
                password in non_empty(),
                confirm in non_empty(),
            ) {
                prop_assume!(password != confirm);
                prop_assert_eq!(
                    validate_fields(&email, &password, &confirm),
                    Err(ValidationFailure::PasswordMismatch)
                );
            }

            /// Property: matching non-empty fields pass local validation.
            #[test]
            fn matching_fields_pass(
                email in non_empty(),
                password in non_empty(),
            ) {
                prop_assert_eq!(validate_fields(&email, &password, &password), Ok(()));
            }
        }
    }
}
