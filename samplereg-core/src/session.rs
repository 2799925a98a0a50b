//! Registration form session: load users once, fill, submit
//!
//! All state lives behind `&mut self`, so one form can never have two
//! submissions in flight.

use std::time::{Duration, Instant};

use crate::client::{NewSample, SampleApi, SelectableUser};
use crate::form::{Field, FormState, FormValues, TouchedFlags};
use crate::notification::{CloseReason, Notification, Severity, Toast};
use crate::validate::{feedback, is_complete, validate, Validation};

pub const FILL_OUT_FORM: &str = "Please fill out the form";
pub const SUBMIT_SUCCESS: &str = "Success!";
pub const USERS_LOADED: &str = "Users loaded";
pub const USERS_FAILED: &str = "Failed to fetch users";
pub const UNKNOWN_USER: &str = "Selected user is not registered";

/// Result of `RegistrationForm::load_users`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed,
    /// Users were already requested during this form's lifetime
    AlreadyRequested,
}

/// Result of `RegistrationForm::submit`
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blocked locally; no request was made
    Invalid(Validation),
    /// The selected user name matched no loaded user; no request was made
    UnknownUser(String),
    /// Backend accepted the sample; the form was reset
    Created { user_id: i64 },
    /// Backend rejected the sample; the form was kept
    Failed { detail: String },
}

/// Form state, user options and notification for one form lifetime
#[derive(Debug, Default)]
pub struct RegistrationForm {
    form: FormState,
    users: Vec<SelectableUser>,
    users_requested: bool,
    toast: Toast,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_hide(auto_hide: Duration) -> Self {
        Self {
            toast: Toast::new(auto_hide),
            ..Self::default()
        }
    }

    pub fn values(&self) -> &FormValues {
        self.form.values()
    }

    pub fn touched(&self) -> &TouchedFlags {
        self.form.touched()
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn set(&mut self, field: Field, raw: &str) {
        self.form.set(field, raw);
    }

    pub fn blur(&mut self, field: Field) {
        self.form.blur(field);
    }

    pub fn users(&self) -> &[SelectableUser] {
        &self.users
    }

    pub fn notification(&self) -> &Notification {
        self.toast.current()
    }

    /// Auto-hide the notification if its time is up. Callers own the clock.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        self.toast.expire(now)
    }

    pub fn dismiss(&mut self, reason: CloseReason) -> bool {
        self.toast.close(reason)
    }

    /// Validity of the current values, ignoring touched flags
    pub fn validation(&self) -> Validation {
        validate(self.form.values())
    }

    /// Validation gated by touched flags, for display
    pub fn feedback(&self) -> Validation {
        feedback(self.form.values(), self.form.touched())
    }

    /// Fetch selectable users. Only the first call issues a request.
    pub async fn load_users<A: SampleApi + ?Sized>(&mut self, api: &A) -> LoadOutcome {
        if self.users_requested {
            return LoadOutcome::AlreadyRequested;
        }
        self.users_requested = true;

        match api.list_users().await {
            Ok(users) => {
                tracing::info!(count = users.len(), "loaded selectable users");
                self.users = users;
                self.toast.show(Severity::Success, USERS_LOADED);
                LoadOutcome::Loaded(self.users.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch users");
                self.users.clear();
                self.toast.show(Severity::Error, USERS_FAILED);
                LoadOutcome::Failed
            }
        }
    }

    /// Id of the loaded user with exactly this name
    pub fn resolve_user(&self, name: &str) -> Option<i64> {
        self.users
            .iter()
            .find(|user| user.name == name)
            .map(|user| user.id)
    }

    /// Validate, then send the sample for the selected user.
    pub async fn submit<A: SampleApi + ?Sized>(&mut self, api: &A) -> SubmitOutcome {
        self.form.touch_all();

        let values = self.form.values();
        let validation = validate(values);
        if !validation.is_valid() || !is_complete(values) {
            tracing::debug!(
                invalid = ?validation.invalid_fields().collect::<Vec<_>>(),
                "submission blocked by validation"
            );
            self.toast.show(Severity::Error, FILL_OUT_FORM);
            return SubmitOutcome::Invalid(validation);
        }

        let Some(user_id) = self.resolve_user(&values.user) else {
            let name = values.user.clone();
            tracing::warn!(user = %name, "selected user not in loaded user list");
            self.toast.show(Severity::Error, UNKNOWN_USER);
            return SubmitOutcome::UnknownUser(name);
        };

        let payload = NewSample::from(values);
        match api.create_sample(user_id, &payload).await {
            Ok(()) => {
                tracing::info!(user_id, label = %payload.sample_label, "sample registered");
                self.toast.show(Severity::Success, SUBMIT_SUCCESS);
                self.form.reset();
                SubmitOutcome::Created { user_id }
            }
            Err(err) => {
                let detail = err.detail();
                tracing::warn!(user_id, error = %err, "sample registration failed");
                self.toast.show(Severity::Error, detail.clone());
                SubmitOutcome::Failed { detail }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        users: Vec<SelectableUser>,
        fail_users: bool,
        reject_with: Option<String>,
        list_calls: Mutex<usize>,
        created: Mutex<Vec<(i64, NewSample)>>,
    }

    #[async_trait]
    impl SampleApi for RecordingApi {
        async fn list_users(&self) -> Result<Vec<SelectableUser>, ApiError> {
            *self.list_calls.lock().unwrap() += 1;
            if self.fail_users {
                return Err(ApiError::Rejected {
                    status: 500,
                    detail: "boom".into(),
                });
            }
            Ok(self.users.clone())
        }

        async fn create_sample(&self, user_id: i64, sample: &NewSample) -> Result<(), ApiError> {
            self.created.lock().unwrap().push((user_id, sample.clone()));
            match &self.reject_with {
                Some(detail) => Err(ApiError::Rejected {
                    status: 400,
                    detail: detail.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    fn john() -> Vec<SelectableUser> {
        vec![SelectableUser {
            id: 1,
            name: "John Doe".into(),
        }]
    }

    fn fill(form: &mut RegistrationForm, inner: &str, outer: &str) {
        form.set(Field::User, "John Doe");
        form.set(Field::SampleLabel, "S-001");
        form.set(Field::ProposalNumber, "P-77");
        form.set(Field::InnerDiameter, inner);
        form.set(Field::OuterDiameter, outer);
    }

    #[tokio::test]
    async fn users_loaded_once() {
        let api = RecordingApi {
            users: john(),
            ..Default::default()
        };
        let mut form = RegistrationForm::new();

        assert_eq!(form.load_users(&api).await, LoadOutcome::Loaded(1));
        assert_eq!(form.load_users(&api).await, LoadOutcome::AlreadyRequested);
        assert_eq!(*api.list_calls.lock().unwrap(), 1);
        assert_eq!(form.notification().message, USERS_LOADED);
    }

    #[tokio::test]
    async fn user_fetch_failure_leaves_list_empty() {
        let api = RecordingApi {
            fail_users: true,
            ..Default::default()
        };
        let mut form = RegistrationForm::new();

        assert_eq!(form.load_users(&api).await, LoadOutcome::Failed);
        assert!(form.users().is_empty());
        assert_eq!(form.notification().severity, Severity::Error);
        assert_eq!(form.notification().message, USERS_FAILED);
    }

    #[tokio::test]
    async fn invalid_submit_touches_everything() {
        let api = RecordingApi::default();
        let mut form = RegistrationForm::new();

        let outcome = form.submit(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(*form.touched(), TouchedFlags::all());
        assert!(!form.feedback().is_valid());
        assert_eq!(form.notification().message, FILL_OUT_FORM);
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolves_user_id_by_name() {
        let api = RecordingApi {
            users: john(),
            ..Default::default()
        };
        let mut form = RegistrationForm::new();
        form.load_users(&api).await;
        fill(&mut form, "5", "10");

        let outcome = form.submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Created { user_id: 1 });
        let created = api.created.lock().unwrap();
        assert_eq!(created[0].0, 1);
        assert_eq!(created[0].1.sample_label, "S-001");
    }

    #[tokio::test]
    async fn unknown_user_blocks_request() {
        let api = RecordingApi::default();
        let mut form = RegistrationForm::new();
        fill(&mut form, "5", "10");

        let outcome = form.submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::UnknownUser("John Doe".into()));
        assert!(api.created.lock().unwrap().is_empty());
        assert_eq!(form.values().user, "John Doe");
    }

    #[tokio::test]
    async fn notification_hides_after_configured_timeout() {
        let api = RecordingApi {
            users: john(),
            ..Default::default()
        };
        let mut form = RegistrationForm::with_auto_hide(Duration::from_millis(3500));
        form.load_users(&api).await;
        let shown = Instant::now();

        assert!(!form.expire_notification(shown));
        assert!(form.notification().visible);

        assert!(form.expire_notification(shown + Duration::from_secs(4)));
        assert!(!form.notification().visible);
        assert_eq!(form.notification().message, USERS_LOADED);
    }
}
