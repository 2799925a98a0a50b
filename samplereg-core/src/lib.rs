//! samplereg-core: headless sample registration form
//!
//! Owns everything the registration form does apart from drawing it:
//! - Field values and touched flags (`form`)
//! - Pure validation and display gating (`validate`)
//! - Transient success/error notifications (`notification`)
//! - The backend contract and its HTTP implementation (`client`)
//! - The load-users / submit sequence tying it together (`session`)

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod notification;
pub mod session;
pub mod validate;

pub use client::{ApiError, HttpSampleApi, NewSample, Sample, SampleApi, SelectableUser};
pub use config::ClientConfig;
pub use error::{Result, SampleRegError};
pub use form::{Field, FormState, FormValues, TouchedFlags};
pub use notification::{CloseReason, Notification, Severity, Toast};
pub use session::{LoadOutcome, RegistrationForm, SubmitOutcome};
pub use validate::{feedback, is_complete, validate, FieldStatus, Validation};
