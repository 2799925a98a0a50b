//! Command implementations for the samplereg CLI

pub mod register;
pub mod samples;
pub mod serve;
pub mod users;
pub mod validate;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use samplereg_core::{ClientConfig, Field, FormState, HttpSampleApi, Notification, Severity, Validation};

// Re-export main dispatcher functions for flat access from main.rs
pub use register::run_register;
pub use samples::run_samples;
pub use serve::run_serve;
pub use users::run_users;
pub use validate::run_validate;

// ============================================================================
// Shared Args
// ============================================================================

/// Where the sample service lives
#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// Sample service URL (default: endpoint from ~/.samplereg/config.toml)
    #[arg(long, env = "SAMPLEREG_ENDPOINT", global = true)]
    pub endpoint: Option<String>,
}

impl EndpointArgs {
    /// Flag/env first, then config file, then the built-in default
    pub fn resolve(&self) -> Result<(ClientConfig, HttpSampleApi)> {
        let mut config = ClientConfig::load().context("Failed to load client config")?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }

        let api = HttpSampleApi::new(&config.endpoint).context("Failed to build HTTP client")?;
        tracing::debug!(endpoint = %api.base_url(), "using sample service");
        Ok((config, api))
    }
}

/// Form field values given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// User name, as registered with the service
    #[arg(long)]
    pub user: Option<String>,

    /// Sample label
    #[arg(long)]
    pub label: Option<String>,

    /// Proposal number
    #[arg(long)]
    pub proposal: Option<String>,

    /// Inner diameter (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub inner: Option<String>,

    /// Outer diameter (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub outer: Option<String>,
}

impl FormArgs {
    fn entries(&self) -> [(Field, Option<&str>); 5] {
        [
            (Field::User, self.user.as_deref()),
            (Field::SampleLabel, self.label.as_deref()),
            (Field::ProposalNumber, self.proposal.as_deref()),
            (Field::InnerDiameter, self.inner.as_deref()),
            (Field::OuterDiameter, self.outer.as_deref()),
        ]
    }

    /// Enter each given value and leave the field, like filling a form by hand
    pub fn apply(&self, form: &mut FormState) {
        for (field, value) in self.entries() {
            if let Some(raw) = value {
                form.set(field, raw);
                form.blur(field);
            }
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

// ============================================================================
// Output helpers
// ============================================================================

pub fn print_notification(notification: &Notification) {
    if !notification.visible {
        return;
    }
    match notification.severity {
        Severity::Success => println!("✓ {}", notification.message),
        Severity::Error => eprintln!("✗ {}", notification.message),
    }
}

pub fn print_feedback(validation: &Validation) {
    for (field, status) in validation.iter() {
        if status.is_invalid {
            eprintln!("  {}: {}", field, status.message);
        }
    }
}

pub fn validation_json(validation: &Validation) -> serde_json::Value {
    let fields = validation
        .iter()
        .map(|(field, status)| {
            (
                field.to_string(),
                serde_json::json!({
                    "is_invalid": status.is_invalid,
                    "message": status.message,
                }),
            )
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::json!({
        "valid": validation.is_valid(),
        "fields": fields,
    })
}
