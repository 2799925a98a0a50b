//! Backend contract and its HTTP implementation
//!
//! The form only needs two calls: list users and create a sample for a user.
//! `HttpSampleApi` also exposes the admin calls the CLI uses.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FormValues;

/// A user that can be picked in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableUser {
    pub id: i64,
    pub name: String,
}

/// Payload for `POST /users/{id}/samples`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSample {
    /// Informational; the owner comes from the request path
    #[serde(default)]
    pub user: String,
    pub sample_label: String,
    pub proposal_number: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
}

impl From<&FormValues> for NewSample {
    fn from(values: &FormValues) -> Self {
        Self {
            user: values.user.clone(),
            sample_label: values.sample_label.clone(),
            proposal_number: values.proposal_number.clone(),
            inner_diameter: values.inner_diameter,
            outer_diameter: values.outer_diameter,
        }
    }
}

/// A stored sample as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: i64,
    pub owner_id: i64,
    pub sample_label: String,
    pub proposal_number: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
}

/// Request failure
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure
    #[error("Failed to reach sample service: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{status}: {detail}")]
    Rejected { status: u16, detail: String },
}

impl ApiError {
    /// Text suitable for a notification: the backend's detail verbatim
    pub fn detail(&self) -> String {
        match self {
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::Transport(_) => self.to_string(),
        }
    }
}

/// Calls the registration form makes against the backend
#[async_trait]
pub trait SampleApi: Send + Sync {
    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<SelectableUser>, ApiError>;

    /// `POST /users/{user_id}/samples`
    async fn create_sample(&self, user_id: i64, sample: &NewSample) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// reqwest-backed `SampleApi`
#[derive(Debug, Clone)]
pub struct HttpSampleApi {
    client: Client,
    base_url: String,
}

impl HttpSampleApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /users`
    pub async fn create_user(&self, name: &str) -> Result<SelectableUser, ApiError> {
        #[derive(Serialize)]
        struct CreateUser<'a> {
            name: &'a str,
        }

        let response = self
            .client
            .post(self.url("/users"))
            .json(&CreateUser { name })
            .send()
            .await?;
        handle_response(response).await
    }

    /// `GET /samples`
    pub async fn list_samples(&self) -> Result<Vec<Sample>, ApiError> {
        let response = self.client.get(self.url("/samples")).send().await?;
        handle_response(response).await
    }
}

#[async_trait]
impl SampleApi for HttpSampleApi {
    async fn list_users(&self) -> Result<Vec<SelectableUser>, ApiError> {
        let response = self.client.get(self.url("/users")).send().await?;
        handle_response(response).await
    }

    async fn create_sample(&self, user_id: i64, sample: &NewSample) -> Result<(), ApiError> {
        let url = self.url(&format!("/users/{}/samples", user_id));
        tracing::debug!(%url, label = %sample.sample_label, "creating sample");

        let response = self.client.post(&url).json(sample).send().await?;
        ensure_success(response).await.map(|_| ())
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = error_detail(status, &text);
    tracing::warn!(status = status.as_u16(), %detail, "sample service rejected request");

    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

/// `{detail: "..."}` body text, falling back to the raw body or status line
fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_owned(),
        Err(_) => format!(
            "Request failed with status {}",
            status.canonical_reason().unwrap_or(status.as_str())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_used_verbatim() {
        let detail = error_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "A sample with this label is already registered"}"#,
        );
        assert_eq!(detail, "A sample with this label is already registered");
    }

    #[test]
    fn structured_detail_is_serialized() {
        let detail = error_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"msg": "field required"}]}"#,
        );
        assert!(detail.contains("field required"));
    }

    #[test]
    fn missing_body_falls_back_to_status() {
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(detail, "Request failed with status Internal Server Error");

        let detail = error_detail(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(detail, "upstream down");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api = HttpSampleApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/users"), "http://localhost:8000/users");
    }

    #[test]
    fn new_sample_copies_form_values() {
        let values = FormValues {
            user: "Jane Doe".into(),
            sample_label: "S-9".into(),
            proposal_number: "P-1".into(),
            inner_diameter: 1.5,
            outer_diameter: 3.0,
        };
        let payload = serde_json::to_value(NewSample::from(&values)).unwrap();
        assert_eq!(payload["user"], "Jane Doe");
        assert_eq!(payload["outer_diameter"], 3.0);
    }

    #[test]
    fn rejected_detail_is_verbatim() {
        let err = ApiError::Rejected {
            status: 404,
            detail: "User not found".into(),
        };
        assert_eq!(err.detail(), "User not found");
        assert_eq!(err.to_string(), "404: User not found");
    }
}
