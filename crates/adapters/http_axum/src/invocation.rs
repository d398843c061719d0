//! Invocation request and response objects.
//!
//! These mirror the event shape handed over by an HTTP-triggered function
//! runtime. Field names follow that runtime's camelCase wire format.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyRequest {
    /// `GET`, `POST`, or anything else.
    pub http_method: String,
    /// Raw request body.
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    /// Path parameters captured by the route (`id` for device lookups).
    #[serde(deserialize_with = "null_as_default")]
    pub path_parameters: HashMap<String, String>,
}

impl ProxyRequest {
    /// Request with the given method and no body or parameters.
    #[must_use]
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_path_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Value of a path parameter, or `""` when absent.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> &str {
        self.path_parameters.get(name).map_or("", String::as_str)
    }
}

/// Outbound invocation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
}

impl ProxyResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            body: body.into(),
        }
    }

    /// Response whose body is the standard reason phrase of `status`.
    #[must_use]
    pub fn status_text(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or_default())
    }

    /// Status code as a typed value; unknown codes map to 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::OK {
            (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
        } else {
            (status, self.body).into_response()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
