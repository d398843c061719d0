//! Request handler — validates invocations and maps outcomes to responses.

use axum::http::StatusCode;

use devicekv_app::ports::DeviceRepository;
use devicekv_app::services::device_service::DeviceService;

use crate::error::ApiError;
use crate::invocation::{ProxyRequest, ProxyResponse};
use crate::payload::decode_device;

/// Body returned after a device was stored.
pub const CREATED_BODY: &str = "HTTP 201 Created";

/// Stateless handler for device invocations.
pub struct DeviceHandler<R> {
    service: DeviceService<R>,
}

impl<R: DeviceRepository + Send + Sync> DeviceHandler<R> {
    /// Create a handler on top of the given service.
    pub fn new(service: DeviceService<R>) -> Self {
        Self { service }
    }

    /// Route on the HTTP method: `GET` reads, `POST` writes, anything else is 405.
    #[tracing::instrument(skip_all, fields(method = %request.http_method))]
    pub async fn dispatch(&self, request: &ProxyRequest) -> ProxyResponse {
        match request.http_method.as_str() {
            "GET" => self.handle_get(request).await,
            "POST" => self.handle_post(request).await,
            _ => ProxyResponse::status_text(StatusCode::METHOD_NOT_ALLOWED),
        }
    }

    /// Store the device carried in the request body.
    ///
    /// The body is decoded with [`decode_device`], so a body that is not a
    /// JSON object fails validation on every field, and a member that is not
    /// a string only leaves its own field empty.
    pub async fn handle_post(&self, request: &ProxyRequest) -> ProxyResponse {
        let device = decode_device(&request.body);

        match self.service.create_device(device).await {
            Ok(()) => ProxyResponse::new(StatusCode::CREATED, CREATED_BODY),
            Err(err) => ApiError::from(err).into(),
        }
    }

    /// Fetch the device named by the `id` path parameter.
    pub async fn handle_get(&self, request: &ProxyRequest) -> ProxyResponse {
        let id = request.path_parameter("id");

        let device = match self.service.get_device(id).await {
            Ok(device) => device,
            Err(err) => return ApiError::from(err).into(),
        };
        if !device.is_found() {
            return ProxyResponse::status_text(StatusCode::NOT_FOUND);
        }

        match serde_json::to_string(&device) {
            Ok(body) => ProxyResponse::new(StatusCode::OK, body),
            Err(err) => {
                tracing::error!(error = %err, "unable to encode device");
                ProxyResponse::status_text(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
