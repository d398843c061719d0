//! axum handlers translating HTTP traffic into device invocations.

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::Method;

use devicekv_app::ports::DeviceRepository;

use crate::invocation::{ProxyRequest, ProxyResponse};
use crate::state::AppState;

/// Invalid UTF-8 sequences in `body` are replaced with U+FFFD.
fn invocation(
    method: &Method,
    path_parameters: HashMap<String, String>,
    body: &Bytes,
) -> ProxyRequest {
    ProxyRequest {
        http_method: method.as_str().to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        path_parameters,
    }
}

/// `ANY /devices`
pub async fn collection<R>(
    State(state): State<AppState<R>>,
    method: Method,
    body: Bytes,
) -> ProxyResponse
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let request = invocation(&method, HashMap::new(), &body);
    state.handler.dispatch(&request).await
}

/// `ANY /devices/{id}`
pub async fn item<R>(
    State(state): State<AppState<R>>,
    method: Method,
    Path(id): Path<String>,
    body: Bytes,
) -> ProxyResponse
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let request = invocation(&method, HashMap::from([("id".to_string(), id)]), &body);
    state.handler.dispatch(&request).await
}

/// `POST /invoke` — runs one raw invocation and returns the response object.
pub async fn invoke<R>(
    State(state): State<AppState<R>>,
    Json(request): Json<ProxyRequest>,
) -> Json<ProxyResponse>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    Json(state.handler.dispatch(&request).await)
}
