//! # devicekv-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Define the **invocation boundary**: a [`ProxyRequest`](invocation::ProxyRequest)
//!   carrying method, body and path parameters in, a
//!   [`ProxyResponse`](invocation::ProxyResponse) carrying status code and
//!   body out
//! - Implement the **request handler** that validates payloads, calls the
//!   device service and maps outcomes to status codes
//! - Host the handler over real HTTP (`/devices`, `/devices/{id}`) and over a
//!   raw JSON invocation endpoint (`/invoke`)
//!
//! ## Dependency rule
//! Depends on `devicekv-app` (for port traits and services) and
//! `devicekv-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod handler;
pub mod invocation;
pub mod payload;
pub mod router;
pub mod state;
