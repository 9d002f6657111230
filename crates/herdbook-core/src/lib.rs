//! Core library for herdbook, a client for the farm-management REST API.
//!
//! This crate provides:
//!
//! - `api::ApiClient`: an authenticated HTTP client with automatic token
//!   refresh and one-shot request replay on expired access tokens
//! - `auth`: the session store the client reads tokens from, plus session
//!   persistence and OS-keychain credential storage
//! - `models`: typed representations of the API's animals, finance records,
//!   and dashboard statistics
//! - `config`: base URL / environment selection and client timeout
//!
//! The API uses JWT bearer token authentication (SimpleJWT): a short-lived
//! access token attached to every request, and a long-lived refresh token
//! exchanged for a new access token when the server answers 401.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{MemorySession, SessionStore};
pub use config::Config;
