//! REST API client module for the farm-management service.
//!
//! This module provides the `ApiClient` for communicating with the
//! farm API: authentication, livestock records, finance records, and
//! dashboard statistics.
//!
//! The API uses JWT bearer token authentication. Expired access tokens
//! (HTTP 401) are handled inside the client: the refresh token is
//! exchanged for a new access token and the failed request is replayed
//! once, so callers never see a recoverable 401.

pub mod animals;
pub mod auth;
pub mod client;
pub mod error;
pub mod finance;
pub mod pagination;

pub use animals::{AnimalFilters, StatusFilter};
pub use client::ApiClient;
pub use error::ApiError;
pub use pagination::Page;
