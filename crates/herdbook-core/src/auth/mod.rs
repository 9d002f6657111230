//! Authentication module for managing the user session and credentials.
//!
//! This module provides:
//! - `SessionStore`: the token store the API client reads from and mutates
//! - `MemorySession`: the in-process implementation, one per process
//! - `SessionFile`: on-disk persistence so a login survives restarts
//! - `CredentialStore`: secure OS-level credential storage via keyring

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{MemorySession, SessionFile, SessionStore, SessionTokens};
