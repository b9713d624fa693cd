//! Blocking client for the OneTimeSecret API.
//!
//! ```no_run
//! let client = ots::Client::new("me@example.com", "api-token");
//! client.status()?;
//! let shared = client.create("s3cr3t", "", "friend@example.com", 3600)?;
//! println!("{:?}", shared.secret_key);
//! # Ok::<(), ots::OtsError>(())
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod secret;

pub use client::{Client, Credentials, DEFAULT_BASE_URL};
pub use config::Settings;
pub use errors::{OtsError, Result};
pub use secret::{Health, SecretRecord, SecretRecordList};
