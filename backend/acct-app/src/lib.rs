//! acct - account identity, provider linking and profile storage.
//!
//! [`AccountService`] is the entry point: it drives the session manager
//! and keeps the persistent profile in step with every session change.

pub mod account_service;
pub mod demo;
pub mod error;
pub mod logger;

pub use account_service::{AccountService, AccountSnapshot};
pub use demo::{DemoReport, run_demo};
pub use error::{AppError, Result};
