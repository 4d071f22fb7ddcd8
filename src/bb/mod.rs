// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Billbook library top-level definitions go in this module.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod session;
pub mod storage;
pub mod types;
pub mod util;
pub mod validation;

// Re-export
pub use bb::config::{Config, Environment};
pub use bb::error::{Error, ErrorKind};
pub use bb::types::{Future, Result};
