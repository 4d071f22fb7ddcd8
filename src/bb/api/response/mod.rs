// Copyright (c) 2026 Billbook. All Rights Reserved.

//! This module contains types that serve as representations
//! of server responses from the Billbook API.

pub mod login;

// Re-export
pub use self::login::Login;
