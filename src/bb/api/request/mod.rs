// Copyright (c) 2026 Billbook. All Rights Reserved.

//! This module contains types that serve as representations
//! of client requests to the Billbook API.
//!
//! Only bodies the client assembles itself live here; record payloads
//! (customers, bills, ...) are forwarded as given.

pub mod admin;
pub mod auth;
pub mod bill;
pub mod payment;

// Re-export
pub use self::admin::{AssignSubscription, SetAdminActive};
pub use self::auth::{ChangePassword, Login};
pub use self::bill::UpdateBillStatus;
pub use self::payment::UpdatePaymentStatus;
