// Copyright (c) 2026 Billbook. All Rights Reserved.

/// Top-level model definitions and re-exports go here.
///
/// Domain records (customers, bills, payments, ...) are owned by the server
/// and passed through as opaque JSON; only identity and session types are
/// modelled here.

pub mod feature;
pub mod id;
pub mod user;

// Re-export
pub use bb::types::Record;
pub use self::feature::FeatureSet;
pub use self::id::{AdminId, BillId, CustomerId, PaymentId, SubUserId, SubscriptionId};
pub use self::user::{Session, SessionToken, UserType};
