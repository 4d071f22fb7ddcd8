// Copyright (c) 2026 Billbook. All Rights Reserved.

//! The Billbook API.

mod client;
pub mod envelope;
pub mod gateway;
pub mod request;
pub mod response;

// Re-export:
pub use self::client::Billbook;
pub use self::envelope::{ApiEnvelope, Envelope, NormalizedResult};
pub use self::gateway::{Gateway, HttpsTransport, RawResponse, RequestParam, Transport};
