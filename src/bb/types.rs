// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Library-wide type definitions.

use std::result;

use futures;

use serde_json;

use bb::error;

/// A Result type parameterized by `bb::error::Error`
pub type Result<T> = result::Result<T, error::Error>;

/// A Future type parameterized by `bb::error::Error`. Every API call
/// resolves to one of these; they can be sent to another thread.
pub type Future<T> = Box<dyn futures::Future<Item = T, Error = error::Error> + Send>;

/// A server-owned record (customer, bill, payment, ...), passed through
/// as the JSON the API sent.
pub type Record = serde_json::Value;

/// A query string parameter.
pub type RequestParam = (String, String);
