// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Future-related utility code lives here.

use futures::*;

use tokio;

use bb;

// This converts a concrete object implementing the `Future` trait into a
// `Box`ed trait object, so functions can return a variety of Future-traited
// objects with different concrete types while typing them all the same.
pub fn into_future_trait<F, I, E>(f: F) -> Box<dyn Future<Item = I, Error = E> + Send>
where
    F: 'static + Send + Future<Item = I, Error = E>,
{
    Box::new(f)
}

/// Drives a future to completion on a fresh runtime, blocking the current
/// thread. For synchronous callers; do not call from inside a runtime.
pub fn block_on<T>(f: bb::Future<T>) -> bb::Result<T>
where
    T: 'static + Send,
{
    let mut rt = tokio::runtime::Runtime::new()?;
    rt.block_on(f)
}
