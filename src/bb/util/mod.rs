// Copyright (c) 2026 Billbook. All Rights Reserved.

pub mod futures;

pub use self::futures::block_on;
