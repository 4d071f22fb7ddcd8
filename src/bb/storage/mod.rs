// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Key-value persistence for the client session.
//!
//! Values are plain strings; structured values are stored JSON-encoded.
//! Reads never fail: an unavailable store simply reads as empty, which the
//! session layer treats as "logged out".

pub mod file;
pub mod memory;

pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;

pub const TOKEN: &str = "token";
pub const USER_CODE: &str = "userCode";
pub const USER_TYPE: &str = "userType";
pub const USER_NAME: &str = "userName";
pub const FIRST_NAME: &str = "fname";
pub const LAST_NAME: &str = "lname";
pub const ORGANIZATION_NAME: &str = "organizationName";
pub const ORGANIZATION_LOGO: &str = "organizationLogo";
pub const USER_EMAIL: &str = "userEmail";
pub const USER_INFO: &str = "userInfo";
pub const AVAILABLE_FEATURES: &str = "availableFeatures";
pub const BUSINESS_INFORMATION: &str = "businessInformation";
pub const DARK_MODE: &str = "darkMode";
pub const USER_ROLE: &str = "userRole";
pub const USERNAME: &str = "username";

/// Every key owned by a session. `Storage::clear_all` removes exactly these.
pub const SESSION_KEYS: [&str; 15] = [
    TOKEN,
    USER_CODE,
    USER_TYPE,
    USER_NAME,
    FIRST_NAME,
    LAST_NAME,
    ORGANIZATION_NAME,
    ORGANIZATION_LOGO,
    USER_EMAIL,
    USER_INFO,
    AVAILABLE_FEATURES,
    BUSINESS_INFORMATION,
    DARK_MODE,
    USER_ROLE,
    USERNAME,
];

/// A string-valued key-value store.
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` if absent or the store is unavailable.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// Removes every session key, leaving unrelated keys alone.
    fn clear_all(&self) {
        for key in SESSION_KEYS.iter() {
            self.remove(key);
        }
    }
}
