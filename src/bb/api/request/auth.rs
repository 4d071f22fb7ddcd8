// Copyright (c) 2026 Billbook. All Rights Reserved.

/// A type representing a login request
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl Login {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// A password change for the logged in user.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    current_password: String,
    new_password: String,
}

impl ChangePassword {
    pub fn new<P, Q>(current_password: P, new_password: Q) -> Self
    where
        P: Into<String>,
        Q: Into<String>,
    {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}
