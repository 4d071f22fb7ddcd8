// Copyright (c) 2026 Billbook. All Rights Reserved.

use std::fmt;
use std::str::FromStr;

use bb::error::{Error, ErrorKind};

/// A type representing a Billbook session token.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        SessionToken(token.into())
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        SessionToken::new(token)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

/// The role a logged in user holds.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    SuperAdmin,
    Admin,
    SubUser,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            UserType::SuperAdmin => "SuperAdmin",
            UserType::Admin => "Admin",
            UserType::SubUser => "SubUser",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = Error;

    // The API is not consistent about casing or separators here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "superadmin" => Ok(UserType::SuperAdmin),
            "admin" => Ok(UserType::Admin),
            "subuser" => Ok(UserType::SubUser),
            _ => Err(ErrorKind::InvalidSession(format!("unknown user type: {}", s)).into()),
        }
    }
}

/// The authenticated identity held between login and logout/expiry.
///
/// A session is only ever constructed whole; there is no partially
/// populated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    token: SessionToken,
    user_code: String,
    user_type: UserType,
    user_name: String,
    organization_name: String,
    organization_logo: Option<String>,
    user_email: String,
}

impl Session {
    pub fn new<S: Into<String>>(
        token: SessionToken,
        user_code: S,
        user_type: UserType,
        user_name: S,
        organization_name: S,
        organization_logo: Option<String>,
        user_email: S,
    ) -> Self {
        Self {
            token,
            user_code: user_code.into(),
            user_type,
            user_name: user_name.into(),
            organization_name: organization_name.into(),
            organization_logo,
            user_email: user_email.into(),
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn user_code(&self) -> &String {
        &self.user_code
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn user_name(&self) -> &String {
        &self.user_name
    }

    pub fn organization_name(&self) -> &String {
        &self.organization_name
    }

    pub fn organization_logo(&self) -> Option<&String> {
        self.organization_logo.as_ref()
    }

    pub fn user_email(&self) -> &String {
        &self.user_email
    }

    /// Splits the display name into first and last name.
    pub fn first_and_last_name(&self) -> (String, String) {
        let mut parts = self.user_name.trim().splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or("").to_string();
        let last = parts.next().unwrap_or("").trim().to_string();
        (first, last)
    }
}
