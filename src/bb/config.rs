// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Library configuration options and environment definitions.

use std::env;

use url::Url;

use bb;
use bb::error::ErrorKind;

/// Environment variable overriding the local API location.
pub const API_LOC_VAR: &str = "BILLBOOK_API_LOC";

/// Environment variable selecting the target environment.
pub const ENV_VAR: &str = "BILLBOOK_ENV";

const LOCAL_API_URL: &str = "http://localhost:5000/api";
const PRODUCTION_API_URL: &str = "https://api.billbook.app/api";

/// Defines the server environment the library is interacting with.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    /// The API base URL, including the `/api` prefix.
    pub fn url(&self) -> bb::Result<Url> {
        use self::Environment::*;
        let loc = match *self {
            Local => env::var(API_LOC_VAR).unwrap_or_else(|_| LOCAL_API_URL.to_string()),
            Production => PRODUCTION_API_URL.to_string(),
        };
        loc.parse::<Url>()
            .map_err(|e| ErrorKind::Config(format!("not a valid url: {} ({})", loc, e)).into())
    }

    /// Parses `local` or `production` (case-insensitive).
    pub fn parse(name: &str) -> bb::Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ErrorKind::Config(format!("unknown environment: {}", other)).into()),
        }
    }
}

/// Configuration options for the Billbook client.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    env: Environment,
}

impl Config {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Builds a configuration from `BILLBOOK_ENV`, defaulting to production.
    pub fn from_env() -> bb::Result<Self> {
        match env::var(ENV_VAR) {
            Ok(name) => Environment::parse(&name).map(Self::new),
            Err(_) => Ok(Self::new(Environment::Production)),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn api_url(&self) -> bb::Result<Url> {
        self.env.url()
    }
}
