// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Billbook-specific API errors and such.

use std::io;

use hyper;
use hyper::StatusCode;

use serde_json;

use url;

use bb::validation::FieldError;

error_chain! {
    foreign_links {
        Http(hyper::Error);
        Io(io::Error);
        Json(serde_json::Error);
        UrlParse(url::ParseError);
    }

    errors {
        TransportError(reason: String) {
            description("transport error")
            display("Transport error :: {}", reason)
        }

        RequestFailed(status: StatusCode, message: String) {
            description("request failed")
            display("Request failed ({}) :: {}", status.as_u16(), message)
        }

        SessionExpired {
            description("session expired")
            display("Session expired :: please log in again")
        }

        ValidationError(errors: Vec<FieldError>) {
            description("validation error")
            display("Validation error :: {}", errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "))
        }

        NotLoggedIn {
            description("not logged in")
            display("Not logged in")
        }

        InvalidSession(reason: String) {
            description("invalid session")
            display("Invalid session :: {}", reason)
        }

        Config(reason: String) {
            description("configuration error")
            display("Configuration error :: {}", reason)
        }

        Export(reason: String) {
            description("export error")
            display("Export error :: {}", reason)
        }
    }
}

impl ErrorKind {
    /// The HTTP status attached to this error, if the server produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match *self {
            ErrorKind::RequestFailed(status, _) => Some(status),
            ErrorKind::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

impl Error {
    /// True if this error means the stored session has been cleared and the
    /// caller should send the user back to the login boundary.
    pub fn is_session_expired(&self) -> bool {
        match *self.kind() {
            ErrorKind::SessionExpired => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_carries_status_and_message() {
        let err: Error = ErrorKind::RequestFailed(StatusCode::BAD_REQUEST, "bad".into()).into();
        assert_eq!(err.kind().status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "Request failed (400) :: bad");
        assert!(!err.is_session_expired());
    }

    #[test]
    fn validation_error_lists_every_field() {
        let err: Error = ErrorKind::ValidationError(vec![
            FieldError::new("phone", "Phone number must be exactly 10 digits"),
            FieldError::new("name", "Name is required"),
        ])
        .into();
        assert_eq!(
            err.to_string(),
            "Validation error :: phone: Phone number must be exactly 10 digits; name: Name is required"
        );
    }

    #[test]
    fn chained_errors_keep_their_cause() {
        use error_chain::ChainedError;

        let cause: Error = ErrorKind::Config("missing BILLBOOK_ENV".into()).into();
        let err = Error::with_chain(cause, ErrorKind::Export("invoice".into()));
        let chain = err.display_chain().to_string();

        assert!(chain.contains("Export error :: invoice"));
        assert!(chain.contains("Configuration error :: missing BILLBOOK_ENV"));
        assert_eq!(err.kind().status(), None);
    }

    #[test]
    fn session_expired_maps_to_unauthorized() {
        let err: Error = ErrorKind::SessionExpired.into();
        assert!(err.is_session_expired());
        assert_eq!(err.kind().status(), Some(StatusCode::UNAUTHORIZED));
    }
}
