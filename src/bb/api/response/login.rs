// Copyright (c) 2026 Billbook. All Rights Reserved.

use serde_json::Value;

use bb;
use bb::error::ErrorKind;
use bb::model::{FeatureSet, Session, SessionToken, UserType};

/// A type representing the result of a successful login
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    token: Option<String>,
    user_code: Option<Value>,
    user_type: Option<String>,
    user_name: Option<String>,
    name: Option<String>,
    organization_name: Option<String>,
    organization_logo: Option<String>,
    user_email: Option<String>,
    email: Option<String>,
    available_features: Option<Vec<String>>,
}

impl Login {
    pub fn available_features(&self) -> Option<FeatureSet> {
        self.available_features
            .as_ref()
            .map(|codes| codes.iter().cloned().collect())
    }

    /// Assembles the session. Fails unless every identity field is present,
    /// so a half-populated session can never be stored.
    pub fn into_session(self) -> bb::Result<(Session, Option<FeatureSet>)> {
        let features = self.available_features();

        let token = required("token", self.token)?;
        let user_code = required(
            "userCode",
            self.user_code.and_then(|code| match code {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        )?;
        let user_type = required("userType", self.user_type)?.parse::<UserType>()?;
        let user_name = required("userName", either(self.user_name, self.name))?;
        let user_email = required("userEmail", either(self.user_email, self.email))?;
        // Super admins do not belong to an organization.
        let organization_name = self.organization_name.unwrap_or_default();
        let organization_logo = self.organization_logo.filter(|l| !l.trim().is_empty());

        let session = Session::new(
            SessionToken::new(token),
            user_code,
            user_type,
            user_name,
            organization_name,
            organization_logo,
            user_email,
        );
        Ok((session, features))
    }
}

// Older servers send `name`/`email`; some send both spellings.
fn either(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred.filter(|v| !v.trim().is_empty()).or(fallback)
}

fn required(field: &str, value: Option<String>) -> bb::Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ErrorKind::InvalidSession(format!("login response missing {}", field)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn complete_login_builds_a_session() {
        let login: Login = serde_json::from_value(json!({
            "token": "abc",
            "userCode": 17,
            "userType": "SubUser",
            "name": "Ravi Kumar",
            "organizationName": "Kumar Stores",
            "organizationLogo": "",
            "email": "ravi@example.com",
            "availableFeatures": ["DASHBOARD_ANALYTICS"]
        }))
        .unwrap();

        let (session, features) = login.into_session().unwrap();
        assert_eq!(session.user_code(), "17");
        assert_eq!(session.user_type(), UserType::SubUser);
        assert_eq!(session.user_email(), "ravi@example.com");
        assert!(session.organization_logo().is_none());
        assert!(features.unwrap().contains("DASHBOARD_ANALYTICS"));
    }

    #[test]
    fn both_spellings_of_name_and_email_are_accepted() {
        let login: Login = serde_json::from_value(json!({
            "token": "abc",
            "userCode": "ADM001",
            "userType": "Admin",
            "userName": "Asha Rao",
            "name": "Asha",
            "userEmail": "asha@example.com",
            "email": "asha.old@example.com"
        }))
        .unwrap();

        let (session, _) = login.into_session().unwrap();
        assert_eq!(session.user_name(), "Asha Rao");
        assert_eq!(session.user_email(), "asha@example.com");
    }

    #[test]
    fn missing_token_is_rejected() {
        let login: Login = serde_json::from_value(json!({
            "userCode": "U1",
            "userType": "Admin",
            "userName": "Asha",
            "userEmail": "asha@example.com"
        }))
        .unwrap();

        assert!(login.into_session().is_err());
    }
}
