// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Record identifiers.
//!
//! The API hands out ids as either numbers or strings; both deserialize into
//! the same string-backed newtype.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(id: S) -> Self {
                $name(id.into())
            }

            /// Unwraps the value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'a> From<&'a $name> for String {
            fn from(id: &'a $name) -> Self {
                id.0.clone()
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name::new(id)
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(id: &'a str) -> Self {
                $name::new(id)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name::new(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serialize_id(&self.0, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(IdVisitor).map($name)
            }
        }
    };
}

// Numeric ids go back over the wire as numbers.
fn serialize_id<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match id.parse::<i64>() {
        Ok(n) if n.to_string() == id => serializer.serialize_i64(n),
        _ => serializer.serialize_str(id),
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

record_id!(
    /// An identifier for a customer.
    CustomerId
);
record_id!(
    /// An identifier for a bill.
    BillId
);
record_id!(
    /// An identifier for a payment.
    PaymentId
);
record_id!(
    /// An identifier for an admin account (managed by a super admin).
    AdminId
);
record_id!(
    /// An identifier for a sub-user of an admin account.
    SubUserId
);
record_id!(
    /// An identifier for a subscription plan.
    SubscriptionId
);
