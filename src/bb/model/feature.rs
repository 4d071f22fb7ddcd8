// Copyright (c) 2026 Billbook. All Rights Reserved.

use std::collections::BTreeSet;
use std::iter::FromIterator;

pub const DASHBOARD_BASIC: &str = "DASHBOARD_BASIC";
pub const DASHBOARD_ANALYTICS: &str = "DASHBOARD_ANALYTICS";
pub const CUSTOMER_MANAGEMENT: &str = "CUSTOMER_MANAGEMENT";
pub const BILL_MANAGEMENT: &str = "BILL_MANAGEMENT";
pub const PAYMENT_MANAGEMENT: &str = "PAYMENT_MANAGEMENT";

/// Features every account gets when nothing else is known.
pub const BASIC_FEATURES: [&str; 4] = [
    DASHBOARD_BASIC,
    CUSTOMER_MANAGEMENT,
    BILL_MANAGEMENT,
    PAYMENT_MANAGEMENT,
];

/// The set of feature codes gating UI capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet(BTreeSet<String>);

impl FeatureSet {
    pub fn basic() -> Self {
        BASIC_FEATURES.iter().cloned().collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::basic()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FeatureSet(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn basic_set_excludes_analytics() {
        let features = FeatureSet::default();
        assert!(features.contains(CUSTOMER_MANAGEMENT));
        assert!(!features.contains(DASHBOARD_ANALYTICS));
        assert_eq!(features.len(), 4);
    }

    #[test]
    fn serializes_as_a_json_array() {
        let features: FeatureSet = vec!["B", "A"].into_iter().collect();
        assert_eq!(serde_json::to_string(&features).unwrap(), "[\"A\",\"B\"]");
    }
}
