// Copyright (c) 2026 Billbook. All Rights Reserved.

use bb::model::{AdminId, SubscriptionId};

/// Activates or deactivates an admin account.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminActive {
    admin_id: AdminId,
    is_active: bool,
}

impl SetAdminActive {
    pub fn new(admin_id: AdminId, is_active: bool) -> Self {
        Self {
            admin_id,
            is_active,
        }
    }
}

/// Puts an admin account on a subscription plan.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSubscription {
    admin_id: AdminId,
    subscription_id: SubscriptionId,
}

impl AssignSubscription {
    pub fn new(admin_id: AdminId, subscription_id: SubscriptionId) -> Self {
        Self {
            admin_id,
            subscription_id,
        }
    }
}
