// Copyright (c) 2026 Billbook. All Rights Reserved.

use bb::model::BillId;

/// A bill `PUT /bills/{id}/status` request.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillStatus {
    bill_id: BillId,
    status: String,
}

impl UpdateBillStatus {
    pub fn new<S: Into<String>>(bill_id: BillId, status: S) -> Self {
        Self {
            bill_id,
            status: status.into(),
        }
    }
}
