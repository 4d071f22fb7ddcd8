// Copyright (c) 2026 Billbook. All Rights Reserved.

use bb::model::PaymentId;

/// Marks a payment (typically a cheque) as cleared or not.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatus {
    payment_id: PaymentId,
    cleared: bool,
}

impl UpdatePaymentStatus {
    pub fn new(payment_id: PaymentId, cleared: bool) -> Self {
        Self {
            payment_id,
            cleared,
        }
    }
}
