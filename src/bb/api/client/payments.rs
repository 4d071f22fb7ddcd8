// Copyright (c) 2026 Billbook. All Rights Reserved.

use hyper;

use super::{Billbook, Nothing};
use bb;
use bb::api::gateway::RequestParam;
use bb::api::request;
use bb::model::{BillId, CustomerId, PaymentId, Record};

impl Billbook {
    /// Get a listing of all payments.
    pub fn get_payments(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/payments")
    }

    /// Get the payments made against a bill.
    pub fn get_payments_by_bill(&self, bill_id: &BillId) -> bb::Future<Vec<Record>> {
        get!(self, route!("/payments/bill/{bill_id}", bill_id))
    }

    /// Get the payments made by a customer.
    pub fn get_payments_by_customer(&self, customer_id: &CustomerId) -> bb::Future<Vec<Record>> {
        get!(self, route!("/payments/customer/{customer_id}", customer_id))
    }

    /// Record a new payment.
    pub fn create_payment(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/payments", params!(), payload)
    }

    /// Mark a payment as cleared (or not yet cleared).
    pub fn update_payment_status(&self, payment_id: &PaymentId, cleared: bool) -> bb::Future<Record> {
        let payload = request::UpdatePaymentStatus::new(payment_id.clone(), cleared);
        put!(self, "/payments/update-status", params!(), payload)
    }

    /// Delete an existing payment.
    pub fn delete_payment(&self, id: &PaymentId) -> bb::Future<Record> {
        delete!(self, route!("/payments/{id}", id))
    }
}
