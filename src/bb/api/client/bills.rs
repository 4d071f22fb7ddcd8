// Copyright (c) 2026 Billbook. All Rights Reserved.

use hyper;

use super::{Billbook, Nothing};
use bb;
use bb::api::gateway::RequestParam;
use bb::api::request;
use bb::model::{BillId, CustomerId, Record};

impl Billbook {
    /// Get a listing of all bills.
    pub fn get_bills(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/bills")
    }

    /// Get a specific bill by its ID.
    pub fn get_bill(&self, id: &BillId) -> bb::Future<Record> {
        get!(self, route!("/bills/{id}", id))
    }

    /// Get the bills raised against a customer.
    pub fn get_bills_by_customer(&self, customer_id: &CustomerId) -> bb::Future<Vec<Record>> {
        get!(self, route!("/bills/customer/{customer_id}", customer_id))
    }

    /// Create a new bill.
    pub fn create_bill(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/bills", params!(), payload)
    }

    /// Update an existing bill.
    pub fn update_bill(&self, id: &BillId, payload: Record) -> bb::Future<Record> {
        put!(self, route!("/bills/{id}", id), params!(), payload)
    }

    /// Set the status of a bill (e.g. "Paid", "Pending").
    pub fn update_bill_status<S: Into<String>>(&self, id: &BillId, status: S) -> bb::Future<Record> {
        let payload = request::UpdateBillStatus::new(id.clone(), status);
        put!(self, route!("/bills/{id}/status", id), params!(), payload)
    }

    /// Delete an existing bill.
    pub fn delete_bill(&self, id: &BillId) -> bb::Future<Record> {
        delete!(self, route!("/bills/{id}", id))
    }
}

#[cfg(test)]
mod tests {
    use hyper::{Method, StatusCode};

    use bb::api::client::tests::logged_in_client;
    use bb::model::{BillId, CustomerId};
    use bb::util::futures::block_on;

    #[test]
    fn bill_status_is_wrapped_with_the_bill_id() {
        let (transport, _, bb) = logged_in_client();
        transport.respond(StatusCode::OK, r#"{"status": true, "body": {"billId": 12}}"#);

        block_on(bb.update_bill_status(&BillId::from(12u64), "Paid")).unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.path, "/api/bills/12/status");
        assert_eq!(sent.body, Some(json!({"billId": 12, "status": "Paid"})));
    }

    #[test]
    fn bills_by_customer_use_the_customer_route() {
        let (transport, _, bb) = logged_in_client();
        transport.respond(StatusCode::OK, r#"[{"billId": 1}, {"billId": 2}]"#);

        let bills = block_on(bb.get_bills_by_customer(&CustomerId::new("C-9"))).unwrap();

        assert_eq!(bills.len(), 2);
        assert_eq!(transport.last().path, "/api/bills/customer/C-9");
    }

    #[test]
    fn creating_a_bill_posts_to_the_collection() {
        let (transport, _, bb) = logged_in_client();
        transport.respond(StatusCode::OK, r#"{"status": true, "body": {"billId": 40}}"#);

        let bill = json!({"customerId": 3, "amount": 1500.5, "dueDate": "2026-11-01"});
        let created = block_on(bb.create_bill(bill.clone())).unwrap();

        assert_eq!(created["billId"], 40);
        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "/api/bills");
        assert_eq!(sent.body, Some(bill));
    }

    #[test]
    fn missing_bill_reports_the_server_message() {
        let (transport, _, bb) = logged_in_client();
        transport.respond(
            StatusCode::NOT_FOUND,
            r#"{"status": false, "message": "Bill not found"}"#,
        );

        let err = block_on(bb.get_bill(&BillId::from(99u64))).unwrap_err();

        assert_eq!(err.kind().status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("Bill not found"));
    }
}
