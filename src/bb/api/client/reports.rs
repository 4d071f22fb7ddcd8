// Copyright (c) 2026 Billbook. All Rights Reserved.

use chrono::NaiveDate;

use hyper;

use super::{Billbook, Nothing};
use bb;
use bb::api::gateway::RequestParam;
use bb::model::{CustomerId, Record};

impl Billbook {
    /// Get the headline numbers for the dashboard.
    pub fn get_dashboard_summary(&self) -> bb::Future<Record> {
        get!(self, "/reports/dashboard")
    }

    /// Get a customer's statement: bills, payments and running balance.
    pub fn get_customer_statement(&self, customer_id: &CustomerId) -> bb::Future<Record> {
        get!(self, route!("/reports/customer-statement/{customer_id}", customer_id))
    }

    /// Get the bills with an outstanding balance.
    pub fn get_outstanding_report(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/reports/outstanding")
    }

    /// Get payments received in a date range (both ends inclusive).
    pub fn get_payment_report(&self, from: NaiveDate, to: NaiveDate) -> bb::Future<Vec<Record>> {
        get!(
            self,
            "/reports/payments",
            params!(
                "from" => from.format("%Y-%m-%d").to_string(),
                "to" => to.format("%Y-%m-%d").to_string()
            )
        )
    }
}
