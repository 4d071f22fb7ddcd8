// Copyright (c) 2026 Billbook. All Rights Reserved.

use hyper;

use super::{Billbook, Nothing};
use bb;
use bb::api::gateway::RequestParam;
use bb::model::{CustomerId, Record};

impl Billbook {
    /// Get a listing of the customers of the current organization.
    pub fn get_customers(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/customers")
    }

    /// Get a specific customer by its ID.
    pub fn get_customer(&self, id: &CustomerId) -> bb::Future<Record> {
        get!(self, route!("/customers/{id}", id))
    }

    /// Search customers by name, phone or customer code.
    pub fn search_customers<S: Into<String>>(&self, query: S) -> bb::Future<Vec<Record>> {
        get!(self, "/customers/search", params!("query" => query))
    }

    /// Create a new customer.
    pub fn create_customer(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/customers", params!(), payload)
    }

    /// Update an existing customer.
    pub fn update_customer(&self, id: &CustomerId, payload: Record) -> bb::Future<Record> {
        put!(self, route!("/customers/{id}", id), params!(), payload)
    }

    /// Delete an existing customer.
    pub fn delete_customer(&self, id: &CustomerId) -> bb::Future<Record> {
        delete!(self, route!("/customers/{id}", id))
    }
}
