// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Super admin (accounts and plans) and admin (sub-users, own subscription,
//! business details) endpoints.

use futures::*;

use hyper;

use super::{Billbook, Nothing};
use bb;
use bb::api::gateway::RequestParam;
use bb::api::request;
use bb::model::{AdminId, Record, SubUserId, SubscriptionId};
use bb::util::futures::into_future_trait;

impl Billbook {
    /// Get every admin account. Super admin only.
    pub fn get_admins(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/superadmin/admins")
    }

    pub fn create_admin(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/superadmin/admins", params!(), payload)
    }

    pub fn update_admin(&self, id: &AdminId, payload: Record) -> bb::Future<Record> {
        put!(self, route!("/superadmin/admins/{id}", id), params!(), payload)
    }

    /// Activate or deactivate an admin account.
    pub fn set_admin_active(&self, id: &AdminId, is_active: bool) -> bb::Future<Record> {
        let payload = request::SetAdminActive::new(id.clone(), is_active);
        put!(self, route!("/superadmin/admins/{id}/status", id), params!(), payload)
    }

    /// Get the subscription plans on offer.
    pub fn get_subscription_plans(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/superadmin/subscriptions")
    }

    pub fn create_subscription_plan(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/superadmin/subscriptions", params!(), payload)
    }

    pub fn update_subscription_plan(&self, id: &SubscriptionId, payload: Record) -> bb::Future<Record> {
        put!(self, route!("/superadmin/subscriptions/{id}", id), params!(), payload)
    }

    /// Put an admin account on a subscription plan.
    pub fn assign_subscription(
        &self,
        admin_id: &AdminId,
        subscription_id: &SubscriptionId,
    ) -> bb::Future<Record> {
        let payload = request::AssignSubscription::new(admin_id.clone(), subscription_id.clone());
        post!(
            self,
            route!("/superadmin/admins/{admin_id}/subscription", admin_id),
            params!(),
            payload
        )
    }

    /// Get the sub-users of the logged in admin.
    pub fn get_sub_users(&self) -> bb::Future<Vec<Record>> {
        get!(self, "/admin/subusers")
    }

    pub fn create_sub_user(&self, payload: Record) -> bb::Future<Record> {
        post!(self, "/admin/subusers", params!(), payload)
    }

    pub fn update_sub_user(&self, id: &SubUserId, payload: Record) -> bb::Future<Record> {
        put!(self, route!("/admin/subusers/{id}", id), params!(), payload)
    }

    pub fn delete_sub_user(&self, id: &SubUserId) -> bb::Future<Record> {
        delete!(self, route!("/admin/subusers/{id}", id))
    }

    /// Get the subscription of the logged in admin.
    pub fn get_my_subscription(&self) -> bb::Future<Record> {
        get!(self, "/admin/subscription")
    }

    /// Get the business details printed on invoices. The result is cached in
    /// the session store.
    pub fn get_business_information(&self) -> bb::Future<Record> {
        let store = self.session_store();
        let f: bb::Future<Record> = get!(self, "/admin/business-information");
        into_future_trait(f.map(move |info| {
            store.set_business_information(&info);
            info
        }))
    }

    /// Update the business details. The server's copy is cached on success.
    pub fn update_business_information(&self, payload: Record) -> bb::Future<Record> {
        let store = self.session_store();
        let f: bb::Future<Record> = put!(self, "/admin/business-information", params!(), payload);
        into_future_trait(f.map(move |info| {
            store.set_business_information(&info);
            info
        }))
    }
}
