//! Role-scoped projections over an order snapshot.
//!
//! All functions here are pure: they read a slice of orders (newest first)
//! and never touch the actor.

use crate::model::{CourierId, Order, OrderStatus, RoleView, UserId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether `order` belongs in `view`.
pub fn is_visible(view: &RoleView, order: &Order) -> bool {
    match view {
        RoleView::Consumer(user) => &order.user_id == user,
        RoleView::Courier(courier) => order.courier_id.as_ref() == Some(courier),
        // The merchant queue is every order still in progress.
        RoleView::Merchant(_) => order.is_active(),
        RoleView::Admin => true,
    }
}

/// The orders `view` may see, in collection order.
pub fn orders_for(view: &RoleView, orders: &[Order]) -> Vec<Order> {
    orders.iter().filter(|o| is_visible(view, o)).cloned().collect()
}

/// The courier task hall: pending orders nobody has taken yet.
pub fn available_orders(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending && o.courier_id.is_none())
        .cloned()
        .collect()
}

/// Orders a courier is still working on.
pub fn active_for_courier(courier: &CourierId, orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.courier_id.as_ref() == Some(courier) && o.is_active())
        .cloned()
        .collect()
}

/// The consumer's most recent order that is still in progress.
pub fn active_for_consumer(user: &UserId, orders: &[Order]) -> Option<Order> {
    orders
        .iter()
        .find(|o| &o.user_id == user && o.is_active())
        .cloned()
}

/// Summary figures shown on the dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    /// Every status is present, zero counts included.
    pub by_status: BTreeMap<OrderStatus, usize>,
    /// Sum of prices over all orders.
    pub gross_value: f64,
}

impl DashboardStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut by_status: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|&s| (s, 0)).collect();
        for order in orders {
            *by_status.entry(order.status).or_default() += 1;
        }

        Self {
            total: orders.len(),
            active: orders.iter().filter(|o| o.is_active()).count(),
            by_status,
            gross_value: orders.iter().map(|o| o.price).sum(),
        }
    }
}
