use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle stage of an order.
///
/// The happy path is strictly linear:
/// `Pending -> Accepted -> PickingUp -> Delivering -> Completed`.
/// `Cancelled` can be reached from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    PickingUp,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::PickingUp,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The stage a courier moves the order to with their next tap.
    ///
    /// Total: statuses outside the courier's part of the chain map to
    /// `Completed`, which is also a fixed point.
    pub fn next(self) -> OrderStatus {
        match self {
            OrderStatus::Accepted => OrderStatus::PickingUp,
            OrderStatus::PickingUp => OrderStatus::Delivering,
            OrderStatus::Delivering => OrderStatus::Completed,
            OrderStatus::Pending | OrderStatus::Completed | OrderStatus::Cancelled => {
                OrderStatus::Completed
            }
        }
    }

    /// Label of the courier's action button for this stage.
    pub fn next_action_label(self) -> &'static str {
        match self {
            OrderStatus::Accepted => "Arrived at store",
            OrderStatus::PickingUp => "Confirm pickup",
            OrderStatus::Delivering => "Confirm delivery",
            OrderStatus::Pending | OrderStatus::Completed | OrderStatus::Cancelled => "Complete",
        }
    }

    /// Whether the state machine allows moving from `self` to `to`.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        match (self, to) {
            (OrderStatus::Pending, OrderStatus::Accepted)
            | (OrderStatus::Accepted, OrderStatus::PickingUp)
            | (OrderStatus::PickingUp, OrderStatus::Delivering)
            | (OrderStatus::Delivering, OrderStatus::Completed) => true,
            (from, OrderStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::PickingUp => "picking-up",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of errand requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    #[default]
    BuyForMe,
    Deliver,
    QueueForMe,
    Cleaning,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::BuyForMe,
        ServiceType::Deliver,
        ServiceType::QueueForMe,
        ServiceType::Cleaning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::BuyForMe => "buy-for-me",
            ServiceType::Deliver => "deliver",
            ServiceType::QueueForMe => "queue-for-me",
            ServiceType::Cleaning => "cleaning",
        }
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
