use crate::model::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of the consumer who placed an order.
    UserId
);
string_id!(
    /// Identifier of a courier (rider).
    CourierId
);
string_id!(
    /// Identifier of a merchant fulfilling the purchase part of an errand.
    MerchantId
);

/// One of the four actor perspectives on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Consumer,
    Courier,
    Merchant,
    Admin,
}

impl Role {
    /// Target statuses this role is allowed to set.
    pub const fn allowed_targets(self) -> &'static [OrderStatus] {
        match self {
            Role::Consumer => &[OrderStatus::Cancelled],
            Role::Courier => &[
                OrderStatus::Accepted,
                OrderStatus::PickingUp,
                OrderStatus::Delivering,
                OrderStatus::Completed,
            ],
            Role::Merchant => &[OrderStatus::Accepted],
            Role::Admin => &[OrderStatus::Cancelled],
        }
    }

    pub fn may_trigger(self, to: OrderStatus) -> bool {
        self.allowed_targets().contains(&to)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Consumer => "consumer",
            Role::Courier => "courier",
            Role::Merchant => "merchant",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// A role together with the identity it is looking through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleView {
    Consumer(UserId),
    Courier(CourierId),
    Merchant(MerchantId),
    Admin,
}

impl RoleView {
    pub fn role(&self) -> Role {
        match self {
            RoleView::Consumer(_) => Role::Consumer,
            RoleView::Courier(_) => Role::Courier,
            RoleView::Merchant(_) => Role::Merchant,
            RoleView::Admin => Role::Admin,
        }
    }
}
