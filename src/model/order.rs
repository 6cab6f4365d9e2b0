use crate::model::{CourierId, MerchantId, OrderStatus, ServiceType, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DEFAULT_PICKUP_ADDRESS: &str = "Current location";
pub const DEFAULT_DROPOFF_ADDRESS: &str = "Destination";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ord_{}", self.0)
    }
}

/// A postal address with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Location {
    /// A location at the origin; the demo never geocodes.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            lat: 0.0,
            lng: 0.0,
            detail: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Represents an errand order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderDraft`])
/// - Update parameters ([`StatusUpdate`](crate::order_actor::StatusUpdate))
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub courier_id: Option<CourierId>,
    pub merchant_id: Option<MerchantId>,
    pub service_type: ServiceType,
    pub status: OrderStatus,
    pub description: String,
    pub price: f64,
    pub distance_km: f64,
    pub pickup: Location,
    pub dropoff: Location,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Order {
    /// Builds an order from the defaults with every field set in `draft` laid over them.
    ///
    /// No validation happens here: negative prices, empty addresses and the like
    /// are stored as given.
    pub fn from_draft(
        id: OrderId,
        draft: OrderDraft,
        default_user: &UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: draft.user_id.unwrap_or_else(|| default_user.clone()),
            courier_id: draft.courier_id,
            merchant_id: draft.merchant_id,
            service_type: draft.service_type.unwrap_or_default(),
            status: draft.status.unwrap_or(OrderStatus::Pending),
            description: draft.description.unwrap_or_default(),
            price: draft.price.unwrap_or(0.0),
            distance_km: draft.distance_km.unwrap_or(0.0),
            pickup: draft.pickup.unwrap_or_else(|| Location::new(DEFAULT_PICKUP_ADDRESS)),
            dropoff: draft.dropoff.unwrap_or_else(|| Location::new(DEFAULT_DROPOFF_ADDRESS)),
            created_at,
            tags: draft.tags.unwrap_or_default(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Payload for creating a new order: every field is optional.
///
/// Unset fields fall back to the defaults documented on [`Order::from_draft`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: Option<UserId>,
    pub courier_id: Option<CourierId>,
    pub merchant_id: Option<MerchantId>,
    pub service_type: Option<ServiceType>,
    pub status: Option<OrderStatus>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub distance_km: Option<f64>,
    pub pickup: Option<Location>,
    pub dropoff: Option<Location>,
    pub tags: Option<Vec<String>>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn courier(mut self, courier_id: impl Into<CourierId>) -> Self {
        self.courier_id = Some(courier_id.into());
        self
    }

    pub fn merchant(mut self, merchant_id: impl Into<MerchantId>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    pub fn pickup(mut self, pickup: Location) -> Self {
        self.pickup = Some(pickup);
        self
    }

    pub fn dropoff(mut self, dropoff: Location) -> Self {
        self.dropoff = Some(dropoff);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}
