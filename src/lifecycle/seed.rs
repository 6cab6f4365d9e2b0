//! Demo fixtures loaded by [`MarketplaceSystem::seed_demo_orders`](super::MarketplaceSystem::seed_demo_orders).

use crate::model::{Location, OrderDraft, OrderStatus, ServiceType};

/// The demo orders, oldest first.
///
/// Creation prepends, so after seeding the pending coffee run sits at the
/// head of the collection.
pub fn demo_orders() -> Vec<OrderDraft> {
    vec![
        OrderDraft::new()
            .user("user_2")
            .courier("rider_1")
            .service_type(ServiceType::Deliver)
            .status(OrderStatus::Delivering)
            .description("Deliver an urgent document to the Civic Center")
            .price(45.0)
            .distance_km(8.5)
            .pickup(Location::new("Tian'an Cyber Park").with_coordinates(22.54, 114.05))
            .dropoff(Location::new("Civic Center, Block B").with_coordinates(22.543, 114.057))
            .tags(["documents", "high-value"]),
        OrderDraft::new()
            .user("user_1")
            .merchant("mer_1")
            .service_type(ServiceType::BuyForMe)
            .status(OrderStatus::Pending)
            .description("Buy a Luckin coconut latte, less ice, half sugar")
            .price(24.0)
            .distance_km(1.2)
            .pickup(Location::new("Luckin Coffee (Science Park)").with_coordinates(22.5431, 114.0579))
            .dropoff(
                Location::new("Science Park Tower A")
                    .with_coordinates(22.5441, 114.0589)
                    .with_detail("Room 1203"),
            )
            .tags(["drinks", "urgent"]),
    ]
}
