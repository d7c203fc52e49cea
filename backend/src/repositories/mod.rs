//! Repository layer: one interface per entity, exposing only the query
//! shapes the handlers actually use, so the storage engine can be swapped
//! without touching business logic.

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

pub use carts::{CartRepository, CartRepositoryTrait};
pub use orders::{OrderRepository, OrderRepositoryTrait};
pub use products::{ProductRepository, ProductRepositoryTrait};
pub use users::{UserRepository, UserRepositoryTrait};
