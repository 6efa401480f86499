//! Domain layer - Core business entities and logic
//!
//! Models here are independent of the database and HTTP layers.

pub mod menu;
pub mod order;
pub mod password;
pub mod user;

pub use menu::{group_by_category, MenuCategory, MenuItem, NewMenuItem};
pub use order::{
    NewOrder, NewOrderLine, Order, OrderDetail, OrderItem, OrderLineDetail, OrderSummary,
};
pub use password::Password;
pub use user::{ProfileUpdate, User, UserChanges, UserResponse};
