//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod menu_item;
pub mod order;
pub mod order_item;
pub mod user;
