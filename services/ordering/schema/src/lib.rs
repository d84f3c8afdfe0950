//! sea-orm entities for the ordering database.
//!
//! Every foreign key is `ON DELETE RESTRICT`; see the migration crate for the
//! column lengths and indexes backing these models.

pub mod food_categories;
pub mod foods;
pub mod order_details;
pub mod orders;
pub mod roles;
pub mod user_roles;
pub mod user_tokens;
pub mod users;
