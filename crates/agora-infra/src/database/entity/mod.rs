//! SeaORM entities - the persisted document shapes.

pub mod post;
pub mod user;
