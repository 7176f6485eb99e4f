//! Domain Layer - Orders, venues and the entity snapshots built from them.
//!
//! Pure data types with serde support. Nothing here performs I/O; the
//! sensors that refresh these values live in the application layer.

/// Entity snapshot types shared by every sensor.
pub mod entity;

/// Active orders and order details.
pub mod order;

/// Venue availability and delivery estimates.
pub mod venue;
