//! buswire-protocol: wire message types and validation
//!
//! Both buswire endpoints speak JSON over WebSockets. This crate defines the
//! message types for the producer protocol (bus position updates) and the
//! consumer protocol (viewport bounds updates, periodic bus frames), plus the
//! field-by-field validators that turn inbound text into typed records or
//! canonical error replies.

pub mod messages;
pub mod validate;

pub use messages::{BusFrame, BusRecord, ErrorReply, ViewportBounds};
pub use validate::{validate_bounds_update, validate_bus_update, ValidationError};
