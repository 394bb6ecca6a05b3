//! Getting an extracted page to the relay.

pub mod client;
pub mod payload;
pub mod send;

pub use client::{Delivery, DeliveryClient};
pub use payload::{OutboundPayload, build_payload};
pub use send::{SendOutcome, SendRequest, send_page, status_text};
