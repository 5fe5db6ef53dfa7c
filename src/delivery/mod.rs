pub mod client;
pub mod message;

pub use client::{DeliveryService, EmailJsClient};
pub use message::DeliveryRequest;
