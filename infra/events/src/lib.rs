//! # Event Bus
//!
//! A type-safe, asynchronous broadcast bus used for inter-slice events.
//!
//! Events are identified by their Rust type; each type gets its own fan-out
//! channel created lazily on first subscribe or publish. Built on `tokio`
//! broadcast channels with `FxHashMap` + `parking_lot::RwLock` for the
//! registry.
//!
//! # Example
//!
//! ```rust
//! use atlas_event_bus::{EventBus, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct UserCreated { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<UserCreated>()?;
//!     bus.publish(UserCreated { id: 42 })?;
//!
//!     let event = rx.recv().await.unwrap();
//!     assert_eq!(event.id, 42);
//!     Ok(())
//! }
//! ```

mod bus;
mod error;

pub use bus::{Event, EventBus};
pub use error::EventBusError;
