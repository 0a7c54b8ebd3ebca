use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// A safe default for channel buffers.
/// 128 is usually enough for domain events in a vertical slice.
const DEFAULT_CAPACITY: usize = 128;
const MIN_CAPACITY: usize = 1;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

struct ChannelState {
    sender: Box<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelState").finish_non_exhaustive()
    }
}

/// A thread-safe broadcast event bus.
///
/// Channels are indexed by the [`TypeId`] of the event, so each event type
/// gets its own fan-out channel, created lazily on first use.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to an event of type `T` with the default buffer capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registered channel for
    /// `T` holds an unexpected sender type (registry invariant violation).
    ///
    /// # Examples
    /// ```rust
    /// use atlas_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct UserCreated(u64);
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), atlas_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe::<UserCreated>()?;
    /// bus.publish(UserCreated(1))?;
    /// assert_eq!(rx.recv().await.unwrap().0, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to an event of type `T` with a specific buffer capacity.
    ///
    /// The capacity only applies when this call creates the channel; an
    /// already-registered channel keeps its original capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        let sender = self.ensure_channel::<T>(capacity)?;
        Ok(sender.subscribe())
    }

    /// Publishes an event, returning the number of receivers it reached.
    ///
    /// Publishing with no active subscribers is not an error; the event is
    /// dropped and `Ok(0)` is returned.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registered channel for
    /// `T` holds an unexpected sender type.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registered channel for
    /// `T` holds an unexpected sender type.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.ensure_channel::<T>(DEFAULT_CAPACITY)?;

        sender.send(event).map_or_else(
            |_| {
                trace!(event = std::any::type_name::<T>(), "Event dropped: no active subscribers");
                Ok(0)
            },
            |count| {
                trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
                Ok(count)
            },
        )
    }

    /// Gracefully shuts down the bus by dropping all underlying channels.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn ensure_channel<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        {
            let channels = self.channels.read();
            if let Some(existing) = channels.get(&id) {
                return downcast_sender::<T>(existing);
            }
        }

        let mut channels = self.channels.write();
        let entry = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), capacity, "Initializing new event channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { sender: Box::new(tx) }
        });
        downcast_sender::<T>(entry)
    }
}

fn downcast_sender<T: Event>(
    state: &ChannelState,
) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
    state.sender.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| {
        EventBusError::TypeMismatch {
            message: std::any::type_name::<T>().into(),
            context: Some("Unexpected event type".into()),
        }
    })
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
