//! Live event stream
//!
//! Workers publish [`Event`]s to the [`EventBus`]; every connected observer
//! receives them serialized as JSON, in publish order.

mod bus;
mod types;

pub use bus::{EventBus, ObserverHandle, ObserverId};
pub use types::{Event, EventKind, EventLevel, Step};
