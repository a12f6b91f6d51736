//! Persistent subscription list.

mod channels;
mod types;

pub use channels::ChannelStore;
pub use types::{AddOutcome, RemoveOutcome, StoreError};
