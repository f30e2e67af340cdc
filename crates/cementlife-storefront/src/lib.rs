//! Async driver for the storefront state. Owns the region lookup and order
//! store collaborators, runs their calls outside the state lock, and
//! publishes a fresh [`StorefrontView`](cementlife_core::StorefrontView)
//! after every action.

pub mod memory;
pub mod storefront;

pub use memory::{MemoryOrderStore, MemoryStoreError, StoredOrder};
pub use storefront::{Storefront, SubmitOutcome};
