//! Gift registry — the durable table of gift items, sheet reconciliation,
//! and the claim/unclaim state machine.

pub mod model;
pub mod store;

pub use model::{ClaimOutcome, GiftAdminView, GiftItem, GiftView, UnclaimOutcome, CLAIMED_SENTINEL};
pub use store::{RegistryError, RegistryStore, SyncReport};
