//! giftd — a small gift-registry service.
//!
//! Seeds a SQLite registry from a CSV gift sheet, serves it over a JSON API,
//! arbitrates concurrent claims so at most one visitor wins an item, and
//! emails the operator when a claim lands.

pub mod config;
pub mod normalize;
pub mod notify;
pub mod registry;
pub mod rest;
pub mod sheet;
pub mod storage;

use std::sync::Arc;

use config::Config;
use notify::Notifier;
use registry::RegistryStore;

/// Shared state handed to request handlers.
///
/// Built once in `main` after config validation, schema setup, and sync;
/// handlers receive it as `State<Arc<AppContext>>`.
pub struct AppContext {
    pub config: Config,
    pub registry: RegistryStore,
    pub notifier: Arc<dyn Notifier>,
}
