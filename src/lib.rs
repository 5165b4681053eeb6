// Design Patterns as Generic Mechanics
// Each classic pattern is reduced to one reusable piece of Rust.

//! # Design Patterns Catalog
//!
//! ## Mechanics
//! - [`holder`]: swap the active unit at runtime (Strategy, Command, undo/redo)
//! - [`compose`]: stack layers around an inner unit (Decorator)
//! - [`observer`]: broadcast a payload to attached subscribers (Observer)
//! - [`factory`]: pick a product by a closed selector (Simple Factory, Factory,
//!   Factory Method)
//! - [`singleton`]: one lazily built instance per type (Singleton)
//!
//! ## Demonstrations
//! [`catalog`] puts every mechanic to work on a small scenario and writes the
//! result to a [`sink::Sink`]. Run them all with:
//! ```bash
//! cargo run --bin catalog
//! cargo run --bin catalog -- observer decorator
//! ```

pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod factory;
pub mod holder;
pub mod observer;
pub mod singleton;
pub mod sink;

pub use catalog::PatternKind;
pub use compose::{Decorator, Evaluate, Layer, Wrap};
pub use config::{CatalogConfig, ConfigError, SinkKind};
pub use error::PatternError;
pub use factory::{Creator, Factory, VariantTable};
pub use holder::{History, Holder, Reversible};
pub use observer::{Subject, Subscriber};
pub use singleton::{instance, ConstructToken, Singleton};
pub use sink::{ConsoleSink, LogSink, MemorySink, Sink};
