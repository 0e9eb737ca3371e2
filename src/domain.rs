//! Markup stripping.
//!
//! Stripping is a fixed sequence of independent text rewrites. Each [`Rule`]
//! rewrites the whole buffer and hands its output to the next; a [`Pipeline`]
//! holds the order.

mod config;
pub use config::{Config, LoadError};

mod pipeline;
pub use pipeline::{Pipeline, strip};

/// The individual rewrite rules.
pub mod rule;
pub use rule::Rule;
