//! Markup Stripping
//!
//! Removes HTML tags and common Markdown syntax from text, leaving plain text
//! with normalised blank-line spacing.

pub mod domain;
pub use domain::{Config, Pipeline, Rule, strip};

/// Reading and writing documents on disk.
pub mod storage;
