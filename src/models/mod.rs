//! Data models for screens, layouts, themes, bundles, and input values.
//!
//! This module contains the core data structures used throughout the
//! application. Models are designed to be independent of the web layer
//! and the session controllers.

pub mod bundle;
pub mod inputs;
pub mod layout;
pub mod theme;

// Re-export all model types
pub use bundle::BuildBundle;
pub use inputs::{FieldInput, FieldValue, InputTable};
pub use layout::{Layout, LayoutNode, NodeType, Screen};
pub use theme::{StyleTokens, ThemeConfig, ThemeMode};
