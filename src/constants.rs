//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and core domain parameters.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "ValueCraft";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "valuecraft";

/// Project identifier used when no explicit project is requested.
pub const DEMO_PROJECT_ID: &str = "demo-project";

/// Maximum number of snapshots retained per undo/redo stack.
pub const HISTORY_DEPTH: usize = 20;

/// Assumed investment as a fraction of total annual value.
pub const INVESTMENT_RATE: f64 = 0.3;
