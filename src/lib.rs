//! ValueCraft Library
//!
//! This library provides the core functionality of the ValueCraft builder:
//! per-screen undo/redo history, driver selection detection, the calculation
//! engine, the build/present session controllers, and the web API that ties
//! the two application modes together.

// Module declarations
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod history;
pub mod models;
pub mod selection;
pub mod services;
pub mod session;
pub mod web;
