//! Session controllers for the two application modes.
//!
//! A build session owns the editable state of the authoring mode; a
//! presentation session drives the read-only viewer over a published bundle.

pub mod build;
pub mod present;

// Re-export the controller types
pub use build::{BuildSession, PublishOutcome};
pub use present::{PresentSession, Presentation};
