//! Screen identifiers and serialized layout structures.
//!
//! A layout is the serialized node tree emitted by the external editing
//! surface. The core treats it as an opaque string except for the selection
//! detector, which parses it into the node records defined here.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Serialized layout for one screen.
///
/// `None` until the author has made at least one edit on that screen.
/// Snapshots captured into history are cloned, never mutated in place.
pub type Layout = Option<String>;

/// The three editable screens of a value-assessment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Landing screen shown first in presentation mode.
    Home,
    /// Screen where the viewer enters driver field values.
    Inputs,
    /// Screen rendering calculation results.
    Results,
}

impl Screen {
    /// All screens in flow order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Inputs, Self::Results];

    /// Stable identifier used in routes and serialized state.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Inputs => "inputs",
            Self::Results => "results",
        }
    }

    /// Parses a screen identifier from a route segment.
    pub fn parse(id: &str) -> Result<Self> {
        match id {
            "home" => Ok(Self::Home),
            "inputs" => Ok(Self::Inputs),
            "results" => Ok(Self::Results),
            other => anyhow::bail!("Unknown screen '{other}' (expected home, inputs or results)"),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Component type reference inside a serialized node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeType {
    /// Component name registered with the editing surface (e.g., "VadBlock").
    #[serde(rename = "resolvedName")]
    pub resolved_name: String,
}

/// One node of a serialized layout tree.
///
/// The editing surface serializes its document as a JSON object mapping node
/// ids to records of this shape. Properties beyond `type` and `props` (parent
/// links, child ordering, custom flags) are irrelevant to the core and are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Component type of this node.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Component properties as set by the author.
    #[serde(default)]
    pub props: BTreeMap<String, serde_json::Value>,
}

impl LayoutNode {
    /// Returns a string-valued property, if present.
    #[must_use]
    pub fn string_prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(serde_json::Value::as_str)
    }
}

/// Parses a serialized layout into its node records.
///
/// Returns `None` for empty or structurally invalid input; the caller decides
/// whether that is an error or simply "nothing selected yet".
#[must_use]
pub fn parse_nodes(serialized: &str) -> Option<BTreeMap<String, LayoutNode>> {
    if serialized.trim().is_empty() {
        return None;
    }

    serde_json::from_str(serialized).ok()
}
