//! Selection detector: which drivers are present in an Inputs layout.
//!
//! The set of selected drivers is derived, never stored. It is re-computed
//! from the serialized Inputs layout every time that layout changes, by
//! parsing the layout into its node tree and reading a typed property on
//! each driver block. Detection is idempotent and its output order is the
//! catalog declaration order, independent of where blocks sit in the layout.

use std::collections::BTreeSet;

use crate::catalog::VadId;
use crate::models::layout::{parse_nodes, LayoutNode};

/// Component name the editing surface registers for driver blocks.
const VAD_BLOCK: &str = "VadBlock";

/// Detects the drivers present in a serialized layout.
///
/// Returns the empty set for an absent, empty, or unparsable layout. The
/// result contains only catalog drivers, in catalog declaration order, with
/// no duplicates.
#[must_use]
pub fn detect(layout: Option<&str>) -> Vec<VadId> {
    let Some(serialized) = layout else {
        return Vec::new();
    };
    let Some(nodes) = parse_nodes(serialized) else {
        return Vec::new();
    };

    let found: BTreeSet<VadId> = nodes.values().filter_map(driver_of).collect();

    // Catalog order, not layout order, so downstream keying is deterministic.
    VadId::ALL
        .into_iter()
        .filter(|id| found.contains(id))
        .collect()
}

/// Reads the driver referenced by a node, if it is a driver block.
///
/// Blocks serialized by current editors carry the stable id in a `vad` prop.
/// Older layouts only carried the display name in `title`; those are still
/// resolved, but through a typed property read rather than a substring scan,
/// so free text elsewhere in the layout can never cause a false positive.
fn driver_of(node: &LayoutNode) -> Option<VadId> {
    if node.node_type.resolved_name != VAD_BLOCK {
        return None;
    }

    if let Some(key) = node.string_prop("vad") {
        return VadId::from_key(key);
    }
    node.string_prop("title").and_then(VadId::from_display_name)
}
