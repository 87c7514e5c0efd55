//! # Observed Layouts
//!
//! The flattened content of one ODIM_H5 file as extracted by a layout source:
//! every group, dataset, and attribute in document order. Attributes carry
//! their value; groups and datasets carry none.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::value::AttributeValue;
use crate::version::StandardVersion;

/// One extracted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedNode {
    /// Where the node lives.
    pub location: Location,
    /// Attribute value. `None` for groups and datasets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// Group the source did not list itself but that encloses a listed node.
    /// Rules see it; the undescribed-node pass does not.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub implied: bool,
}

impl ObservedNode {
    /// An attribute node.
    pub fn attribute(location: Location, value: impl Into<AttributeValue>) -> Self {
        Self {
            location,
            value: Some(value.into()),
            implied: false,
        }
    }

    /// A group or dataset node.
    pub fn container(location: Location) -> Self {
        Self {
            location,
            value: None,
            implied: false,
        }
    }

    /// A group known only because something inside it was listed.
    pub fn implied_container(location: Location) -> Self {
        Self {
            implied: true,
            ..Self::container(location)
        }
    }
}

/// All nodes extracted from one input file, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedTree {
    nodes: Vec<ObservedNode>,
}

impl ObservedTree {
    /// A tree holding `nodes` in order.
    pub fn new(nodes: Vec<ObservedNode>) -> Self {
        Self { nodes }
    }

    /// Append a node.
    pub fn push(&mut self, node: ObservedNode) {
        self.nodes.push(node);
    }

    /// Nodes in extraction order.
    pub fn nodes(&self) -> &[ObservedNode] {
        &self.nodes
    }

    /// Mutable access to the nodes, in extraction order.
    pub fn nodes_mut(&mut self) -> &mut [ObservedNode] {
        &mut self.nodes
    }

    /// Iterate nodes in extraction order.
    pub fn iter(&self) -> std::slice::Iter<'_, ObservedNode> {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node at `location`.
    pub fn get(&self, location: &Location) -> Option<&ObservedNode> {
        self.nodes.iter().find(|n| &n.location == location)
    }

    /// Text value of the attribute at `location`, if present and textual.
    pub fn text(&self, location: &Location) -> Option<&str> {
        self.get(location)
            .and_then(|n| n.value.as_ref())
            .and_then(AttributeValue::as_text)
    }

    /// The standard revision the file declares.
    ///
    /// Reads `/what#version` (`"H5rad 2.1"`) first, then the root
    /// `Conventions` attribute (`"ODIM_H5/V2_1"`).
    pub fn declared_version(&self) -> Option<StandardVersion> {
        let what_version = Location::attribute(["what"], "version");
        let conventions = Location::attribute(Vec::<String>::new(), "Conventions");
        [what_version, conventions]
            .iter()
            .filter_map(|loc| self.text(loc))
            .find_map(|text| text.parse().ok())
    }

    /// The product type the file declares in `/what#object` (`PVOL`, `SCAN`, ...).
    pub fn product(&self) -> Option<&str> {
        self.text(&Location::attribute(["what"], "object"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl<'a> IntoIterator for &'a ObservedTree {
    type Item = &'a ObservedNode;
    type IntoIter = std::slice::Iter<'a, ObservedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl FromIterator<ObservedNode> for ObservedTree {
    fn from_iter<T: IntoIterator<Item = ObservedNode>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
