//! Diagram projection
//!
//! Renders the populated graph as Mermaid or GraphViz DOT text. Containment
//! edges are drawn solid, semantic edges dashed and shared pointers bold.

use super::JournalProjection;
use crate::address_space::{type_names, AddressSpace, EdgeCategory, EdgeKind, NodeHandle};
use crate::aggregate::AasGraph;
use crate::events::{AddressSpaceEvent, JournalEntry};
use indexmap::IndexMap;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeStyle {
    Folder,
    Identifiable,
    Element,
    Reference,
}

impl NodeStyle {
    fn of(type_name: &str) -> Self {
        match type_name {
            type_names::FOLDER => NodeStyle::Folder,
            type_names::ADMINISTRATION_SHELL
            | type_names::ASSET
            | type_names::SUBMODEL
            | type_names::CONCEPT_DESCRIPTION => NodeStyle::Identifiable,
            type_names::REFERENCE => NodeStyle::Reference,
            _ => NodeStyle::Element,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            NodeStyle::Folder => "folder",
            NodeStyle::Identifiable => "identifiable",
            NodeStyle::Element => "element",
            NodeStyle::Reference => "reference",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            NodeStyle::Folder => "lightgrey",
            NodeStyle::Identifiable => "lightpink",
            NodeStyle::Element => "lightblue",
            NodeStyle::Reference => "lightyellow",
        }
    }
}

#[derive(Debug, Clone)]
struct DiagramNode {
    browse_name: String,
    type_name: String,
    style: NodeStyle,
}

/// Projection that accumulates nodes and edges for rendering
#[derive(Debug, Clone, Default)]
pub struct DiagramProjection {
    nodes: IndexMap<NodeHandle, DiagramNode>,
    edges: Vec<(NodeHandle, NodeHandle, EdgeKind)>,
    reference_types: Vec<String>,
    checkpoint: Option<u64>,
}

impl DiagramProjection {
    /// Create an empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty projection that draws every Reference Node subtype
    /// used in `graph` as a reference
    pub fn for_graph<S: AddressSpace>(graph: &AasGraph<S>) -> Self {
        let mut projection = Self::new();
        let Some(reference) = graph.address_space().find_type(type_names::REFERENCE) else {
            return projection;
        };
        for node in graph.address_space().node_handles() {
            if !graph.address_space().is_subtype_of(node, reference) {
                continue;
            }
            if let Some(type_name) = graph.type_name_of(node) {
                projection = projection.with_reference_type(type_name);
            }
        }
        projection
    }

    /// Draw nodes of a custom Reference Node subtype as references
    pub fn with_reference_type(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        if !self.reference_types.contains(&type_name) {
            self.reference_types.push(type_name);
        }
        self
    }

    fn style_of(&self, type_name: &str) -> NodeStyle {
        if self.reference_types.iter().any(|name| name == type_name) {
            NodeStyle::Reference
        } else {
            NodeStyle::of(type_name)
        }
    }

    /// Number of nodes that will be drawn
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges that will be drawn
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Render as a Mermaid flowchart
    pub fn to_mermaid(&self) -> String {
        let mut output = String::new();
        // writing into a String cannot fail
        let _ = self.write_mermaid(&mut output);
        output
    }

    /// Render as a GraphViz digraph
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        let _ = self.write_dot(&mut output);
        output
    }

    fn write_mermaid(&self, output: &mut impl Write) -> fmt::Result {
        writeln!(output, "graph TD")?;
        writeln!(output, "    classDef folder fill:#eee,stroke:#333;")?;
        writeln!(output, "    classDef identifiable fill:#f9f,stroke:#333,stroke-width:2px;")?;
        writeln!(output, "    classDef element fill:#bbf,stroke:#333;")?;
        writeln!(output, "    classDef reference fill:#ffb,stroke:#333;")?;
        writeln!(output)?;

        for (handle, node) in &self.nodes {
            writeln!(
                output,
                "    n{}[\"{}<br/><i>{}</i>\"]:::{}",
                handle.index(),
                node.browse_name.replace('"', "#quot;"),
                node.type_name,
                node.style.class()
            )?;
        }
        writeln!(output)?;

        for (from, to, kind) in &self.edges {
            let arrow = match kind.category() {
                EdgeCategory::Containment => "-->",
                EdgeCategory::Semantic => "-.->",
                EdgeCategory::Pointer => "==>",
            };
            writeln!(output, "    n{} {}|{}| n{}", from.index(), arrow, kind, to.index())?;
        }
        Ok(())
    }

    fn write_dot(&self, output: &mut impl Write) -> fmt::Result {
        writeln!(output, "digraph AddressSpace {{")?;
        writeln!(output, "    rankdir=TB;")?;
        writeln!(output, "    node [shape=box, style=filled];")?;
        writeln!(output)?;

        for (handle, node) in &self.nodes {
            writeln!(
                output,
                "    n{} [label=\"{}\\n{}\", fillcolor={}];",
                handle.index(),
                dot_escape(&node.browse_name),
                node.type_name,
                node.style.color()
            )?;
        }
        writeln!(output)?;

        for (from, to, kind) in &self.edges {
            let style = match kind.category() {
                EdgeCategory::Containment => "solid",
                EdgeCategory::Semantic => "dashed",
                EdgeCategory::Pointer => "bold",
            };
            writeln!(
                output,
                "    n{} -> n{} [label=\"{}\", style={}];",
                from.index(),
                to.index(),
                kind,
                style
            )?;
        }
        writeln!(output, "}}")
    }
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl JournalProjection for DiagramProjection {
    fn handle_entry(&mut self, entry: &JournalEntry) {
        match &entry.event {
            AddressSpaceEvent::NodeCreated {
                node,
                type_name,
                browse_name,
            } => {
                self.nodes.insert(
                    *node,
                    DiagramNode {
                        browse_name: browse_name.clone(),
                        type_name: type_name.clone(),
                        style: self.style_of(type_name),
                    },
                );
            }
            AddressSpaceEvent::EdgeCreated { kind, from, to } => {
                self.edges.push((*from, *to, kind.clone()));
            }
            _ => {}
        }
        self.checkpoint = Some(entry.sequence);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.checkpoint = None;
    }

    fn checkpoint(&self) -> Option<u64> {
        self.checkpoint
    }
}
