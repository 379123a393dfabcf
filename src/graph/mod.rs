//! Node/edge arena shared by the layout, the renderer and the interaction controller.
//!
//! Nodes live in a dense `Vec` and are addressed by index for the lifetime of one
//! build; edges refer to nodes by id and are resolved through `index_by_id`.

mod build;

use std::collections::HashMap;

use eframe::egui::Pos2;

use crate::data::{ConnectionType, Record};

pub use build::build_graph;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Pillar,
    Goal,
    Project,
    Task,
    Habit,
    Journal,
    Knowledge,
    Value,
}

impl NodeKind {
    pub const ALL: [Self; 8] = [
        Self::Pillar,
        Self::Goal,
        Self::Project,
        Self::Task,
        Self::Habit,
        Self::Journal,
        Self::Knowledge,
        Self::Value,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Pillar => "pillar",
            Self::Goal => "goal",
            Self::Project => "project",
            Self::Task => "task",
            Self::Habit => "habit",
            Self::Journal => "journal",
            Self::Knowledge => "knowledge",
            Self::Value => "value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pillar => "Pillar",
            Self::Goal => "Goal",
            Self::Project => "Project",
            Self::Task => "Task",
            Self::Habit => "Habit",
            Self::Journal => "Journal",
            Self::Knowledge => "Knowledge",
            Self::Value => "Value",
        }
    }
}

pub fn node_id(kind: NodeKind, record_id: &str) -> String {
    format!("{}-{record_id}", kind.prefix())
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub data: Record,
    /// `None` until the first layout pass.
    pub position: Option<Pos2>,
}

impl Node {
    pub fn new(kind: NodeKind, record_id: &str, label: String, data: Record) -> Self {
        Self {
            id: node_id(kind, record_id),
            label,
            kind,
            data,
            position: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: ConnectionType,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                log::warn!("duplicate node id {}; edges resolve to the last one", node.id);
            }
        }

        Self {
            nodes,
            edges,
            index_by_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn resolve(&self, edge: &Edge) -> Option<(usize, usize)> {
        Some((self.index_of(&edge.source)?, self.index_of(&edge.target)?))
    }

    pub fn resolved_edges(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter_map(|edge| self.resolve(edge))
            .collect()
    }

    pub fn neighbors(&self, index: usize) -> Vec<(usize, ConnectionType)> {
        let mut neighbors = Vec::new();
        for edge in &self.edges {
            let Some((source, target)) = self.resolve(edge) else {
                continue;
            };
            if source == index && target != index {
                neighbors.push((target, edge.kind));
            } else if target == index && source != index {
                neighbors.push((source, edge.kind));
            }
        }
        neighbors
    }

    /// Copies positions from a previous build onto nodes with the same id.
    pub fn adopt_positions(&mut self, previous: &Graph) {
        for node in &mut self.nodes {
            if let Some(index) = previous.index_of(&node.id) {
                node.position = previous.nodes[index].position;
            }
        }
    }

    pub fn clear_positions(&mut self) {
        for node in &mut self.nodes {
            node.position = None;
        }
    }
}
