use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::graph::{Graph, Node};

pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_REPULSION: f32 = 1000.0;
pub const DEFAULT_ATTRACTION: f32 = 0.01;
pub const DEFAULT_CENTERING: f32 = 0.001;
pub const DEFAULT_INITIAL_RADIUS_RATIO: f32 = 0.6;

/// Force constants tuned for graphs of tens of nodes.
///
/// Every pass visits all node pairs, so a run costs `iterations * n^2`.
/// Large workspaces need a node cap or spatial partitioning before raising
/// these limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub repulsion: f32,
    pub attraction: f32,
    pub centering: f32,
    pub initial_radius_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            repulsion: DEFAULT_REPULSION,
            attraction: DEFAULT_ATTRACTION,
            centering: DEFAULT_CENTERING,
            initial_radius_ratio: DEFAULT_INITIAL_RADIUS_RATIO,
        }
    }
}

/// What happens to node positions when the graph is rebuilt from fresh data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutPersistence {
    #[default]
    Reset,
    Keep,
}

pub fn canvas_center(canvas: Vec2) -> Pos2 {
    pos2(canvas.x * 0.5, canvas.y * 0.5)
}

pub fn seed_positions(nodes: &mut [Node], center: Pos2, config: &LayoutConfig) {
    let n = nodes.len();
    let radius = config.initial_radius_ratio * center.x.min(center.y);

    for (index, node) in nodes.iter_mut().enumerate() {
        if node.position.is_none() {
            let angle = (index as f32 / n as f32) * TAU;
            node.position = Some(center + vec2(angle.cos(), angle.sin()) * radius);
        }
    }
}

fn apply_repulsion(positions: &mut [Pos2], movable: &[bool], strength: f32) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = positions[j] - positions[i];
            let distance = delta.length();
            if distance > 0.0 {
                let push = delta / distance * (strength / (distance * distance));
                if movable[i] {
                    positions[i] -= push;
                }
                if movable[j] {
                    positions[j] += push;
                }
            }
        }
    }
}

fn apply_attraction(
    positions: &mut [Pos2],
    movable: &[bool],
    edges: &[(usize, usize)],
    coefficient: f32,
) {
    for &(source, target) in edges {
        if source == target {
            continue;
        }

        let delta = positions[target] - positions[source];
        let distance = delta.length();
        if distance > 0.0 {
            let pull = delta / distance * (distance * coefficient);
            if movable[source] {
                positions[source] += pull;
            }
            if movable[target] {
                positions[target] -= pull;
            }
        }
    }
}

fn apply_centering(positions: &mut [Pos2], movable: &[bool], center: Pos2, coefficient: f32) {
    for (position, _) in positions.iter_mut().zip(movable).filter(|(_, movable)| **movable) {
        *position += (center - *position) * coefficient;
    }
}

/// Places unpositioned nodes on a circle, then runs exactly
/// `config.iterations` passes over every node. Returns the number of passes run.
pub fn force_layout(graph: &mut Graph, canvas: Vec2, config: &LayoutConfig) -> usize {
    let movable = vec![true; graph.nodes.len()];
    run_passes(graph, canvas, config, &movable)
}

/// Lays out only the nodes that have no position yet. Placed nodes stay where
/// they are but still push and pull on the new ones.
pub fn place_new_nodes(graph: &mut Graph, canvas: Vec2, config: &LayoutConfig) -> usize {
    let movable = graph
        .nodes
        .iter()
        .map(|node| node.position.is_none())
        .collect::<Vec<_>>();
    run_passes(graph, canvas, config, &movable)
}

fn run_passes(graph: &mut Graph, canvas: Vec2, config: &LayoutConfig, movable: &[bool]) -> usize {
    if !movable.contains(&true) {
        return 0;
    }

    let center = canvas_center(canvas);
    seed_positions(&mut graph.nodes, center, config);

    let edges = graph.resolved_edges();
    let mut positions = graph
        .nodes
        .iter()
        .map(|node| node.position.unwrap_or(center))
        .collect::<Vec<_>>();

    let mut passes = 0;
    for _ in 0..config.iterations {
        apply_repulsion(&mut positions, movable, config.repulsion);
        apply_attraction(&mut positions, movable, &edges, config.attraction);
        apply_centering(&mut positions, movable, center, config.centering);
        passes += 1;
    }

    for (node, position) in graph.nodes.iter_mut().zip(positions) {
        node.position = Some(position);
    }

    passes
}
