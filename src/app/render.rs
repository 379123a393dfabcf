use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Stroke, vec2};

use crate::data::ConnectionType;
use crate::graph::{Graph, NodeKind};
use crate::util::truncate_chars;

pub(super) const NODE_RADIUS: f32 = 20.0;
pub(super) const ACTIVE_NODE_RADIUS: f32 = 25.0;
const SELECTED_OUTLINE_WIDTH: f32 = 3.0;
const LABEL_OFFSET: f32 = 35.0;
const LABEL_MAX_CHARS: usize = 15;

const BACKGROUND: Color32 = Color32::from_rgb(248, 250, 252);
const SELECTED_OUTLINE: Color32 = Color32::from_rgb(30, 41, 59);
const LABEL_COLOR: Color32 = Color32::from_rgb(51, 65, 85);

pub(super) fn node_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Pillar => Color32::from_rgb(139, 92, 246),
        NodeKind::Goal => Color32::from_rgb(59, 130, 246),
        NodeKind::Project => Color32::from_rgb(16, 185, 129),
        NodeKind::Task => Color32::from_rgb(245, 158, 11),
        NodeKind::Habit => Color32::from_rgb(239, 68, 68),
        NodeKind::Journal => Color32::from_rgb(236, 72, 153),
        NodeKind::Knowledge => Color32::from_rgb(6, 182, 212),
        NodeKind::Value => Color32::from_rgb(132, 204, 22),
    }
}

fn edge_stroke(kind: ConnectionType) -> Stroke {
    match kind {
        ConnectionType::Direct => Stroke::new(2.0, Color32::from_rgb(148, 163, 184)),
        ConnectionType::Related => Stroke::new(1.5, Color32::from_rgb(167, 139, 250)),
    }
}

pub(super) fn node_radius(is_active: bool) -> f32 {
    if is_active {
        ACTIVE_NODE_RADIUS
    } else {
        NODE_RADIUS
    }
}

pub(super) fn display_label(label: &str) -> String {
    truncate_chars(label, LABEL_MAX_CHARS)
}

pub(super) fn paint_background(painter: &Painter, canvas: Rect) {
    painter.rect_filled(canvas, 0.0, BACKGROUND);
}

/// Full repaint of the canvas. Node positions are canvas-local.
pub(super) fn paint_graph(
    painter: &Painter,
    canvas: Rect,
    graph: &Graph,
    selected: Option<usize>,
    hovered: Option<usize>,
) {
    paint_background(painter, canvas);
    let origin = canvas.min.to_vec2();

    for edge in &graph.edges {
        let Some((source, target)) = graph.resolve(edge) else {
            continue;
        };
        let (Some(start), Some(end)) = (graph.nodes[source].position, graph.nodes[target].position)
        else {
            continue;
        };

        painter.line_segment([start + origin, end + origin], edge_stroke(edge.kind));
    }

    for (index, node) in graph.nodes.iter().enumerate() {
        let Some(position) = node.position else {
            continue;
        };

        let center = position + origin;
        let is_selected = selected == Some(index);
        let radius = node_radius(is_selected || hovered == Some(index));

        painter.circle_filled(center, radius, node_color(node.kind));
        if is_selected {
            painter.circle_stroke(
                center,
                radius,
                Stroke::new(SELECTED_OUTLINE_WIDTH, SELECTED_OUTLINE),
            );
        }

        painter.text(
            center + vec2(0.0, LABEL_OFFSET),
            Align2::CENTER_CENTER,
            display_label(&node.label),
            FontId::proportional(12.0),
            LABEL_COLOR,
        );
    }
}
