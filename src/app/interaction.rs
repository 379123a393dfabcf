use eframe::egui::{Pos2, Vec2};

use crate::graph::Node;

pub(in crate::app) const HIT_RADIUS: f32 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum InteractionEvent {
    NodeSelected(usize),
    ConnectFrom(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    index: usize,
    offset: Vec2,
}

/// Pointer state machine over the node arena. Coordinates are canvas-local.
#[derive(Debug, Default)]
pub(in crate::app) struct InteractionController {
    selected: Option<usize>,
    hovered: Option<usize>,
    drag: Option<Drag>,
    dirty: bool,
}

/// First node in arena order whose center lies within `HIT_RADIUS`.
pub(in crate::app) fn hit_test(nodes: &[Node], pointer: Pos2) -> Option<usize> {
    nodes.iter().position(|node| {
        node.position
            .is_some_and(|position| position.distance(pointer) <= HIT_RADIUS)
    })
}

impl InteractionController {
    pub(in crate::app) fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub(in crate::app) fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub(in crate::app) fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub(in crate::app) fn pointer_down(
        &mut self,
        nodes: &[Node],
        pointer: Pos2,
    ) -> Option<InteractionEvent> {
        let index = hit_test(nodes, pointer)?;
        let position = nodes[index].position?;

        self.selected = Some(index);
        self.drag = Some(Drag {
            index,
            offset: pointer - position,
        });
        self.dirty = true;
        Some(InteractionEvent::NodeSelected(index))
    }

    pub(in crate::app) fn pointer_move(&mut self, nodes: &mut [Node], pointer: Pos2) {
        if let Some(drag) = self.drag {
            let next = Some(pointer - drag.offset);
            if let Some(node) = nodes.get_mut(drag.index)
                && node.position != next
            {
                node.position = next;
                self.dirty = true;
            }
            return;
        }

        let hovered = hit_test(nodes, pointer);
        if hovered != self.hovered {
            self.hovered = hovered;
            self.dirty = true;
        }
    }

    pub(in crate::app) fn pointer_left(&mut self) {
        if self.drag.is_none() && self.hovered.take().is_some() {
            self.dirty = true;
        }
    }

    pub(in crate::app) fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub(in crate::app) fn double_click(
        &self,
        nodes: &[Node],
        pointer: Pos2,
    ) -> Option<InteractionEvent> {
        hit_test(nodes, pointer).map(InteractionEvent::ConnectFrom)
    }

    pub(in crate::app) fn select(&mut self, selected: Option<usize>) {
        if self.selected != selected {
            self.selected = selected;
            self.dirty = true;
        }
    }

    /// Drops per-build state after the arena was replaced.
    pub(in crate::app) fn reset(&mut self, selected: Option<usize>) {
        self.selected = selected;
        self.hovered = None;
        self.drag = None;
        self.dirty = true;
    }

    pub(in crate::app) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(in crate::app) fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::data::{Goal, Record};
    use crate::graph::NodeKind;

    fn nodes_at(points: &[Pos2]) -> Vec<Node> {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let id = index.to_string();
                let mut node = Node::new(
                    NodeKind::Goal,
                    &id,
                    id.clone(),
                    Record::Goal(Goal::default()),
                );
                node.position = Some(*point);
                node
            })
            .collect()
    }

    #[test]
    fn hit_test_at_center_and_just_outside() {
        let nodes = nodes_at(&[pos2(100.0, 100.0), pos2(300.0, 100.0)]);

        assert_eq!(hit_test(&nodes, pos2(100.0, 100.0)), Some(0));
        assert_eq!(hit_test(&nodes, pos2(300.0, 100.0)), Some(1));
        assert_eq!(hit_test(&nodes, pos2(126.0, 100.0)), None);
        assert_eq!(hit_test(&nodes, pos2(300.0, 74.0)), None);
    }

    #[test]
    fn overlapping_hits_resolve_by_arena_order() {
        let nodes = nodes_at(&[pos2(100.0, 100.0), pos2(110.0, 100.0)]);
        assert_eq!(hit_test(&nodes, pos2(109.0, 100.0)), Some(0));
    }

    #[test]
    fn unpositioned_nodes_are_never_hit() {
        let mut nodes = nodes_at(&[pos2(0.0, 0.0)]);
        nodes[0].position = None;
        assert_eq!(hit_test(&nodes, pos2(0.0, 0.0)), None);
    }

    #[test]
    fn drag_keeps_the_captured_offset() {
        let mut nodes = nodes_at(&[pos2(200.0, 150.0)]);
        let mut controller = InteractionController::default();

        let pointer = pos2(205.0, 147.0);
        assert_eq!(
            controller.pointer_down(&nodes, pointer),
            Some(InteractionEvent::NodeSelected(0))
        );
        assert!(controller.is_dragging());
        assert_eq!(controller.selected(), Some(0));

        let offset = vec2(5.0, -3.0);
        for pointer in [pos2(260.0, 180.0), pos2(-40.0, 900.0), pos2(10.0, 10.0)] {
            controller.pointer_move(&mut nodes, pointer);
            assert_eq!(nodes[0].position, Some(pointer - offset));
            assert!(controller.take_repaint());
        }

        controller.pointer_move(&mut nodes, pos2(10.0, 10.0));
        assert!(!controller.take_repaint());

        controller.pointer_up();
        assert!(!controller.is_dragging());

        controller.pointer_move(&mut nodes, pos2(500.0, 500.0));
        assert_eq!(nodes[0].position, Some(pos2(5.0, 13.0)));
    }

    #[test]
    fn pointer_down_on_empty_space_changes_nothing() {
        let nodes = nodes_at(&[pos2(0.0, 0.0)]);
        let mut controller = InteractionController::default();

        assert_eq!(controller.pointer_down(&nodes, pos2(400.0, 400.0)), None);
        assert!(!controller.is_dragging());
        assert_eq!(controller.selected(), None);
        assert!(!controller.take_repaint());
    }

    #[test]
    fn hover_repaints_only_on_change() {
        let mut nodes = nodes_at(&[pos2(50.0, 50.0)]);
        let mut controller = InteractionController::default();

        controller.pointer_move(&mut nodes, pos2(400.0, 400.0));
        assert!(!controller.take_repaint());

        controller.pointer_move(&mut nodes, pos2(55.0, 50.0));
        assert_eq!(controller.hovered(), Some(0));
        assert!(controller.take_repaint());

        controller.pointer_move(&mut nodes, pos2(52.0, 50.0));
        assert!(!controller.take_repaint());

        controller.pointer_move(&mut nodes, pos2(400.0, 400.0));
        assert_eq!(controller.hovered(), None);
        assert!(controller.take_repaint());
    }

    #[test]
    fn double_click_requests_connection_regardless_of_drag() {
        let nodes = nodes_at(&[pos2(50.0, 50.0)]);
        let mut controller = InteractionController::default();

        assert_eq!(
            controller.double_click(&nodes, pos2(50.0, 50.0)),
            Some(InteractionEvent::ConnectFrom(0))
        );

        controller.pointer_down(&nodes, pos2(50.0, 50.0));
        assert_eq!(
            controller.double_click(&nodes, pos2(60.0, 50.0)),
            Some(InteractionEvent::ConnectFrom(0))
        );
        assert_eq!(controller.double_click(&nodes, pos2(90.0, 50.0)), None);
    }

    #[test]
    fn reset_drops_drag_and_hover() {
        let mut nodes = nodes_at(&[pos2(50.0, 50.0)]);
        let mut controller = InteractionController::default();
        controller.pointer_move(&mut nodes, pos2(50.0, 50.0));
        controller.pointer_down(&nodes, pos2(50.0, 50.0));

        controller.reset(None);
        assert!(!controller.is_dragging());
        assert_eq!(controller.hovered(), None);
        assert_eq!(controller.selected(), None);
    }
}
