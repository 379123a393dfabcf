use eframe::egui::{self, Align2, Color32, CursorIcon, FontId, Rect, Sense, Ui};

use super::super::ViewModel;
use super::super::interaction::InteractionEvent;
use super::super::render::{paint_background, paint_graph};

impl ViewModel {
    fn handle_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let origin = rect.min.to_vec2();
        let (pressed, released, latest) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.latest_pos(),
            )
        });

        if let Some(screen) = latest {
            let pointer = screen - origin;

            if pressed
                && response.hovered()
                && let Some(InteractionEvent::NodeSelected(index)) =
                    self.interaction.pointer_down(&self.graph.nodes, pointer)
            {
                self.select_node(index);
            }

            // Runs every frame; the controller only flags real changes.
            if self.interaction.is_dragging() || response.hovered() {
                self.interaction.pointer_move(&mut self.graph.nodes, pointer);
            } else {
                self.interaction.pointer_left();
            }

            if response.double_clicked()
                && let Some(InteractionEvent::ConnectFrom(index)) =
                    self.interaction.double_click(&self.graph.nodes, pointer)
            {
                self.open_connection_dialog(index);
            }
        }

        if released {
            self.interaction.pointer_up();
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        if self.layout_pending {
            self.run_layout(rect.size());
        }

        let painter = ui.painter_at(rect);
        if self.graph.is_empty() {
            paint_background(&painter, rect);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No records in this workspace yet.",
                FontId::proportional(14.0),
                Color32::from_gray(110),
            );
            return;
        }

        if self.connect_dialog.is_none() {
            self.handle_pointer(ui, rect, &response);
        }

        if self.interaction.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if self.interaction.hovered().is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        paint_graph(
            &painter,
            rect,
            &self.graph,
            self.interaction.selected(),
            self.interaction.hovered(),
        );

        if self.interaction.take_repaint() {
            ui.ctx().request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{
        CentralPanel, Context, Event, Frame, Modifiers, PointerButton, Pos2, RawInput, pos2, vec2,
    };

    use super::*;
    use crate::app::ViewOptions;
    use crate::data::{Goal, Pillar, Snapshot};
    use crate::layout::LayoutPersistence;

    fn assert_near(actual: Pos2, expected: Pos2) {
        assert!((actual - expected).length() < 1e-3, "{actual:?} != {expected:?}");
    }

    struct Session {
        ctx: Context,
        model: ViewModel,
        time: f64,
    }

    impl Session {
        fn start() -> Self {
            let snapshot = Snapshot {
                pillars: vec![Pillar {
                    id: "1".to_string(),
                    name: "Health".to_string(),
                    ..Default::default()
                }],
                goals: vec![
                    Goal {
                        id: "a".to_string(),
                        title: "Run".to_string(),
                        pillar_id: Some("1".to_string()),
                        ..Default::default()
                    },
                    Goal {
                        id: "b".to_string(),
                        title: "Rest".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            };
            let options = ViewOptions {
                layout: Default::default(),
                persistence: LayoutPersistence::Reset,
            };

            let mut session = Self {
                ctx: Context::default(),
                model: ViewModel::new(snapshot, options),
                time: 0.0,
            };
            session.frame(Vec::new());
            session
        }

        fn frame(&mut self, events: Vec<Event>) {
            self.time += 0.05;
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
                time: Some(self.time),
                events,
                ..Default::default()
            };
            let model = &mut self.model;
            let _ = self.ctx.run(input, |ctx| {
                CentralPanel::default()
                    .frame(Frame::NONE)
                    .show(ctx, |ui| model.draw_graph(ui));
            });
        }

        fn node(&self, index: usize) -> Pos2 {
            self.model.graph.nodes[index]
                .position
                .unwrap_or_else(|| panic!("node {index} was never laid out"))
        }

        fn move_to(&mut self, pos: Pos2) {
            self.frame(vec![Event::PointerMoved(pos)]);
        }

        fn button(&mut self, pos: Pos2, pressed: bool) {
            self.frame(vec![Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::NONE,
            }]);
        }
    }

    #[test]
    fn first_frame_runs_the_layout() {
        let session = Session::start();
        assert!(!session.model.layout_pending);
        assert!(
            session
                .model
                .graph
                .nodes
                .iter()
                .all(|node| node.position.is_some())
        );
    }

    #[test]
    fn dragging_follows_the_pointer_past_the_canvas_edge() {
        let mut session = Session::start();
        let start = session.node(1);
        let grab = start + vec2(5.0, 5.0);

        session.move_to(grab);
        assert_eq!(session.model.interaction.hovered(), Some(1));

        session.button(grab, true);
        assert_eq!(session.model.interaction.selected(), Some(1));
        assert_eq!(session.model.selected.as_deref(), Some("goal-a"));
        assert!(session.model.interaction.is_dragging());

        session.move_to(grab + vec2(40.0, -30.0));
        assert_near(session.node(1), start + vec2(40.0, -30.0));

        let outside = pos2(-60.0, 650.0);
        session.move_to(outside);
        assert_near(session.node(1), outside - vec2(5.0, 5.0));

        session.button(outside, false);
        assert!(!session.model.interaction.is_dragging());
        assert_near(session.node(1), outside - vec2(5.0, 5.0));
    }

    #[test]
    fn pressing_empty_canvas_keeps_the_selection() {
        let mut session = Session::start();
        let node = session.node(2);
        session.move_to(node);
        session.button(node, true);
        session.button(node, false);
        assert_eq!(session.model.interaction.selected(), Some(2));

        let empty = pos2(4.0, 4.0);
        session.move_to(empty);
        session.button(empty, true);

        assert_eq!(session.model.interaction.selected(), Some(2));
        assert!(!session.model.interaction.is_dragging());
        session.button(empty, false);
    }

    #[test]
    fn double_click_opens_the_connection_dialog() {
        let mut session = Session::start();
        let node = session.node(0);

        session.move_to(node);
        session.button(node, true);
        session.button(node, false);
        assert!(session.model.connect_dialog.is_none());

        session.button(node, true);
        assert!(session.model.interaction.is_dragging());
        session.button(node, false);

        let dialog = session
            .model
            .connect_dialog
            .as_ref()
            .map(|dialog| dialog.source);
        assert_eq!(dialog, Some(0));
        assert!(!session.model.interaction.is_dragging());
    }
}
