use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Align2, Color32, Context, Layout, RichText, vec2};

use crate::data::{GraphSource, Snapshot};
use crate::graph::{Graph, NodeKind, build_graph};
use crate::layout::{LayoutPersistence, force_layout, place_new_nodes};

use super::super::interaction::InteractionController;
use super::super::render::node_color;
use super::super::{Notice, NoticeLevel, ViewModel, ViewOptions};

impl ViewModel {
    const NOTICE_SECONDS: f64 = 4.0;

    pub(in crate::app) fn new(snapshot: Snapshot, options: ViewOptions) -> Self {
        let mut model = Self {
            graph: Graph::default(),
            options,
            layout_pending: false,
            interaction: InteractionController::default(),
            selected: None,
            connect_dialog: None,
            notices: Vec::new(),
            reload_requested: false,
            stored_connections: 0,
        };
        model.apply_snapshot(snapshot);
        model
    }

    /// Replaces the graph after a (re)fetch.
    ///
    /// With `LayoutPersistence::Reset` every node starts over from the circular
    /// seed layout; `Keep` carries positions over by node id.
    pub(in crate::app) fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let mut graph = build_graph(&snapshot);
        if self.options.persistence == LayoutPersistence::Keep {
            graph.adopt_positions(&self.graph);
        }

        let selected = self
            .selected
            .as_deref()
            .and_then(|id| graph.index_of(id));
        if selected.is_none() {
            self.selected = None;
        }

        log::info!(
            "rebuilt graph: {} nodes, {} edges ({} stored connections)",
            graph.nodes.len(),
            graph.edges.len(),
            snapshot.connections.len()
        );

        self.layout_pending = graph.nodes.iter().any(|node| node.position.is_none());
        self.stored_connections = snapshot.connections.len();
        self.connect_dialog = None;
        self.interaction.reset(selected);
        self.graph = graph;
    }

    pub(in crate::app) fn run_layout(&mut self, canvas: egui::Vec2) {
        let started = Instant::now();
        let passes = match self.options.persistence {
            LayoutPersistence::Reset => force_layout(&mut self.graph, canvas, &self.options.layout),
            LayoutPersistence::Keep => place_new_nodes(&mut self.graph, canvas, &self.options.layout),
        };
        log::debug!(
            "layout: {passes} passes over {} nodes in {:?}",
            self.graph.nodes.len(),
            started.elapsed()
        );
        self.layout_pending = false;
        self.interaction.mark_dirty();
    }

    pub(in crate::app) fn relayout(&mut self) {
        self.graph.clear_positions();
        self.layout_pending = true;
    }

    pub(in crate::app) fn select_node(&mut self, index: usize) {
        let Some(node) = self.graph.nodes.get(index) else {
            return;
        };

        log::debug!("selected {}", node.id);
        self.selected = Some(node.id.clone());
        self.interaction.select(Some(index));
    }

    pub(in crate::app) fn push_notice(
        &mut self,
        now: f64,
        level: NoticeLevel,
        message: impl Into<String>,
    ) {
        self.notices.push(Notice {
            level,
            message: message.into(),
            expires_at: now + Self::NOTICE_SECONDS,
        });
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, source: &dyn GraphSource, is_loading: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("life-graph");
                    ui.separator();
                    ui.label(format!("workspace: {}", source.describe()));
                    ui.label(format!("nodes: {}", self.graph.nodes.len()));
                    ui.label(format!("edges: {}", self.graph.edges.len()));
                    ui.label(format!("stored connections: {}", self.stored_connections));
                    let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        self.reload_requested = true;
                    }
                    if ui.button("Re-run layout").clicked() {
                        self.relayout();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        for kind in NodeKind::ALL.iter().rev() {
                            ui.colored_label(node_color(*kind), kind.label());
                        }
                        if is_loading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));

        self.draw_connection_dialog(ctx, source);
        self.draw_notices(ctx);
    }

    fn draw_notices(&mut self, ctx: &Context) {
        let now = ctx.input(|input| input.time);
        self.notices.retain(|notice| notice.expires_at > now);
        if self.notices.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(Align2::RIGHT_BOTTOM, vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                for notice in &self.notices {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        let text = RichText::new(notice.message.as_str());
                        match notice.level {
                            NoticeLevel::Info => ui.label(text),
                            NoticeLevel::Error => {
                                ui.label(text.color(Color32::from_rgb(220, 38, 38)))
                            }
                        };
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::data::{ConnectionRecord, ConnectionType, Goal, Pillar};
    use crate::layout::LayoutConfig;

    fn options(persistence: LayoutPersistence) -> ViewOptions {
        ViewOptions {
            layout: LayoutConfig::default(),
            persistence,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
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
        }
    }

    fn with_connection(mut snapshot: Snapshot) -> Snapshot {
        snapshot.connections.push(ConnectionRecord {
            id: "c".to_string(),
            source_id: "goal-a".to_string(),
            target_id: "goal-b".to_string(),
            connection_type: ConnectionType::Related,
        });
        snapshot
    }

    #[test]
    fn refetch_resets_positions_by_default() {
        let mut model = ViewModel::new(snapshot(), options(LayoutPersistence::Reset));
        model.run_layout(vec2(800.0, 600.0));
        model.graph.nodes[0].position = Some(pos2(1.0, 1.0));

        model.apply_snapshot(with_connection(snapshot()));

        assert!(model.layout_pending);
        assert!(model.graph.nodes.iter().all(|node| node.position.is_none()));
        assert_eq!(model.graph.edges.len(), 2);
        assert_eq!(model.stored_connections, 1);
    }

    #[test]
    fn keep_persistence_carries_positions() {
        let mut model = ViewModel::new(snapshot(), options(LayoutPersistence::Keep));
        model.run_layout(vec2(800.0, 600.0));
        model.graph.nodes[0].position = Some(pos2(1.0, 1.0));

        model.apply_snapshot(with_connection(snapshot()));

        assert!(!model.layout_pending);
        assert_eq!(model.graph.nodes[0].position, Some(pos2(1.0, 1.0)));
    }

    #[test]
    fn keep_persistence_only_places_added_nodes() {
        let mut model = ViewModel::new(snapshot(), options(LayoutPersistence::Keep));
        model.run_layout(vec2(800.0, 600.0));
        model.graph.nodes[0].position = Some(pos2(100.0, 100.0));
        let before = model
            .graph
            .nodes
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>();

        let mut grown = snapshot();
        grown.goals.push(Goal {
            id: "c".to_string(),
            title: "Stretch".to_string(),
            pillar_id: Some("1".to_string()),
            ..Default::default()
        });
        model.apply_snapshot(grown);
        assert!(model.layout_pending);

        model.run_layout(vec2(800.0, 600.0));

        assert!(!model.layout_pending);
        for (node, position) in model.graph.nodes.iter().zip(&before) {
            assert_eq!(node.position, *position, "{} moved", node.id);
        }
        assert_eq!(model.graph.nodes[3].id, "goal-c");
        assert!(model.graph.nodes[3].position.is_some());
    }

    #[test]
    fn selection_survives_rebuild_by_id() {
        let mut model = ViewModel::new(snapshot(), options(LayoutPersistence::Reset));
        model.select_node(2);
        assert_eq!(model.selected.as_deref(), Some("goal-b"));

        let mut reordered = snapshot();
        reordered.goals.reverse();
        model.apply_snapshot(reordered);

        assert_eq!(model.interaction.selected(), Some(1));
        assert_eq!(model.selected.as_deref(), Some("goal-b"));

        let mut without = snapshot();
        without.goals.retain(|goal| goal.id != "b");
        model.apply_snapshot(without);
        assert_eq!(model.interaction.selected(), None);
        assert_eq!(model.selected, None);
    }

    #[test]
    fn relayout_clears_positions() {
        let mut model = ViewModel::new(snapshot(), options(LayoutPersistence::Keep));
        model.run_layout(vec2(800.0, 600.0));
        assert!(!model.layout_pending);

        model.relayout();
        assert!(model.layout_pending);
        assert!(model.graph.nodes.iter().all(|node| node.position.is_none()));
    }
}
