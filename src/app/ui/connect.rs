use eframe::egui::{self, Align2, Context};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::data::{ConnectionType, GraphSource, NewConnection};
use crate::graph::{Graph, Node};

use super::super::{ConnectionDialog, NoticeLevel, ViewModel};

const MAX_CANDIDATES: usize = 60;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

fn describe(node: &Node) -> String {
    format!("{}: {}", node.kind.label(), node.label)
}

fn connection_candidates(graph: &Graph, source: usize, query: &str) -> Vec<usize> {
    let query = query.trim();
    let matcher = SkimMatcherV2::default();

    let mut ranked = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != source)
        .filter_map(|(index, node)| {
            if query.is_empty() {
                Some((0, index))
            } else {
                fuzzy_match_score(&matcher, &node.label, query).map(|score| (score, index))
            }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, index)| index).collect()
}

impl ViewModel {
    pub(in crate::app) fn open_connection_dialog(&mut self, source: usize) {
        if source >= self.graph.nodes.len() {
            return;
        }

        self.interaction.pointer_up();
        self.connect_dialog = Some(ConnectionDialog {
            source,
            target: None,
            connection_type: ConnectionType::Related,
            query: String::new(),
        });
    }

    pub(in crate::app) fn draw_connection_dialog(&mut self, ctx: &Context, source: &dyn GraphSource) {
        let Some(mut dialog) = self.connect_dialog.take() else {
            return;
        };
        let Some(from) = self.graph.nodes.get(dialog.source) else {
            return;
        };

        let candidates = connection_candidates(&self.graph, dialog.source, &dialog.query);
        let mut open = true;
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("Create connection")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("From {}", describe(from)));
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Search");
                    ui.text_edit_singleline(&mut dialog.query);
                });

                let selected_text = dialog
                    .target
                    .and_then(|index| self.graph.nodes.get(index))
                    .map(describe)
                    .unwrap_or_else(|| "Choose a node".to_owned());
                egui::ComboBox::from_label("To")
                    .selected_text(selected_text)
                    .width(260.0)
                    .show_ui(ui, |ui| {
                        for &index in candidates.iter().take(MAX_CANDIDATES) {
                            let node = &self.graph.nodes[index];
                            ui.selectable_value(&mut dialog.target, Some(index), describe(node));
                        }
                    });

                ui.horizontal(|ui| {
                    ui.label("Type");
                    for connection_type in ConnectionType::ALL {
                        ui.radio_value(
                            &mut dialog.connection_type,
                            connection_type,
                            connection_type.label(),
                        );
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let create = ui.add_enabled(dialog.target.is_some(), egui::Button::new("Create"));
                    if create.clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel || !open {
            return;
        }

        if submit && let Some(target) = dialog.target.and_then(|index| self.graph.nodes.get(index)) {
            let request = NewConnection {
                source_id: from.id.clone(),
                target_id: target.id.clone(),
                connection_type: dialog.connection_type,
            };
            let now = ctx.input(|input| input.time);

            match source.create_connection(&request) {
                Ok(record) => {
                    log::info!("created connection {}", record.id);
                    self.push_notice(now, NoticeLevel::Info, "Connection created");
                    self.reload_requested = true;
                    return;
                }
                Err(error) => {
                    log::error!(
                        "failed to create connection {} -> {}: {error:#}",
                        request.source_id,
                        request.target_id
                    );
                    self.push_notice(now, NoticeLevel::Error, "Failed to create connection");
                }
            }
        }

        self.connect_dialog = Some(dialog);
    }
}
