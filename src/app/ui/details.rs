use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::render::node_color;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Node Details");
        ui.add_space(6.0);

        let Some(index) = self.interaction.selected() else {
            ui.label("Select a node in the graph to see its record.");
            ui.add_space(6.0);
            ui.small("Drag nodes to rearrange them. Double-click a node to connect it.");
            return;
        };

        let Some(node) = self.graph.nodes.get(index) else {
            ui.label("Selected node no longer exists in the graph.");
            return;
        };

        let fields = node.data.fields();
        let neighbors = self
            .graph
            .neighbors(index)
            .into_iter()
            .filter_map(|(other, connection_type)| {
                self.graph
                    .nodes
                    .get(other)
                    .map(|other_node| (other, other_node.kind, other_node.label.clone(), connection_type))
            })
            .collect::<Vec<_>>();

        ui.label(RichText::new(node.label.as_str()).strong());
        ui.colored_label(node_color(node.kind), node.kind.label());
        ui.small(node.id.as_str());
        ui.add_space(6.0);

        let connect_requested = ui.button("Connect to another node").clicked();

        ui.separator();
        ui.label(RichText::new("Record").strong());
        for (key, value) in &fields {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("{key}:")).weak());
                ui.label(value.as_str());
            });
        }

        ui.separator();
        ui.label(RichText::new(format!("Connections ({})", neighbors.len())).strong());
        let mut pending_selection = None;
        if neighbors.is_empty() {
            ui.label("No connections yet.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("neighbor_list")
                .show(ui, |ui| {
                    for (other, kind, label, connection_type) in &neighbors {
                        let text = format!("{}: {label} ({})", kind.label(), connection_type.label());
                        if ui.selectable_label(false, text).clicked() {
                            pending_selection = Some(*other);
                        }
                    }
                });
        }

        if let Some(other) = pending_selection {
            self.select_node(other);
        }
        if connect_requested {
            self.open_connection_dialog(index);
        }
    }
}
