use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::data::{ConnectionType, GraphSource, Snapshot};
use crate::graph::Graph;
use crate::layout::{LayoutConfig, LayoutPersistence};

mod interaction;
mod render;
mod ui;

use interaction::InteractionController;

type LoadResult = Result<Snapshot, String>;

pub struct LifeGraphApp {
    source: Arc<dyn GraphSource>,
    options: ViewOptions,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

#[derive(Clone, Copy, Debug)]
pub struct ViewOptions {
    pub layout: LayoutConfig,
    pub persistence: LayoutPersistence,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: Graph,
    options: ViewOptions,
    layout_pending: bool,
    interaction: InteractionController,
    selected: Option<String>,
    connect_dialog: Option<ConnectionDialog>,
    notices: Vec<Notice>,
    reload_requested: bool,
    stored_connections: usize,
}

struct ConnectionDialog {
    source: usize,
    target: Option<usize>,
    connection_type: ConnectionType,
    query: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoticeLevel {
    Info,
    Error,
}

struct Notice {
    level: NoticeLevel,
    message: String,
    expires_at: f64,
}

impl LifeGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn GraphSource>,
        options: ViewOptions,
    ) -> Self {
        let state = Self::start_load(Arc::clone(&source));
        Self {
            source,
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: Arc<dyn GraphSource>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = source.load().map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: Arc<dyn GraphSource>) -> AppState {
        log::info!("loading workspace {}", source.describe());
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for LifeGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(snapshot)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            snapshot,
                            self.options,
                        ))));
                    }
                    Ok(Err(error)) => {
                        log::error!("workspace load failed: {error}");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading workspace...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the workspace");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(Arc::clone(&self.source)));
                    }
                });
            }
            AppState::Ready(model) => {
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, self.source.as_ref(), is_reloading);

                if std::mem::take(&mut model.reload_requested) && self.reload_rx.is_none() {
                    log::info!("refetching workspace {}", self.source.describe());
                    self.reload_rx = Some(Self::spawn_load(Arc::clone(&self.source)));
                }

                if let Some(rx) = self.reload_rx.take() {
                    let now = ctx.input(|input| input.time);
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.apply_snapshot(snapshot),
                        Ok(Err(error)) => {
                            log::error!("workspace refetch failed: {error}");
                            model.push_notice(now, NoticeLevel::Error, "Failed to refresh data");
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.push_notice(
                                now,
                                NoticeLevel::Error,
                                "Background load worker disconnected",
                            );
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
