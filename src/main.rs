mod app;
mod data;
mod graph;
mod layout;
mod util;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::data::JsonWorkspace;
use crate::layout::{LayoutConfig, LayoutPersistence};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "LIFE_GRAPH_WORKSPACE", default_value = "life-graph.json")]
    workspace: PathBuf,

    /// Write a sample workspace when the file does not exist yet.
    #[arg(long)]
    demo: bool,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 920.0)]
    height: f32,

    #[arg(long, default_value_t = layout::DEFAULT_ITERATIONS)]
    iterations: usize,

    #[arg(long, default_value_t = layout::DEFAULT_REPULSION)]
    repulsion: f32,

    #[arg(long, default_value_t = layout::DEFAULT_ATTRACTION)]
    attraction: f32,

    #[arg(long, default_value_t = layout::DEFAULT_CENTERING)]
    centering: f32,

    /// Keep node positions when the workspace is refetched.
    #[arg(long)]
    keep_positions: bool,
}

impl Args {
    fn view_options(&self) -> app::ViewOptions {
        app::ViewOptions {
            layout: LayoutConfig {
                iterations: self.iterations,
                repulsion: self.repulsion,
                attraction: self.attraction,
                centering: self.centering,
                ..LayoutConfig::default()
            },
            persistence: if self.keep_positions {
                LayoutPersistence::Keep
            } else {
                LayoutPersistence::Reset
            },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_logging();

    let workspace = JsonWorkspace::new(args.workspace.clone());
    if args.demo {
        match workspace.write_demo_if_missing() {
            Ok(true) => log::info!("wrote sample workspace to {}", workspace.path().display()),
            Ok(false) => {}
            Err(error) => log::error!("could not write sample workspace: {error:#}"),
        }
    }

    let view_options = args.view_options();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "life-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LifeGraphApp::new(
                cc,
                Arc::new(workspace),
                view_options,
            )))
        }),
    )
}
