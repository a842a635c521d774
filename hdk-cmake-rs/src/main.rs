#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::egui;
use hdk_cmake_rs::ui::main_window::{WINDOW_SIZE, WINDOW_TITLE};
use hdk_cmake_rs::{AppState, MainWindow, ToolConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hdk_cmake_rs=info")),
        )
        .init();

    let config = ToolConfig::from_env().context("invalid HDK_CMAKE_* configuration")?;
    tracing::info!(version = %config.houdini_version, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([420.0, 170.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(MainWindow::new(cc, AppState::new(config))))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
