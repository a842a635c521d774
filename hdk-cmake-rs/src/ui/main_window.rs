//! Main window implementation using eframe/egui.
//!
//! Two path fields, three buttons and a status line.

use crate::app::{AppState, BuildStatus, WindowAction};
use crate::platform::NATIVE_FOLDER_PICKER;
use crate::ui::components::PathRow;
use crate::ui::Theme;
use eframe::egui;
use std::time::Duration;

/// Window title.
pub const WINDOW_TITLE: &str = "HDK CMake Tools";

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [560.0, 190.0];

/// Main window state.
pub struct MainWindow {
    /// Form and build state
    pub state: AppState,

    /// Pending actions from the UI
    pub actions: Vec<WindowAction>,

    /// Close was requested while a build was running
    close_pending: bool,

    theme: Theme,
}

impl MainWindow {
    /// Create a new MainWindow.
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            state,
            actions: Vec::new(),
            close_pending: false,
            theme,
        }
    }

    /// Render the window content.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.actions.clear();
        let building = self.state.is_building();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(WINDOW_TITLE);
            ui.label(format!("Houdini {}", self.state.config.houdini_version));
            ui.separator();

            if PathRow::show(
                ui,
                "HDK Project",
                &mut self.state.project_path,
                NATIVE_FOLDER_PICKER,
                !building,
            ) {
                self.actions.push(WindowAction::BrowseProject);
            }

            if PathRow::show(
                ui,
                "Houdini Root",
                &mut self.state.host_root,
                NATIVE_FOLDER_PICKER,
                !building,
            ) {
                self.actions.push(WindowAction::BrowseHostRoot);
            }

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let build = ui.add_enabled(
                    !building,
                    egui::Button::new("Build").min_size(egui::vec2(90.0, 0.0)),
                );
                if build.clicked() {
                    self.actions.push(WindowAction::Build);
                }

                if building {
                    ui.spinner();
                }

                let color = self.theme.status_color(&self.state.status);
                if self.close_pending {
                    ui.colored_label(color, "Closing after the build finishes...");
                } else {
                    ui.colored_label(color, self.state.status_text());
                }
            });

            // A failed build already shows its message in the status line.
            if let Some(ref error) = self.state.error_message {
                if !matches!(self.state.status, BuildStatus::Finished(Err(_))) {
                    ui.colored_label(self.theme.error, format!("Error: {}", error));
                }
            }
        });
    }

    /// Take all pending actions.
    pub fn take_actions(&mut self) -> Vec<WindowAction> {
        std::mem::take(&mut self.actions)
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_build();

        // Keep the window (and the process) alive until the build has put
        // the user environment back.
        if ctx.input(|i| i.viewport().close_requested()) && self.state.is_building() {
            tracing::info!("close requested during build, closing once it finishes");
            self.close_pending = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
        if self.close_pending && !self.state.is_building() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.show(ctx);

        for action in self.take_actions() {
            self.state.handle_action(action);
        }

        if self.state.is_building() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}
