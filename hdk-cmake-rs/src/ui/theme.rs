//! Window styling and status colors.

use crate::app::BuildStatus;
use eframe::egui;

/// Colors used by the main window.
pub struct Theme {
    /// Panel behind the form
    pub background: egui::Color32,

    /// Text fields and idle buttons
    pub surface: egui::Color32,

    /// Pressed buttons and text selection
    pub accent: egui::Color32,

    /// Labels and field text
    pub text_primary: egui::Color32,

    /// Idle status line, inactive widget text
    pub text_secondary: egui::Color32,

    /// CMake exited with 0
    pub success: egui::Color32,

    /// CMake is running
    pub warning: egui::Color32,

    /// Non-zero exit, launch failure, dialog error
    pub error: egui::Color32,

    /// Hovered widgets
    pub border: egui::Color32,
}

impl Theme {
    /// Dark palette with an orange accent.
    pub fn dark() -> Self {
        Self {
            background: egui::Color32::from_rgb(30, 31, 34),
            surface: egui::Color32::from_rgb(43, 45, 49),
            accent: egui::Color32::from_rgb(230, 126, 34),
            text_primary: egui::Color32::from_rgb(236, 236, 236),
            text_secondary: egui::Color32::from_rgb(160, 163, 168),
            success: egui::Color32::from_rgb(87, 187, 108),
            warning: egui::Color32::from_rgb(241, 196, 15),
            error: egui::Color32::from_rgb(231, 76, 60),
            border: egui::Color32::from_rgb(70, 73, 79),
        }
    }

    /// Color for the status line.
    pub fn status_color(&self, status: &BuildStatus) -> egui::Color32 {
        match status {
            BuildStatus::Idle => self.text_secondary,
            BuildStatus::Running { .. } => self.warning,
            BuildStatus::Finished(Ok(outcome)) if outcome.success() => self.success,
            BuildStatus::Finished(_) => self.error,
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.surface;
        style.visuals.extreme_bg_color = self.surface;

        style.visuals.widgets.noninteractive.bg_fill = self.background;
        style.visuals.widgets.inactive.bg_fill = self.surface;
        style.visuals.widgets.inactive.weak_bg_fill = self.surface;
        style.visuals.widgets.hovered.bg_fill = self.border;
        style.visuals.widgets.active.bg_fill = self.accent;

        style.visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.inactive.fg_stroke.color = self.text_secondary;
        style.visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        style.visuals.widgets.active.fg_stroke.color = self.text_primary;

        style.visuals.selection.bg_fill = self.accent;
        style.visuals.selection.stroke.color = self.text_primary;

        // Form layout: roomier rows, square-ish fields
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(3.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(3.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(3.0);

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildOutcome;

    #[test]
    fn test_status_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.status_color(&BuildStatus::Idle), theme.text_secondary);
        assert_eq!(
            theme.status_color(&BuildStatus::Finished(Ok(BuildOutcome { exit_code: Some(0) }))),
            theme.success
        );
        assert_eq!(
            theme.status_color(&BuildStatus::Finished(Ok(BuildOutcome { exit_code: Some(1) }))),
            theme.error
        );
        assert_eq!(
            theme.status_color(&BuildStatus::Finished(Err("boom".to_string()))),
            theme.error
        );
    }
}
