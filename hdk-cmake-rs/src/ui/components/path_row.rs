//! Path field UI component.
//!
//! Renders a labelled text field with a browse button.

use eframe::egui;

/// Label column width so both rows line up.
const LABEL_WIDTH: f32 = 110.0;

/// Path row component.
pub struct PathRow;

impl PathRow {
    /// Render a path row. Returns true when the browse button was clicked.
    pub fn show(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut String,
        browse_enabled: bool,
        enabled: bool,
    ) -> bool {
        let mut browse = false;

        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));

                let button_width = 70.0;
                let field_width =
                    (ui.available_width() - button_width - ui.spacing().item_spacing.x).max(80.0);
                ui.add(egui::TextEdit::singleline(value).desired_width(field_width));

                let button = ui.add_enabled(
                    browse_enabled,
                    egui::Button::new("Open...").min_size(egui::vec2(button_width, 0.0)),
                );
                if button.clicked() {
                    browse = true;
                }
            });
        });

        browse
    }
}
