use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, DialogKind};

const LOAD_COLOR: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
const PREDICT_COLOR: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
const REFRESH_COLOR: Color32 = Color32::from_rgb(0xFF, 0xC1, 0x07);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the three command buttons side by side.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.columns(3, |cols: &mut [Ui]| {
        if command_button(&mut cols[0], "Load Data", LOAD_COLOR, Color32::WHITE, state.can_load())
        {
            state.start_load();
        }
        if command_button(
            &mut cols[1],
            "Predict",
            PREDICT_COLOR,
            Color32::WHITE,
            state.can_predict(),
        ) {
            state.start_predict();
        }
        if command_button(
            &mut cols[2],
            "Refresh",
            REFRESH_COLOR,
            Color32::BLACK,
            state.can_refresh(),
        ) {
            state.start_refresh();
        }
    });
}

fn command_button(ui: &mut Ui, text: &str, fill: Color32, fg: Color32, enabled: bool) -> bool {
    let button = egui::Button::new(RichText::new(text).strong().color(fg))
        .fill(fill)
        .min_size(egui::vec2(ui.available_width(), 28.0));
    ui.add_enabled(enabled, button).clicked()
}

/// The one-line calibration verdict.
pub fn prediction_label(ui: &mut Ui, state: &AppState) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&state.prediction_label).strong().size(16.0));
    });
}

// ---------------------------------------------------------------------------
// Loaded data
// ---------------------------------------------------------------------------

/// Plain-text dump of the loaded table.
pub fn data_view(ui: &mut Ui, state: &AppState, max_height: f32) {
    ui.strong("Loaded Data:");
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ScrollArea::both()
            .id_salt("data_view")
            .max_height(max_height)
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                let text = if state.dataset.is_some() {
                    state.table_text.as_str()
                } else {
                    "No data loaded yet."
                };
                ui.add(
                    egui::Label::new(RichText::new(text).monospace())
                        .wrap_mode(egui::TextWrapMode::Extend),
                );
            });
    });
}

// ---------------------------------------------------------------------------
// Log pane
// ---------------------------------------------------------------------------

pub fn log_pane(ui: &mut Ui, state: &AppState) {
    ui.strong("Log/Output:");
    ScrollArea::vertical()
        .id_salt("log_pane")
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for line in &state.log_lines {
                ui.label(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

/// Show the pending error/warning dialog, if any, until it is dismissed.
pub fn dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(dialog) = &state.dialog else {
        return;
    };

    let accent = match dialog.kind {
        DialogKind::Error => Color32::RED,
        DialogKind::Warning => Color32::from_rgb(0xE6, 0x9F, 0x00),
    };

    let mut dismissed = false;
    let response = egui::Modal::new(egui::Id::new("viewer_dialog")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(360.0);
        ui.heading(RichText::new(&dialog.title).color(accent));
        ui.add_space(6.0);
        ui.label(&dialog.message);
        ui.add_space(10.0);
        ui.vertical_centered(|ui: &mut Ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || response.should_close() {
        state.close_dialog();
    }
}
