use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DataViewerApp {
    pub state: AppState,
}

impl DataViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let mut state = AppState::new(config);
        state.attach_context(cc.egui_ctx.clone());
        Self { state }
    }
}

impl eframe::App for DataViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply worker results before drawing so this frame shows them.
        if self.state.process_worker_messages() {
            // More may be queued than one frame handles.
            ctx.request_repaint();
        }

        // ---- Top panel: commands + prediction ----
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            panels::toolbar(ui, &mut self.state);
            ui.add_space(4.0);
            panels::prediction_label(ui, &self.state);
            ui.add_space(6.0);
        });

        // ---- Bottom panel: log ----
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                panels::log_pane(ui, &self.state);
            });

        // ---- Central panel: table above, plot below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let table_height = (ui.available_height() * 0.4).max(80.0);
            panels::data_view(ui, &self.state, table_height);
            ui.separator();
            plot::sensor_plot(ui, &self.state);
        });

        panels::dialog(ctx, &mut self.state);
    }
}
