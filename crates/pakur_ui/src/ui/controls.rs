use eframe::egui;

use crate::app::PakurFastApp;

mod topbar;

pub fn render_control_panel(ui: &mut egui::Ui, app: &mut PakurFastApp) {
    topbar::render_top_controls(ui, app);
}
