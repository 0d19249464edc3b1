use eframe::egui::{self, Align, Layout, RichText};

use crate::app::PakurFastApp;
use crate::ui::utils::{accent_color, muted_text_color};

pub(super) fn render_top_controls(ui: &mut egui::Ui, app: &mut PakurFastApp) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(app.config.city.to_uppercase()).heading().strong());
        ui.label(RichText::new("FAST").heading().color(accent_color()));
        ui.separator();
        ui.label(RichText::new("Partner Intel").small().strong());
        ui.label(
            RichText::new("Zone Planning")
                .small()
                .color(muted_text_color()),
        );

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let scanning = app.state.is_scanning();
            let label = if scanning {
                "Scanning City..."
            } else {
                "Find Potential Partners"
            };
            if ui
                .add_enabled(!scanning, egui::Button::new(label))
                .clicked()
            {
                app.perform_city_scan();
            }
            if scanning {
                ui.spinner();
            }

            let mut query = app.state.search_query().to_string();
            let search = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search directory...")
                    .desired_width(220.0),
            );
            if search.changed() {
                app.state.set_search_query(query);
            }
        });
    });
}
