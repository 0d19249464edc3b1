use eframe::egui::{self, RichText};

use pakur_core::dashboard::DashboardStats;

use crate::ui::utils::muted_text_color;

/// Three headline counters above the map.
pub fn render_stats(ui: &mut egui::Ui, stats: DashboardStats) {
    let cards = [
        ("Active Partners", stats.total_partners),
        ("Identified Opportunities", stats.identified_opportunities),
        ("Optimized Zones", stats.covered_zones),
    ];
    ui.columns(cards.len(), |columns| {
        for (column, (label, value)) in columns.iter_mut().zip(cards) {
            column.group(|ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    RichText::new(label.to_uppercase())
                        .small()
                        .strong()
                        .color(muted_text_color()),
                );
                ui.label(RichText::new(value.to_string()).size(24.0).strong());
            });
        }
    });
}
