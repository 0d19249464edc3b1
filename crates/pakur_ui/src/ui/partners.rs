//! Left panel: the verified merchant roster and scan opportunities.

use eframe::egui::{self, RichText, Sense};

use crate::app::PakurFastApp;
use crate::ui::utils::{accent_color, discovered_color, intel_status_note, muted_text_color};

pub fn render_partner_panel(ui: &mut egui::Ui, app: &mut PakurFastApp) {
    ui.add_space(8.0);
    section_heading(ui, "VERIFIED HUBS", muted_text_color());

    let selected_id = app.state.selected_merchant().map(|merchant| merchant.id.clone());
    let mut clicked_merchant = None;
    egui::ScrollArea::vertical()
        .id_salt("verified_hubs")
        .auto_shrink([false, true])
        .max_height(ui.available_height() * 0.5)
        .show(ui, |ui| {
            let merchants = app.state.filtered_merchants();
            if merchants.is_empty() {
                ui.label(
                    RichText::new("No merchants match the search.")
                        .italics()
                        .color(muted_text_color()),
                );
            }
            for merchant in merchants {
                let selected = selected_id.as_deref() == Some(merchant.id.as_str());
                let card = partner_card(ui, selected, accent_color(), |ui| {
                    ui.horizontal(|ui| {
                        ui.strong(&merchant.name);
                        if merchant.is_collaborated {
                            ui.label(RichText::new("●").color(accent_color()));
                        }
                    });
                    ui.label(
                        RichText::new(&merchant.address)
                            .small()
                            .color(muted_text_color()),
                    );
                    ui.label(RichText::new(merchant.category.label().to_uppercase()).small());
                });
                if card.clicked() {
                    clicked_merchant = Some(merchant.id.clone());
                }
            }
        });
    if let Some(id) = clicked_merchant {
        app.select_merchant(&id);
    }

    ui.separator();
    section_heading(ui, "OPPORTUNITIES FOUND", discovered_color());

    let selected_name = app
        .state
        .selected_discovered()
        .map(|partner| partner.name.clone());
    let mut clicked_discovered = None;
    egui::ScrollArea::vertical()
        .id_salt("opportunities")
        .auto_shrink([false, true])
        .max_height(250.0)
        .show(ui, |ui| {
            if app.state.discovered().is_empty() {
                ui.label(
                    RichText::new("Run \"Find Potential Partners\" to populate")
                        .italics()
                        .small()
                        .color(muted_text_color()),
                );
            }
            for (index, partner) in app.state.discovered().iter().enumerate() {
                let selected = selected_name.as_deref() == Some(partner.name.as_str());
                let card = partner_card(ui, selected, discovered_color(), |ui| {
                    ui.strong(&partner.name);
                    ui.label(
                        RichText::new("Discovered via Scan")
                            .italics()
                            .small()
                            .color(muted_text_color()),
                    );
                });
                if card.clicked() {
                    clicked_discovered = Some(index);
                }
            }
        });
    if let Some(index) = clicked_discovered {
        app.select_discovered(index);
    }

    if let Some(note) = intel_status_note(
        app.state.discovery_status(),
        "The scan returned no map listings.",
    ) {
        ui.label(RichText::new(note).small().color(muted_text_color()));
    }
    if let Some(narrative) = app.state.narrative().filter(|text| !text.trim().is_empty()) {
        egui::CollapsingHeader::new("Scan narrative")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(RichText::new(narrative).small());
            });
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    ui.label(RichText::new(text).small().strong().color(color));
    ui.add_space(4.0);
}

/// Clickable framed card; highlighted with `accent` when selected.
fn partner_card(
    ui: &mut egui::Ui,
    selected: bool,
    accent: egui::Color32,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> egui::Response {
    let stroke = if selected {
        egui::Stroke::new(1.5, accent)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(220))
    };
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            add_contents(ui);
        })
        .response
        .interact(Sense::click())
}
