//! Right panel: selected partner, logistics estimate, export and zone plans.

use eframe::egui::{self, RichText};

use pakur_core::geo::distance_km;
use pakur_core::model::{GeoPoint, PartnerRef, RouteInfo};

use crate::app::PakurFastApp;
use crate::ui::utils::{
    accent_color, discovered_color, feasibility_color, format_distance_km, format_minutes,
    intel_status_note, muted_text_color,
};

struct SelectedSummary {
    is_merchant: bool,
    name: String,
    address: String,
    map_link: Option<String>,
    /// Only seeded merchants carry coordinates.
    center_distance_km: Option<f64>,
}

impl SelectedSummary {
    fn from_partner(partner: PartnerRef<'_>, city_center: GeoPoint) -> Self {
        let center_distance_km = match partner {
            PartnerRef::Merchant(merchant) => distance_km(merchant.position(), city_center),
            PartnerRef::Discovered(_) => None,
        };
        Self {
            is_merchant: matches!(partner, PartnerRef::Merchant(_)),
            name: partner.name().to_string(),
            address: partner.address().to_string(),
            map_link: partner.map_link().map(str::to_string),
            center_distance_km,
        }
    }
}

pub fn render_details_panel(ui: &mut egui::Ui, app: &mut PakurFastApp) {
    egui::ScrollArea::vertical()
        .id_salt("details")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(8.0);
            let city_center = app.config.map_center;
            let selected = app
                .state
                .selected_partner()
                .map(|partner| SelectedSummary::from_partner(partner, city_center));
            match selected {
                Some(summary) => render_selected(ui, app, &summary),
                None => render_empty_selection(ui),
            }
            render_zone_suggestions(ui, app);
        });
}

fn render_selected(ui: &mut egui::Ui, app: &mut PakurFastApp, summary: &SelectedSummary) {
    let (kind, kind_color) = if summary.is_merchant {
        ("ACTIVE COLLABORATION", accent_color())
    } else {
        ("IDENTIFIED TARGET", discovered_color())
    };
    ui.label(RichText::new(kind).small().strong().color(kind_color));
    ui.label(RichText::new(&summary.name).size(22.0).strong());
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(
            RichText::new("STORE METADATA")
                .small()
                .strong()
                .color(muted_text_color()),
        );
        ui.label(format!("{}, {}", summary.address, app.config.city));
        if let Some(km) = summary.center_distance_km {
            ui.label(
                RichText::new(format!("{} from {} center", format_distance_km(km), app.config.city))
                    .small()
                    .color(muted_text_color()),
            );
        }
        if let Some(link) = &summary.map_link {
            ui.hyperlink_to("Verify Business Location", link);
        }
    });

    ui.add_space(6.0);
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("LOGISTICS INTEL")
                    .small()
                    .strong()
                    .color(muted_text_color()),
            );
            if app.state.is_calculating_route() {
                ui.spinner();
            }
        });
        match app.state.route_info() {
            Some(info) => render_route_info(ui, info),
            None => {
                ui.label(
                    RichText::new("No logistics data calculated yet.")
                        .italics()
                        .color(muted_text_color()),
                );
            }
        }
        if let Some(note) = intel_status_note(app.state.route_status(), "") {
            ui.label(RichText::new(note).small().color(muted_text_color()));
        }
    });

    ui.add_space(10.0);
    let route_label = if app.state.is_calculating_route() {
        "Calculating..."
    } else {
        "Run Route Logistics"
    };
    let full_width = egui::vec2(ui.available_width(), 32.0);
    if ui
        .add_enabled(
            app.state.can_calculate_route(),
            egui::Button::new(RichText::new(route_label).strong()).min_size(full_width),
        )
        .clicked()
    {
        app.calculate_route();
    }
    if ui
        .add(egui::Button::new("Export Partner Data").min_size(full_width))
        .clicked()
    {
        app.export_selected();
    }
    if ui.small_button("Clear selection").clicked() {
        app.state.clear_selection();
        app.sync_layers();
    }
}

fn render_route_info(ui: &mut egui::Ui, info: &RouteInfo) {
    egui::Grid::new("route_info").num_columns(2).show(ui, |ui| {
        ui.label(RichText::new("Estimated Distance").small());
        ui.label(RichText::new("Time to Hub").small());
        ui.end_row();
        ui.strong(format_distance_km(info.distance_km));
        ui.strong(format_minutes(info.estimated_time_mins));
        ui.end_row();
    });
    ui.label(
        RichText::new(format!("Feasibility: {}", info.feasibility))
            .small()
            .strong()
            .color(feasibility_color(info.feasibility)),
    );
    ui.label(RichText::new(format!("Traffic: {}", info.traffic_status)).small());
    ui.label(
        RichText::new(format!("\"{}\"", info.notes))
            .italics()
            .color(muted_text_color()),
    );
}

fn render_empty_selection(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Select Partner");
        ui.label(
            RichText::new(
                "Choose a merchant to perform route feasibility and export tactical planning data.",
            )
            .color(muted_text_color()),
        );
    });
}

fn render_zone_suggestions(ui: &mut egui::Ui, app: &PakurFastApp) {
    let note = intel_status_note(app.state.suggestion_status(), "");
    if app.state.suggestions().is_empty() && note.is_none() {
        return;
    }
    ui.add_space(16.0);
    ui.separator();
    ui.label(
        RichText::new("PLANNING RECOMMENDATIONS")
            .small()
            .strong()
            .color(accent_color()),
    );
    if let Some(note) = note {
        ui.label(RichText::new(note).small().color(muted_text_color()));
    }
    for suggestion in app.state.suggestions() {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong(suggestion.zone_name.to_uppercase());
                ui.label(
                    RichText::new(format!("{} Hub", format_distance_km(suggestion.radius_km)))
                        .small()
                        .color(accent_color()),
                );
            });
            ui.label(RichText::new(&suggestion.rationale).small());
        });
    }
}
