use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense};

use pakur_core::geo::centroid;
use pakur_core::map_layers::{MapEvent, AMBER, BLUE, EMERALD};
use pakur_core::model::GeoPoint;

use crate::app::PakurFastApp;
use crate::ui::constants::{MAP_MIN_HEIGHT, ZONE_LABEL_MIN_ZOOM};
use crate::ui::rendering::{draw_marker, draw_zone, legend_item};
use crate::ui::utils::{color_from_rgb, muted_text_color};

/// Pan with drag, zoom with the wheel, click a marker to select its merchant.
pub fn render_map_view(ui: &mut egui::Ui, app: &mut PakurFastApp) {
    render_map_legend(ui);

    let size = egui::vec2(
        ui.available_width(),
        ui.available_height().max(MAP_MIN_HEIGHT),
    );
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(232));

    if response.dragged() {
        app.viewport.pan_by(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = response.hover_pos().unwrap_or_else(|| rect.center());
            app.viewport.scroll_zoom(scroll, anchor, rect);
        }
    }
    let viewport = app.viewport;

    let tiles = viewport.visible_tiles(rect);
    app.map_tiles.request_missing_tiles(tiles.iter().copied());
    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    for key in &tiles {
        if let Some(texture) = app.map_tiles.texture(key) {
            painter.image(texture.id(), viewport.tile_rect(*key, rect), uv, Color32::WHITE);
        }
    }

    app.sync_layers();
    let hover_point = response
        .hover_pos()
        .map(|pos| viewport.unproject(pos, rect));
    let hovered_zone = hover_point
        .and_then(|point| app.layers.zone_at(point))
        .map(|zone| zone.id.clone());

    for zone in app.layers.zones() {
        let points = zone
            .ring
            .iter()
            .map(|point| viewport.project(*point, rect))
            .collect();
        draw_zone(&painter, zone, points, hovered_zone.as_deref() == Some(zone.id.as_str()));
    }
    if viewport.zoom() >= ZONE_LABEL_MIN_ZOOM {
        for zone in app.layers.zones() {
            if let Some(center) = centroid(&zone.ring) {
                painter.text(
                    viewport.project(center, rect),
                    Align2::CENTER_CENTER,
                    &zone.tooltip,
                    FontId::proportional(11.0),
                    Color32::from_gray(60),
                );
            }
        }
    }

    let selected_merchant = app.state.selected_merchant().map(|merchant| merchant.id.clone());
    for marker in app.layers.markers() {
        let pos = viewport.project(marker.position, rect);
        if rect.expand(marker.style.radius).contains(pos) {
            let selected = selected_merchant.as_deref() == Some(marker.merchant_id.as_str());
            draw_marker(&painter, marker, pos, selected);
        }
    }

    let project = |point: GeoPoint| {
        let pos = viewport.project(point, rect);
        (pos.x, pos.y)
    };
    let hovered_marker = response
        .hover_pos()
        .and_then(|pos| app.layers.hit_test((pos.x, pos.y), project))
        .and_then(|event| {
            let MapEvent::MerchantSelected(id) = event;
            app.layers
                .markers()
                .find(|marker| marker.merchant_id == id)
                .map(|marker| marker.popup.clone())
        });
    let zone_tooltip = hovered_zone.and_then(|id| {
        app.layers
            .zones()
            .find(|zone| zone.id == id)
            .map(|zone| zone.tooltip.clone())
    });

    painter.text(
        rect.right_bottom() - egui::vec2(6.0, 4.0),
        Align2::RIGHT_BOTTOM,
        &app.config.tile_attribution,
        FontId::proportional(10.0),
        Color32::from_gray(70),
    );

    let failed_tiles = app.map_tiles.failed_tiles();
    if failed_tiles > 0 {
        let button_rect = Rect::from_min_size(
            rect.left_bottom() + egui::vec2(6.0, -28.0),
            egui::vec2(150.0, 22.0),
        );
        let label = format!("Retry tiles ({failed_tiles} failed)");
        if ui.put(button_rect, egui::Button::new(label).small()).clicked() {
            app.map_tiles.retry_failed();
        }
    }

    if response.clicked() {
        let event = response
            .interact_pointer_pos()
            .and_then(|pos| app.layers.hit_test((pos.x, pos.y), project));
        if let Some(event) = event {
            app.handle_map_event(event);
        }
    }

    if let Some(popup) = hovered_marker {
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(&popup.title);
            ui.label(&popup.category);
            ui.label(egui::RichText::new(&popup.status).color(muted_text_color()));
        });
    } else if let Some(tooltip) = zone_tooltip {
        response.on_hover_text_at_pointer(tooltip);
    }
}

fn render_map_legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        legend_item(ui, color_from_rgb(EMERALD), "Collaborated");
        legend_item(ui, color_from_rgb(AMBER), "Target Partner");
        legend_item(ui, color_from_rgb(BLUE), "Serviceable zone");
    });
}
