//! Web-Mercator math and the painter helpers used by the map view.

use eframe::egui::{self, Color32, Vec2};

use pakur_core::map_layers::{MerchantMarker, ZoneShape};

use crate::ui::utils::{color_from_rgb, with_opacity};

/// Pixel edge of one raster tile.
pub const TILE_SIZE: f64 = 256.0;

const MAX_MERCATOR_LAT: f64 = 85.05112878;

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
}

/// Longitude to fractional tile column at `zoom`.
pub fn lon_to_x(lon: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    ((lon + 180.0) / 360.0) * n
}

/// Latitude to fractional tile row at `zoom`.
pub fn lat_to_y(lat: f64, zoom: u8) -> f64 {
    let lat = clamp_lat(lat).to_radians();
    let n = (1u32 << zoom) as f64;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5;
    y * n
}

pub fn x_to_lon(x: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    x / n * 360.0 - 180.0
}

pub fn y_to_lat(y: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    (std::f64::consts::PI * (1.0 - 2.0 * y / n))
        .sinh()
        .atan()
        .to_degrees()
}

/// Filled, stroked zone polygon from already projected vertices.
pub fn draw_zone(painter: &egui::Painter, zone: &ZoneShape, points: Vec<egui::Pos2>, hovered: bool) {
    if points.len() < 3 {
        return;
    }
    let color = color_from_rgb(zone.style.color);
    let fill_opacity = if hovered {
        (zone.style.fill_opacity + 0.1).min(1.0)
    } else {
        zone.style.fill_opacity
    };
    painter.add(egui::Shape::convex_polygon(
        points,
        with_opacity(color, fill_opacity),
        egui::Stroke::new(zone.style.weight, color),
    ));
}

pub fn draw_marker(painter: &egui::Painter, marker: &MerchantMarker, pos: egui::Pos2, selected: bool) {
    let style = marker.style;
    if selected {
        painter.circle_stroke(
            pos,
            style.radius + 4.0,
            egui::Stroke::new(2.0, color_from_rgb(style.fill)),
        );
    }
    painter.circle(
        pos,
        style.radius,
        with_opacity(color_from_rgb(style.fill), style.fill_opacity),
        egui::Stroke::new(style.weight, color_from_rgb(style.stroke)),
    );
}

/// Render a legend item (color swatch + label).
pub fn legend_item(ui: &mut egui::Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(12.0, 12.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(label);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_math_round_trips() {
        let (lat, lng) = (24.6394, 87.8465);
        let x = lon_to_x(lng, 14);
        let y = lat_to_y(lat, 14);
        assert!((x_to_lon(x, 14) - lng).abs() < 1e-9);
        assert!((y_to_lat(y, 14) - lat).abs() < 1e-9);
    }

    #[test]
    fn pakur_center_lands_in_expected_tile() {
        assert_eq!(lon_to_x(87.8465, 14).floor() as u32, 12189);
        assert_eq!(lat_to_y(24.6394, 14).floor() as u32, 7034);
    }

    #[test]
    fn poles_are_clamped() {
        assert!(lat_to_y(90.0, 3).is_finite());
        assert!(lat_to_y(-90.0, 3).is_finite());
    }
}
