//! Utility functions for the UI: formatting, colors, conversions.

use eframe::egui::Color32;

use pakur_core::intel::IntelStatus;
use pakur_core::map_layers::{Rgb, AMBER, EMERALD};
use pakur_core::model::Feasibility;

pub fn color_from_rgb(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn accent_color() -> Color32 {
    color_from_rgb(EMERALD)
}

pub fn discovered_color() -> Color32 {
    Color32::from_rgb(168, 85, 247)
}

pub fn muted_text_color() -> Color32 {
    Color32::from_gray(140)
}

pub fn feasibility_color(feasibility: Feasibility) -> Color32 {
    match feasibility {
        Feasibility::High => color_from_rgb(EMERALD),
        Feasibility::Medium | Feasibility::Low => color_from_rgb(AMBER),
    }
}

/// Whole numbers print without decimals, like the model usually sends them.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

pub fn format_distance_km(value: f64) -> String {
    format!("{} km", format_number(value))
}

pub fn format_minutes(value: f64) -> String {
    format!("{} mins", format_number(value))
}

/// One-line note for a settled intel call; `None` when nothing needs saying.
pub fn intel_status_note(status: Option<&IntelStatus>, empty_note: &str) -> Option<String> {
    match status? {
        IntelStatus::Live => None,
        IntelStatus::Empty => Some(empty_note.to_string()),
        IntelStatus::Unavailable(reason) => Some(format!("Service unavailable: {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(format_distance_km(2.5), "2.5 km");
        assert_eq!(format_minutes(12.0), "12 mins");
    }

    #[test]
    fn opacity_maps_to_alpha() {
        let color = with_opacity(Color32::from_rgb(16, 185, 129), 0.3);
        assert_eq!(color.a(), 77);
    }

    #[test]
    fn status_notes_distinguish_outage_from_empty() {
        assert_eq!(intel_status_note(None, "none"), None);
        assert_eq!(intel_status_note(Some(&IntelStatus::Live), "none"), None);
        assert_eq!(
            intel_status_note(Some(&IntelStatus::Empty), "No places found."),
            Some("No places found.".to_string())
        );
        assert_eq!(
            intel_status_note(Some(&IntelStatus::Unavailable("status 429".to_string())), ""),
            Some("Service unavailable: status 429".to_string())
        );
    }
}
