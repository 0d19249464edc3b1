//! Constants used throughout the UI.

use std::time::Duration;

pub const PARTNER_PANEL_WIDTH: f32 = 320.0;
pub const DETAILS_PANEL_WIDTH: f32 = 380.0;
pub const MAP_MIN_HEIGHT: f32 = 400.0;

/// Repaint cadence while intel jobs or tile fetches are outstanding.
pub const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// Zone names are painted on the map from this zoom level.
pub const ZONE_LABEL_MIN_ZOOM: u8 = 15;
