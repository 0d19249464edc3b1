use eframe::egui::{self, Pos2, Rect, Vec2};

use pakur_core::model::GeoPoint;

use crate::app::TileKey;
use crate::ui::rendering::{lat_to_y, lon_to_x, x_to_lon, y_to_lat, TILE_SIZE};

pub const MIN_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 19;
/// Scroll distance in points that makes one zoom level; one wheel notch.
pub const SCROLL_PER_ZOOM_LEVEL: f32 = 50.0;

/// Pan/zoom state of the map. Created once with the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    center: GeoPoint,
    zoom: u8,
    /// Scroll not yet turned into a zoom step.
    pending_scroll: f32,
}

impl MapViewport {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            pending_scroll: 0.0,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Center in world pixels at the current zoom.
    fn center_world(&self) -> (f64, f64) {
        (
            lon_to_x(self.center.lng, self.zoom) * TILE_SIZE,
            lat_to_y(self.center.lat, self.zoom) * TILE_SIZE,
        )
    }

    pub fn project(&self, point: GeoPoint, rect: Rect) -> Pos2 {
        let (cx, cy) = self.center_world();
        let x = lon_to_x(point.lng, self.zoom) * TILE_SIZE - cx;
        let y = lat_to_y(point.lat, self.zoom) * TILE_SIZE - cy;
        rect.center() + Vec2::new(x as f32, y as f32)
    }

    pub fn unproject(&self, pos: Pos2, rect: Rect) -> GeoPoint {
        let (cx, cy) = self.center_world();
        let offset = pos - rect.center();
        let x = (cx + offset.x as f64) / TILE_SIZE;
        let y = (cy + offset.y as f64) / TILE_SIZE;
        GeoPoint::new(y_to_lat(y, self.zoom), x_to_lon(x, self.zoom))
    }

    /// Moves the map with a drag of `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        let (cx, cy) = self.center_world();
        let x = (cx - delta.x as f64) / TILE_SIZE;
        let y = (cy - delta.y as f64) / TILE_SIZE;
        self.center = GeoPoint::new(y_to_lat(y, self.zoom), x_to_lon(x, self.zoom));
    }

    /// Zooms by whole levels while keeping the coordinate under `anchor` fixed.
    pub fn zoom_around(&mut self, steps: i32, anchor: Pos2, rect: Rect) {
        let target = (self.zoom as i32 + steps).clamp(MIN_ZOOM as i32, MAX_ZOOM as i32) as u8;
        if target == self.zoom {
            return;
        }
        let anchored = self.unproject(anchor, rect);
        self.zoom = target;
        let drift = self.project(anchored, rect) - anchor;
        self.pan_by(-drift);
    }

    /// Feeds one frame of vertical scroll. Small trackpad deltas add up and
    /// at most one level is stepped per frame.
    pub fn scroll_zoom(&mut self, delta_y: f32, anchor: Pos2, rect: Rect) {
        self.pending_scroll += delta_y;
        if self.pending_scroll.abs() < SCROLL_PER_ZOOM_LEVEL {
            return;
        }
        let step = self.pending_scroll.signum();
        self.pending_scroll = (self.pending_scroll - step * SCROLL_PER_ZOOM_LEVEL)
            .clamp(-SCROLL_PER_ZOOM_LEVEL * 0.5, SCROLL_PER_ZOOM_LEVEL * 0.5);
        self.zoom_around(step as i32, anchor, rect);
    }

    /// Tiles intersecting `rect`, clamped to the valid tile range.
    pub fn visible_tiles(&self, rect: Rect) -> Vec<TileKey> {
        let top_left = self.unproject(rect.left_top(), rect);
        let bottom_right = self.unproject(rect.right_bottom(), rect);
        let max_index = (1i64 << self.zoom) - 1;
        let x_min = (lon_to_x(top_left.lng, self.zoom).floor() as i64).clamp(0, max_index);
        let x_max = (lon_to_x(bottom_right.lng, self.zoom).floor() as i64).clamp(0, max_index);
        let y_min = (lat_to_y(top_left.lat, self.zoom).floor() as i64).clamp(0, max_index);
        let y_max = (lat_to_y(bottom_right.lat, self.zoom).floor() as i64).clamp(0, max_index);

        let mut tiles = Vec::new();
        for x in x_min..=x_max {
            for y in y_min..=y_max {
                tiles.push(TileKey {
                    z: self.zoom,
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
        tiles
    }

    /// Screen rectangle covered by `key`.
    pub fn tile_rect(&self, key: TileKey, rect: Rect) -> Rect {
        let (cx, cy) = self.center_world();
        let left = key.x as f64 * TILE_SIZE - cx;
        let top = key.y as f64 * TILE_SIZE - cy;
        let min = rect.center() + Vec2::new(left as f32, top as f32);
        Rect::from_min_size(min, egui::vec2(TILE_SIZE as f32, TILE_SIZE as f32))
    }
}
