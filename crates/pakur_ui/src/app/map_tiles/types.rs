use eframe::egui::ColorImage;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileKey {
    pub fn texture_name(&self) -> String {
        format!("osm-tile-{}-{}-{}", self.z, self.x, self.y)
    }
}

pub(crate) struct TileResult {
    pub key: TileKey,
    pub image: Result<ColorImage, String>,
}
