use std::time::Duration;

use eframe::egui::ColorImage;

use super::types::{TileKey, TileResult};

const USER_AGENT: &str = concat!("pakur_ui/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn fetch_tile(url: &str, key: TileKey) -> TileResult {
    TileResult {
        key,
        image: fetch_bytes(url).and_then(|bytes| decode_tile_image(&bytes)),
    }
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| err.to_string())?;
    let response = client.get(url).send().map_err(|err| err.to_string())?;
    if !response.status().is_success() {
        return Err(format!("status {}", response.status()));
    }
    let bytes = response.bytes().map_err(|err| err.to_string())?;
    Ok(bytes.to_vec())
}

/// Decodes a raster tile into an egui image.
pub(crate) fn decode_tile_image(bytes: &[u8]) -> Result<ColorImage, String> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|err| format!("failed to decode tile: {err}"))?
        .into_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
