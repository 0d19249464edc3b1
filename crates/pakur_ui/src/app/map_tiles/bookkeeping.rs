use std::collections::{HashMap, HashSet};

use eframe::egui::ColorImage;

use super::types::{TileKey, TileResult};

/// Tile servers throttle bursts, so only a few fetches run until the first
/// screenful has landed.
pub(crate) fn current_inflight_limit(tile_count: usize) -> usize {
    const WARMUP_TILES: usize = 6;
    const WARMUP_LIMIT: usize = 2;
    const MAX_LIMIT: usize = 6;
    if tile_count >= WARMUP_TILES {
        MAX_LIMIT
    } else {
        WARMUP_LIMIT
    }
}

pub(crate) fn apply_tile_result(
    inflight: &mut HashSet<TileKey>,
    errors: &mut HashMap<TileKey, String>,
    result: TileResult,
) -> Option<(TileKey, ColorImage)> {
    let key = result.key;
    inflight.remove(&key);
    match result.image {
        Ok(image) => {
            errors.remove(&key);
            Some((key, image))
        }
        Err(error) => {
            tracing::debug!(z = key.z, x = key.x, y = key.y, %error, "map tile failed");
            errors.insert(key, error);
            None
        }
    }
}

/// Fills `{z}`, `{x}` and `{y}` in a tile URL template.
pub(crate) fn tile_url(template: &str, key: TileKey) -> String {
    template
        .replace("{z}", &key.z.to_string())
        .replace("{x}", &key.x.to_string())
        .replace("{y}", &key.y.to_string())
}
