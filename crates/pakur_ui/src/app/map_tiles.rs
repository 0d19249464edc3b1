use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::mpsc::{Receiver, Sender};

use eframe::egui;
use lru::LruCache;

mod bookkeeping;
mod fetch_decode;
mod types;

use types::TileResult;
pub use types::TileKey;

const TEXTURE_CACHE_TILES: usize = 256;

/// Raster basemap tiles fetched on background threads and kept as GPU
/// textures in an LRU.
pub struct MapTileState {
    textures: LruCache<TileKey, egui::TextureHandle>,
    inflight: HashSet<TileKey>,
    errors: HashMap<TileKey, String>,
    sender: Sender<TileResult>,
    receiver: Receiver<TileResult>,
    url_template: String,
}

impl MapTileState {
    pub fn new(url_template: impl Into<String>) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        let capacity = NonZeroUsize::new(TEXTURE_CACHE_TILES).unwrap_or(NonZeroUsize::MIN);
        Self {
            textures: LruCache::new(capacity),
            inflight: HashSet::new(),
            errors: HashMap::new(),
            sender,
            receiver,
            url_template: url_template.into(),
        }
    }

    /// Uploads every tile that finished since the last frame.
    pub fn drain_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.receiver.try_recv() {
            if let Some((key, image)) =
                bookkeeping::apply_tile_result(&mut self.inflight, &mut self.errors, result)
            {
                let texture =
                    ctx.load_texture(key.texture_name(), image, egui::TextureOptions::LINEAR);
                self.textures.put(key, texture);
            }
        }
    }

    pub fn request_missing_tiles<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = TileKey>,
    {
        let mut inflight_count = self.inflight.len();
        for key in keys {
            if self.textures.contains(&key)
                || self.inflight.contains(&key)
                || self.errors.contains_key(&key)
            {
                continue;
            }
            let limit = bookkeeping::current_inflight_limit(self.textures.len());
            if inflight_count >= limit {
                break;
            }
            inflight_count += 1;
            self.inflight.insert(key);
            let sender = self.sender.clone();
            let url = bookkeeping::tile_url(&self.url_template, key);
            std::thread::spawn(move || {
                let result = fetch_decode::fetch_tile(&url, key);
                let _ = sender.send(result);
            });
        }
    }

    pub fn texture(&mut self, key: &TileKey) -> Option<&egui::TextureHandle> {
        self.textures.get(key)
    }

    pub fn is_loading(&self) -> bool {
        !self.inflight.is_empty()
    }

    pub fn failed_tiles(&self) -> usize {
        self.errors.len()
    }

    /// Forgets failed tiles so the next frame retries them.
    pub fn retry_failed(&mut self) {
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: TileKey = TileKey {
        z: 14,
        x: 12189,
        y: 7034,
    };

    fn state_with_failed_tile() -> MapTileState {
        let mut state = MapTileState::new("http://127.0.0.1:9/{z}/{x}/{y}.png");
        state
            .sender
            .send(TileResult {
                key: KEY,
                image: Err("HTTP 429 Too Many Requests".to_string()),
            })
            .unwrap();
        state.drain_results(&egui::Context::default());
        state
    }

    #[test]
    fn failed_tile_is_not_refetched_until_retried() {
        let mut state = state_with_failed_tile();
        assert_eq!(state.failed_tiles(), 1);

        state.request_missing_tiles([KEY]);
        assert!(!state.is_loading());

        state.retry_failed();
        assert_eq!(state.failed_tiles(), 0);
        state.request_missing_tiles([KEY]);
        assert!(state.inflight.contains(&KEY));
    }
}
