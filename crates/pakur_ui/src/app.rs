//! Application state and the actions the panels trigger.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use pakur_core::config::DashboardConfig;
use pakur_core::dashboard::DashboardState;
use pakur_core::export::{build_export, write_export};
use pakur_core::intel::{IntelError, IntelJob, IntelReply, IntelService, IntelWorker};
use pakur_core::map_layers::{MapEvent, MapLayers};
use pakur_core::seed::validate_seed;

mod map_tiles;
mod viewport;


pub use map_tiles::{MapTileState, TileKey};
pub use viewport::MapViewport;

/// Main application state for the dashboard UI.
pub struct PakurFastApp {
    pub config: DashboardConfig,
    pub state: DashboardState,
    pub layers: MapLayers,
    pub viewport: MapViewport,
    pub map_tiles: MapTileState,
    pub worker: IntelWorker,
    /// Last user-facing outcome (export path, export error).
    pub status_message: Option<String>,
    pub last_export: Option<PathBuf>,
}

impl PakurFastApp {
    /// Loads configuration and wires the Gemini-backed service.
    pub fn from_env() -> Result<Self, IntelError> {
        let config = DashboardConfig::load_or_default();
        let service = IntelService::gemini_from_env(config.clone())?;
        Ok(Self::with_service(config, service))
    }

    pub fn with_service(config: DashboardConfig, service: IntelService) -> Self {
        let state = DashboardState::seeded();
        for problem in validate_seed(state.zones(), state.merchants()) {
            warn!(%problem, "seed data problem");
        }
        let mut layers = MapLayers::new();
        layers.sync(state.zones(), state.merchants(), state.selected_zone_id());

        Self {
            viewport: MapViewport::new(config.map_center, config.map_zoom),
            map_tiles: MapTileState::new(config.tile_url_template.clone()),
            worker: IntelWorker::new(service),
            config,
            state,
            layers,
            status_message: None,
            last_export: None,
        }
    }

    pub fn perform_city_scan(&mut self) {
        let query = self.config.discovery_query.clone();
        if let Some(request) = self.state.begin_scan(&query) {
            self.worker.submit(IntelJob::Scan(request));
        }
    }

    pub fn calculate_route(&mut self) {
        if let Some(ticket) = self.state.begin_route() {
            self.worker.submit(IntelJob::Route(ticket));
        }
    }

    pub fn select_merchant(&mut self, id: &str) {
        self.state.select_merchant(id);
        self.sync_layers();
    }

    pub fn select_discovered(&mut self, index: usize) {
        self.state.select_discovered(index);
        self.sync_layers();
    }

    pub fn handle_map_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::MerchantSelected(id) => self.select_merchant(&id),
        }
    }

    pub fn sync_layers(&mut self) {
        self.layers.sync(
            self.state.zones(),
            self.state.merchants(),
            self.state.selected_zone_id(),
        );
    }

    /// Applies finished intel jobs. Returns whether anything changed.
    pub fn poll_worker(&mut self) -> bool {
        let replies = self.worker.drain();
        let changed = !replies.is_empty();
        for reply in replies {
            self.apply_reply(reply);
        }
        changed
    }

    fn apply_reply(&mut self, reply: IntelReply) {
        match reply {
            IntelReply::Scan(outcome) => self.state.finish_scan(outcome),
            IntelReply::Route { ticket, info } => {
                self.state.finish_route(&ticket, info);
            }
        }
        self.sync_layers();
    }

    /// Writes the selected partner to the export directory. Silently does
    /// nothing when no partner is selected.
    pub fn export_selected(&mut self) {
        let Ok(document) = build_export(&self.state, &self.config.city, Utc::now()) else {
            return;
        };
        match write_export(&self.config.export_dir, &document) {
            Ok(path) => {
                info!(path = %path.display(), "export written");
                self.status_message = Some(format!("Exported to {}", path.display()));
                self.last_export = Some(path);
            }
            Err(error) => {
                warn!(%error, "export failed");
                self.status_message = Some(format!("Export failed: {error}"));
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.worker.inflight() > 0
    }
}
