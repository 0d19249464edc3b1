use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::model::{DiscoveredPartner, Merchant, RouteInfo, ServiceableZone, ZoneSuggestion};

use super::error::IntelError;
use super::parser::{parse_route_info, parse_zone_suggestions, partners_from_grounding};
use super::prompts::{discovery_prompt, logistics_prompt, zone_prompt};
use super::request::{route_info_schema, zone_suggestions_schema, GenerateContentRequest};
use super::{GenerativeModel, Intel};

/// Narrative shown when the discovery request fails.
pub const DISCOVERY_UNAVAILABLE_NARRATIVE: &str = "Scanning service unavailable.";

/// Model narrative plus the map listings it was grounded on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryReport {
    pub narrative: String,
    pub partners: Vec<DiscoveredPartner>,
}

impl DiscoveryReport {
    fn unavailable() -> Self {
        Self {
            narrative: DISCOVERY_UNAVAILABLE_NARRATIVE.to_string(),
            partners: Vec::new(),
        }
    }
}

/// Inputs of one city scan, owned so the scan can run on a worker thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub query: String,
    pub merchants: Vec<Merchant>,
    pub zones: Vec<ServiceableZone>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub discovery: Intel<DiscoveryReport>,
    pub suggestions: Intel<Vec<ZoneSuggestion>>,
}

/// Shapes prompts, calls the model and normalises every answer, falling back
/// to fixed values on failure.
#[derive(Clone)]
pub struct IntelService {
    model: Arc<dyn GenerativeModel>,
    config: DashboardConfig,
}

impl IntelService {
    pub fn new(model: Arc<dyn GenerativeModel>, config: DashboardConfig) -> Self {
        Self { model, config }
    }

    /// Service backed by [`super::GeminiClient`] with the credential from the
    /// environment.
    #[cfg(feature = "gemini")]
    pub fn gemini_from_env(config: DashboardConfig) -> Result<Self, IntelError> {
        let client = super::GeminiClient::from_env(&config)?;
        if !client.has_credential() {
            warn!("no GEMINI_API_KEY or API_KEY set; intel calls will use fallbacks");
        }
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn discover_partners(
        &self,
        query: &str,
        zones: &[ServiceableZone],
    ) -> Intel<DiscoveryReport> {
        let prompt = discovery_prompt(&self.config, query, zones);
        let request = GenerateContentRequest::grounded(prompt, self.config.discovery_bias);
        let model = &self.config.models.discovery;
        info!(model = %model, query, "running partner discovery");

        match self.model.generate_content(model, &request) {
            Ok(response) => {
                let default_address = format!("{}, {}", self.config.city, self.config.region);
                let report = DiscoveryReport {
                    narrative: response.text(),
                    partners: partners_from_grounding(&response, &default_address),
                };
                debug!(partners = report.partners.len(), "discovery finished");
                if report.partners.is_empty() {
                    Intel::empty(report)
                } else {
                    Intel::live(report)
                }
            }
            Err(error) => {
                warn!(%error, "discovery failed");
                Intel::unavailable(DiscoveryReport::unavailable(), &error)
            }
        }
    }

    pub fn route_logistics(&self, name: &str, address: &str) -> Intel<RouteInfo> {
        let model = &self.config.models.logistics;
        info!(model = %model, partner = name, "estimating route logistics");

        let request = GenerateContentRequest::structured(
            logistics_prompt(&self.config, name, address),
            route_info_schema(),
        );
        let result = self
            .model
            .generate_content(model, &request)
            .and_then(|response| parse_route_info(&response.text()));

        match result {
            Ok(info) => Intel::live(info),
            Err(error) => {
                warn!(%error, partner = name, "route logistics failed; using fallback");
                Intel::unavailable(RouteInfo::fallback(), &error)
            }
        }
    }

    pub fn suggest_zones(&self, merchants: &[Merchant]) -> Intel<Vec<ZoneSuggestion>> {
        let model = &self.config.models.zones;
        info!(model = %model, merchants = merchants.len(), "requesting zone suggestions");

        let result = zone_prompt(&self.config, merchants)
            .map_err(IntelError::from)
            .and_then(|prompt| {
                let request =
                    GenerateContentRequest::structured(prompt, zone_suggestions_schema());
                self.model.generate_content(model, &request)
            })
            .and_then(|response| parse_zone_suggestions(&response.text()));

        match result {
            Ok(mut suggestions) => {
                suggestions.truncate(self.config.max_zone_suggestions);
                if suggestions.is_empty() {
                    Intel::empty(suggestions)
                } else {
                    Intel::live(suggestions)
                }
            }
            Err(error) => {
                warn!(%error, "zone suggestion failed");
                Intel::unavailable(Vec::new(), &error)
            }
        }
    }

    /// Discovery followed by zone suggestion, strictly in that order.
    pub fn scan(&self, request: &ScanRequest) -> ScanOutcome {
        let discovery = self.discover_partners(&request.query, &request.zones);
        let suggestions = self.suggest_zones(&request.merchants);
        ScanOutcome {
            discovery,
            suggestions,
        }
    }
}
