//! Application state owned by the dashboard root.
//!
//! All mutations go through [`DashboardState`] so the selection rules hold for
//! every sequence of user actions: merchant and discovered-partner selections
//! are mutually exclusive, and any selection change drops the route estimate.

use tracing::{debug, info};

use crate::intel::{IntelStatus, Intel, ScanOutcome, ScanRequest};
use crate::model::{
    DiscoveredPartner, Merchant, PartnerRef, RouteInfo, ServiceableZone, ZoneSuggestion,
};
use crate::seed::{initial_merchants, initial_zones};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    /// Merchant id.
    Merchant(String),
    /// Snapshot of the partner as listed when it was picked.
    Discovered(DiscoveredPartner),
}

/// Issued when a route estimate starts; the reply is only stored if the
/// selection is still the one the ticket was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    pub name: String,
    pub address: String,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteApplied {
    Stored,
    /// Selection changed while the request was in flight; result dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_partners: usize,
    pub identified_opportunities: usize,
    pub covered_zones: usize,
}

pub struct DashboardState {
    merchants: Vec<Merchant>,
    zones: Vec<ServiceableZone>,
    discovered: Vec<DiscoveredPartner>,
    suggestions: Vec<ZoneSuggestion>,
    narrative: Option<String>,
    selection: Selection,
    selected_zone_id: Option<String>,
    route_info: Option<RouteInfo>,
    is_scanning: bool,
    is_calculating_route: bool,
    search_query: String,
    selection_generation: u64,
    discovery_status: Option<IntelStatus>,
    suggestion_status: Option<IntelStatus>,
    route_status: Option<IntelStatus>,
}

impl DashboardState {
    pub fn new(merchants: Vec<Merchant>, zones: Vec<ServiceableZone>) -> Self {
        Self {
            merchants,
            zones,
            discovered: Vec::new(),
            suggestions: Vec::new(),
            narrative: None,
            selection: Selection::None,
            selected_zone_id: None,
            route_info: None,
            is_scanning: false,
            is_calculating_route: false,
            search_query: String::new(),
            selection_generation: 0,
            discovery_status: None,
            suggestion_status: None,
            route_status: None,
        }
    }

    /// State over the static Pakur roster.
    pub fn seeded() -> Self {
        Self::new(initial_merchants(), initial_zones())
    }

    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    pub fn zones(&self) -> &[ServiceableZone] {
        &self.zones
    }

    pub fn discovered(&self) -> &[DiscoveredPartner] {
        &self.discovered
    }

    pub fn suggestions(&self) -> &[ZoneSuggestion] {
        &self.suggestions
    }

    pub fn narrative(&self) -> Option<&str> {
        self.narrative.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_zone_id(&self) -> Option<&str> {
        self.selected_zone_id.as_deref()
    }

    pub fn route_info(&self) -> Option<&RouteInfo> {
        self.route_info.as_ref()
    }

    pub fn is_scanning(&self) -> bool {
        self.is_scanning
    }

    pub fn is_calculating_route(&self) -> bool {
        self.is_calculating_route
    }

    pub fn discovery_status(&self) -> Option<&IntelStatus> {
        self.discovery_status.as_ref()
    }

    pub fn suggestion_status(&self) -> Option<&IntelStatus> {
        self.suggestion_status.as_ref()
    }

    pub fn route_status(&self) -> Option<&IntelStatus> {
        self.route_status.as_ref()
    }

    pub fn merchant(&self, id: &str) -> Option<&Merchant> {
        self.merchants.iter().find(|merchant| merchant.id == id)
    }

    pub fn zone(&self, id: &str) -> Option<&ServiceableZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn selected_merchant(&self) -> Option<&Merchant> {
        match &self.selection {
            Selection::Merchant(id) => self.merchant(id),
            _ => None,
        }
    }

    pub fn selected_discovered(&self) -> Option<&DiscoveredPartner> {
        match &self.selection {
            Selection::Discovered(partner) => Some(partner),
            _ => None,
        }
    }

    pub fn selected_partner(&self) -> Option<PartnerRef<'_>> {
        self.selected_merchant()
            .map(PartnerRef::Merchant)
            .or_else(|| self.selected_discovered().map(PartnerRef::Discovered))
    }

    /// Selects a known merchant and highlights its zone. Unknown ids are ignored.
    pub fn select_merchant(&mut self, id: &str) -> bool {
        let Some(zone_id) = self.merchant(id).map(|merchant| merchant.zone_id.clone()) else {
            debug!(merchant = id, "ignoring selection of unknown merchant");
            return false;
        };
        self.change_selection(Selection::Merchant(id.to_string()), Some(zone_id));
        true
    }

    /// Selects the discovered partner at `index` in the current scan results.
    pub fn select_discovered(&mut self, index: usize) -> bool {
        let Some(partner) = self.discovered.get(index).cloned() else {
            return false;
        };
        self.change_selection(Selection::Discovered(partner), None);
        true
    }

    pub fn clear_selection(&mut self) {
        self.change_selection(Selection::None, None);
    }

    fn change_selection(&mut self, selection: Selection, zone_id: Option<String>) {
        self.selection = selection;
        self.selected_zone_id = zone_id;
        self.route_info = None;
        self.route_status = None;
        self.selection_generation = self.selection_generation.wrapping_add(1);
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn filtered_merchants(&self) -> Vec<&Merchant> {
        filter_merchants(&self.merchants, &self.search_query)
    }

    /// Starts a scan unless one is already running. Clears any route estimate.
    pub fn begin_scan(&mut self, query: &str) -> Option<ScanRequest> {
        if self.is_scanning {
            return None;
        }
        self.is_scanning = true;
        self.route_info = None;
        self.route_status = None;
        info!(query, "city scan started");
        Some(ScanRequest {
            query: query.to_string(),
            merchants: self.merchants.clone(),
            zones: self.zones.clone(),
        })
    }

    /// Replaces discovered partners and suggestions wholesale.
    pub fn finish_scan(&mut self, outcome: ScanOutcome) {
        let ScanOutcome {
            discovery,
            suggestions,
        } = outcome;
        self.narrative = Some(discovery.value.narrative);
        self.discovered = discovery.value.partners;
        self.discovery_status = Some(discovery.status);
        self.suggestions = suggestions.value;
        self.suggestion_status = Some(suggestions.status);
        self.is_scanning = false;
        info!(
            partners = self.discovered.len(),
            suggestions = self.suggestions.len(),
            "city scan finished"
        );
    }

    pub fn can_calculate_route(&self) -> bool {
        !self.is_calculating_route && self.selected_partner().is_some()
    }

    /// No-op when nothing is selected or an estimate is already running.
    pub fn begin_route(&mut self) -> Option<RouteTicket> {
        if self.is_calculating_route {
            return None;
        }
        let partner = self.selected_partner()?;
        let ticket = RouteTicket {
            name: partner.name().to_string(),
            address: partner.address().to_string(),
            generation: self.selection_generation,
        };
        self.is_calculating_route = true;
        Some(ticket)
    }

    pub fn finish_route(&mut self, ticket: &RouteTicket, info: Intel<RouteInfo>) -> RouteApplied {
        self.is_calculating_route = false;
        if ticket.generation != self.selection_generation {
            info!(partner = %ticket.name, "discarding route estimate for a previous selection");
            return RouteApplied::Stale;
        }
        self.route_info = Some(info.value);
        self.route_status = Some(info.status);
        RouteApplied::Stored
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_partners: self.merchants.len(),
            identified_opportunities: self.discovered.len(),
            covered_zones: self.zones.len(),
        }
    }
}

/// Merchants whose name contains `query`, ignoring case. An empty query
/// keeps everything.
pub fn filter_merchants<'a>(merchants: &'a [Merchant], query: &str) -> Vec<&'a Merchant> {
    let needle = query.to_lowercase();
    merchants
        .iter()
        .filter(|merchant| merchant.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::DiscoveryReport;

    fn partner(name: &str) -> DiscoveredPartner {
        DiscoveredPartner {
            name: name.to_string(),
            category: "Daily Needs".to_string(),
            address: "Pakur, Jharkhand".to_string(),
            google_maps_uri: format!("https://maps.example/{name}"),
            contact_potential: String::new(),
            strategic_value: String::new(),
            phone: None,
            email: None,
        }
    }

    fn scanned_state() -> DashboardState {
        let mut state = DashboardState::seeded();
        state.begin_scan("Kirana").expect("scan should start");
        state.finish_scan(ScanOutcome {
            discovery: Intel::live(DiscoveryReport {
                narrative: "Found two".to_string(),
                partners: vec![partner("Corner Kirana"), partner("Rail Medicals")],
            }),
            suggestions: Intel::empty(Vec::new()),
        });
        state
    }

    #[test]
    fn selecting_merchant_highlights_its_zone() {
        let mut state = DashboardState::seeded();
        assert!(state.select_merchant("m3"));
        assert_eq!(state.selected_zone_id(), Some("zone-2"));
        assert_eq!(state.selected_partner().map(|p| p.name()), Some("Station Daily Store"));
    }

    #[test]
    fn unknown_merchant_leaves_selection_untouched() {
        let mut state = DashboardState::seeded();
        state.select_merchant("m1");
        assert!(!state.select_merchant("m404"));
        assert_eq!(state.selection(), &Selection::Merchant("m1".to_string()));
    }

    #[test]
    fn selections_are_mutually_exclusive() {
        let mut state = scanned_state();
        state.select_merchant("m1");
        state.select_discovered(1);
        assert!(state.selected_merchant().is_none());
        assert_eq!(state.selected_discovered().map(|p| p.name.as_str()), Some("Rail Medicals"));
        assert_eq!(state.selected_zone_id(), None);

        state.select_merchant("m2");
        assert!(state.selected_discovered().is_none());
        assert_eq!(state.selected_merchant().map(|m| m.id.as_str()), Some("m2"));
    }

    #[test]
    fn route_requires_selection() {
        let mut state = DashboardState::seeded();
        assert!(!state.can_calculate_route());
        assert!(state.begin_route().is_none());
        assert!(!state.is_calculating_route());
    }

    #[test]
    fn route_is_guarded_while_in_flight() {
        let mut state = DashboardState::seeded();
        state.select_merchant("m1");
        let ticket = state.begin_route().expect("first request starts");
        assert!(state.begin_route().is_none());
        assert!(!state.can_calculate_route());

        let applied = state.finish_route(&ticket, Intel::live(RouteInfo::fallback()));
        assert_eq!(applied, RouteApplied::Stored);
        assert!(state.route_info().is_some());
        assert!(state.can_calculate_route());
    }

    #[test]
    fn selection_change_clears_route_info() {
        let mut state = DashboardState::seeded();
        state.select_merchant("m1");
        let ticket = state.begin_route().unwrap();
        state.finish_route(&ticket, Intel::live(RouteInfo::fallback()));
        assert!(state.route_info().is_some());

        state.select_merchant("m1");
        assert!(state.route_info().is_none());

        let ticket = state.begin_route().unwrap();
        state.finish_route(&ticket, Intel::live(RouteInfo::fallback()));
        state.clear_selection();
        assert!(state.route_info().is_none());
        assert!(state.route_status().is_none());
    }

    #[test]
    fn late_route_reply_for_old_selection_is_dropped() {
        let mut state = DashboardState::seeded();
        state.select_merchant("m1");
        let ticket = state.begin_route().unwrap();
        state.select_merchant("m2");

        let applied = state.finish_route(&ticket, Intel::live(RouteInfo::fallback()));
        assert_eq!(applied, RouteApplied::Stale);
        assert!(state.route_info().is_none());
        assert!(!state.is_calculating_route());
    }

    #[test]
    fn scan_is_single_flight_and_clears_route() {
        let mut state = DashboardState::seeded();
        state.select_merchant("m1");
        let ticket = state.begin_route().unwrap();
        state.finish_route(&ticket, Intel::live(RouteInfo::fallback()));

        assert!(state.begin_scan("Kirana").is_some());
        assert!(state.is_scanning());
        assert!(state.route_info().is_none());
        assert!(state.begin_scan("Kirana").is_none());
    }

    #[test]
    fn finish_scan_replaces_results_wholesale() {
        let mut state = scanned_state();
        assert_eq!(state.stats().identified_opportunities, 2);
        assert_eq!(state.narrative(), Some("Found two"));

        state.begin_scan("Kirana").unwrap();
        state.finish_scan(ScanOutcome {
            discovery: Intel::live(DiscoveryReport {
                narrative: "One".to_string(),
                partners: vec![partner("Only One")],
            }),
            suggestions: Intel::live(vec![ZoneSuggestion {
                zone_name: "Station Hub".to_string(),
                rationale: "Dense".to_string(),
                radius_km: 1.5,
            }]),
        });
        assert_eq!(state.discovered().len(), 1);
        assert_eq!(state.suggestions().len(), 1);
        assert!(!state.is_scanning());
        assert_eq!(state.suggestion_status(), Some(&IntelStatus::Live));
    }

    #[test]
    fn search_filter_ignores_case() {
        let mut state = DashboardState::seeded();
        state.set_search_query("STATION");
        let names: Vec<&str> = state.filtered_merchants().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Station Daily Store"]);

        state.set_search_query("");
        assert_eq!(state.filtered_merchants().len(), state.merchants().len());
    }

    #[test]
    fn stats_count_roster_and_opportunities() {
        let state = scanned_state();
        assert_eq!(
            state.stats(),
            DashboardStats {
                total_partners: 4,
                identified_opportunities: 2,
                covered_zones: 3,
            }
        );
    }
}
