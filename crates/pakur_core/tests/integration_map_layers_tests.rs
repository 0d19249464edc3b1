use pakur_core::dashboard::DashboardState;
use pakur_core::map_layers::{MapEvent, MapLayers, MapShape, BLUE, EMERALD};
use pakur_core::model::GeoPoint;

fn sync(layers: &mut MapLayers, state: &DashboardState) -> bool {
    layers.sync(state.zones(), state.merchants(), state.selected_zone_id())
}

#[test]
fn redraw_is_idempotent_for_fixed_state() {
    let mut state = DashboardState::seeded();
    state.select_merchant("m1");
    let mut layers = MapLayers::new();

    sync(&mut layers, &state);
    let first: Vec<String> = layers.shape_ids().iter().map(|id| id.to_string()).collect();
    for _ in 0..5 {
        sync(&mut layers, &state);
    }

    assert_eq!(layers.redraw_count(), 1);
    assert_eq!(layers.shape_ids(), first);
}

#[test]
fn merchant_selection_highlights_only_its_zone() {
    let mut state = DashboardState::seeded();
    let mut layers = MapLayers::new();
    state.select_merchant("m4");
    assert!(sync(&mut layers, &state));

    for zone in layers.zones() {
        if zone.zone_id == "zone-3" {
            assert_eq!(zone.style.color, EMERALD);
            assert_eq!(zone.style.fill_opacity, 0.3);
        } else {
            assert_eq!(zone.style.color, BLUE);
            assert_eq!(zone.style.fill_opacity, 0.1);
        }
    }
}

#[test]
fn clearing_selection_redraws_every_zone_unselected() {
    let mut state = DashboardState::seeded();
    let mut layers = MapLayers::new();
    state.select_merchant("m1");
    sync(&mut layers, &state);

    state.clear_selection();
    assert!(sync(&mut layers, &state));
    assert!(layers.zones().all(|zone| zone.style.color == BLUE));
    assert_eq!(layers.shapes().len(), state.zones().len() + state.merchants().len());
}

#[test]
fn markers_draw_after_zones() {
    let state = DashboardState::seeded();
    let mut layers = MapLayers::new();
    sync(&mut layers, &state);

    let first_marker = layers
        .shapes()
        .iter()
        .position(|shape| matches!(shape, MapShape::Marker(_)))
        .expect("markers drawn");
    assert!(layers.shapes()[..first_marker]
        .iter()
        .all(|shape| matches!(shape, MapShape::Zone(_))));
}

#[test]
fn clicking_marker_selects_merchant() {
    let mut state = DashboardState::seeded();
    let mut layers = MapLayers::new();
    sync(&mut layers, &state);

    let project = |point: GeoPoint| {
        (
            ((point.lng - 87.84) * 20_000.0) as f32,
            ((24.65 - point.lat) * 20_000.0) as f32,
        )
    };
    let target = state.merchant("m3").expect("seeded").position();
    let click = project(target);

    let Some(MapEvent::MerchantSelected(id)) = layers.hit_test(click, project) else {
        panic!("click should hit m3");
    };
    assert!(state.select_merchant(&id));
    assert_eq!(state.selected_zone_id(), Some("zone-2"));
    assert!(sync(&mut layers, &state));
}

#[test]
fn zone_lookup_finds_polygon_under_point() {
    let state = DashboardState::seeded();
    let mut layers = MapLayers::new();
    sync(&mut layers, &state);

    let m1 = state.merchant("m1").expect("seeded");
    let zone = layers.zone_at(m1.position());
    assert_eq!(zone.map(|zone| zone.tooltip.as_str()), Some("Pakur Main Market (Sadar)"));
    assert!(layers.zone_at(GeoPoint::new(0.0, 0.0)).is_none());
}
