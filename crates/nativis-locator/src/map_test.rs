use nativis_core::{Country, PartnerType};

use super::*;
use crate::filter::Choice;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Viewport(Viewport),
    Markers(usize),
    OpenPopup(String),
    ClosePopup,
}

#[derive(Default)]
struct RecordingWidget {
    fail_init: bool,
    calls: Vec<Call>,
}

impl RecordingWidget {
    fn failing() -> Self {
        Self {
            fail_init: true,
            calls: Vec::new(),
        }
    }
}

impl MapWidget for RecordingWidget {
    fn initialize(&mut self) -> Result<(), MapWidgetError> {
        if self.fail_init {
            Err(MapWidgetError::LoadFailed("api key rejected".to_string()))
        } else {
            Ok(())
        }
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.calls.push(Call::Viewport(*viewport));
    }

    fn set_markers(&mut self, markers: &MarkerSet) {
        self.calls.push(Call::Markers(markers.len()));
    }

    fn open_popup(&mut self, detail: &LocationDetail) {
        self.calls.push(Call::OpenPopup(detail.id.clone()));
    }

    fn close_popup(&mut self) {
        self.calls.push(Call::ClosePopup);
    }
}

fn adapter(widget: RecordingWidget) -> MapViewAdapter<RecordingWidget> {
    let directory = Arc::new(Directory::bundled().unwrap());
    let icons = IconCache::new(directory.brands());
    MapViewAdapter::new(widget, directory, icons, "din@nativisgp.com")
}

fn show(adapter: &mut MapViewAdapter<RecordingWidget>, filters: &FilterState) {
    let directory = Arc::clone(&adapter.directory);
    let subset = filter(&directory, filters);
    adapter.show(&subset, filters);
}

#[test]
fn nothing_is_pushed_before_ready() {
    let mut map = adapter(RecordingWidget::default());
    assert_eq!(map.status(), &MapStatus::Loading);
    show(
        &mut map,
        &FilterState::default().with_country(Choice::Only(Country::Singapore)),
    );
    assert!(map.widget().calls.is_empty());
}

#[test]
fn ready_flushes_latest_buffered_state_once() {
    let mut map = adapter(RecordingWidget::default());
    show(
        &mut map,
        &FilterState::default().with_country(Choice::Only(Country::Malaysia)),
    );
    let latest = FilterState::default().with_search_query("savoroso");
    show(&mut map, &latest);

    map.handle(MapEvent::Ready);
    assert!(map.is_ready());
    let calls = &map.widget().calls;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::Markers(4));
    assert!(matches!(
        calls[1],
        Call::Viewport(Viewport::Center { zoom: 12, .. })
    ));

    map.handle(MapEvent::Ready);
    assert_eq!(map.widget().calls.len(), 2);
}

#[test]
fn init_failure_degrades_and_offers_fallback() {
    let mut map = adapter(RecordingWidget::failing());
    assert!(matches!(map.status(), MapStatus::Degraded { .. }));
    let notice = map.fallback_notice().unwrap();
    assert_eq!(notice.title, "Map Unavailable");
    assert_eq!(notice.contact_href, "mailto:din@nativisgp.com");

    show(&mut map, &FilterState::default());
    map.handle(MapEvent::Ready);
    assert!(map.widget().calls.is_empty());
}

#[test]
fn late_failure_event_degrades() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Failed("script error".to_string()));
    assert_eq!(
        map.status(),
        &MapStatus::Degraded {
            reason: "script error".to_string()
        }
    );
    assert!(map.fallback_notice().is_some());
}

#[test]
fn selection_works_without_map() {
    let mut map = adapter(RecordingWidget::failing());
    let detail = map.select_location("sg-magnum").unwrap().unwrap();
    assert_eq!(detail.name, "Magnum Spirits & Wine");
    assert!(map.selection().is_selected("sg-magnum"));
    assert!(map.widget().calls.is_empty());
}

#[test]
fn marker_click_opens_popup() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Ready);
    map.handle(MapEvent::MarkerClicked {
        marker_key: "hk-universal:Lush".to_string(),
    });
    assert!(map.selection().is_selected("hk-universal"));
    assert_eq!(
        map.widget().calls.last(),
        Some(&Call::OpenPopup("hk-universal".to_string()))
    );
}

#[test]
fn unknown_marker_click_is_ignored() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Ready);
    map.handle(MapEvent::MarkerClicked {
        marker_key: "nowhere:Lush".to_string(),
    });
    assert_eq!(map.selection(), &SelectionState::none());
}

#[test]
fn filtering_out_selection_closes_popup() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Ready);
    map.select_location("hk-universal").unwrap();

    show(
        &mut map,
        &FilterState::default().with_country(Choice::Only(Country::Singapore)),
    );
    assert_eq!(map.selection(), &SelectionState::none());
    assert!(map.widget().calls.contains(&Call::ClosePopup));
}

#[test]
fn selection_survives_filter_that_keeps_it() {
    let mut map = adapter(RecordingWidget::default());
    map.select_location("my-drinksconnexion-kl").unwrap();
    show(
        &mut map,
        &FilterState::default().with_partner_type(Choice::Only(PartnerType::Distributor)),
    );
    assert!(map.selection().is_selected("my-drinksconnexion-kl"));
}

#[test]
fn selecting_hidden_or_unknown_location() {
    let mut map = adapter(RecordingWidget::default());
    show(
        &mut map,
        &FilterState::default().with_country(Choice::Only(Country::Philippines)),
    );
    assert_eq!(map.select_location("sg-magnum"), Ok(None));
    assert_eq!(
        map.select_location("atlantis"),
        Err(LocatorError::LocationNotFound("atlantis".to_string()))
    );
}

#[test]
fn popup_closed_event_clears_selection() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Ready);
    map.select_location("ph-savoroso").unwrap();
    map.handle(MapEvent::PopupClosed);
    assert_eq!(map.selection(), &SelectionState::none());
}

#[test]
fn ready_reopens_popup_for_existing_selection() {
    let mut map = adapter(RecordingWidget::default());
    map.select_location("ph-savoroso").unwrap();
    map.handle(MapEvent::Ready);
    assert_eq!(
        map.widget().calls.last(),
        Some(&Call::OpenPopup("ph-savoroso".to_string()))
    );
}

#[test]
fn logo_result_repushes_markers_when_ready() {
    let mut map = adapter(RecordingWidget::default());
    map.handle(MapEvent::Ready);
    let before = map.widget().calls.len();

    map.apply_logo(
        &BrandId::new("Eldoria"),
        Ok(LogoAsset {
            url: "https://i.imgur.com/ln9ipPv.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }),
    );
    assert_eq!(map.widget().calls.len(), before + 1);
    assert!(map
        .markers()
        .icon(&BrandId::new("Eldoria"))
        .unwrap()
        .has_logo());
}

#[test]
fn nothing_reaches_widget_after_unmount() {
    let mut map = adapter(RecordingWidget::default());
    map.unmount();
    assert_eq!(map.status(), &MapStatus::Unmounted);

    map.handle(MapEvent::Ready);
    map.apply_logo(
        &BrandId::new("Lush"),
        Ok(LogoAsset {
            url: "https://nativisgp.com/imgs/Lush_Logo_v2.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }),
    );
    show(&mut map, &FilterState::default());

    assert!(map.widget().calls.is_empty());
    assert_eq!(map.status(), &MapStatus::Unmounted);
    assert!(!map
        .markers()
        .icon(&BrandId::new("Lush"))
        .unwrap()
        .has_logo());
}
