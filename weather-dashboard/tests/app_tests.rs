//! Driving the dashboard app with key events against a running provider

use std::time::Duration;

use crossterm::event::KeyCode;
use serde_json::json;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use weather_context::{
    advance_time, default_locations, pause_time, CancellationToken, ContextError, Coords,
    MockApi, ProviderConfig, WeatherProvider, WeatherState,
};
use weather_dashboard::testing::{ctrl_key, key, type_str, RenderHarness};
use weather_dashboard::{App, Focus};

struct Harness {
    app: App,
    api: MockApi,
    shutdown: CancellationToken,
    handle: JoinHandle<WeatherState>,
}

impl Harness {
    async fn start() -> Self {
        let api = MockApi::new();
        for path in ["/api/weather", "/api/pollution", "/api/fiveday", "/api/uv"] {
            api.respond(path, json!({ "ok": true }));
        }
        api.respond(
            "/api/geocoded",
            json!([
                { "name": "London", "country": "GB", "lat": 51.5073, "lon": -0.1276 },
                { "name": "London", "state": "Ontario", "country": "CA", "lat": 42.9832, "lon": -81.2453 }
            ]),
        );

        let provider = WeatherProvider::new(ProviderConfig::default(), api.clone());
        let app = App::new(provider.context());
        let shutdown = provider.shutdown_token();
        let handle = tokio::spawn(provider.run());
        sleep(Duration::from_millis(10)).await;

        Self {
            app,
            api,
            shutdown,
            handle,
        }
    }

    fn press_all(&mut self, events: Vec<weather_dashboard::EventKind>) {
        for event in events {
            self.app.handle_event(&event).unwrap();
        }
    }

    async fn stop(self) -> WeatherState {
        self.shutdown.cancel();
        self.handle.await.unwrap()
    }
}

#[tokio::test(start_paused = true)]
async fn test_typing_searches_once() {
    let mut h = Harness::start().await;

    h.press_all(type_str("London"));
    assert_eq!(h.app.query(), "London");

    sleep(Duration::from_millis(600)).await;

    assert_eq!(
        h.api.requests_to("/api/geocoded"),
        vec!["/api/geocoded?search=London"]
    );
    let output = RenderHarness::new(110, 24).render_to_string_plain(|f| h.app.render(f));
    assert!(output.contains("London, Ontario, CA"), "{output}");

    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_u_restores_default_list() {
    let mut h = Harness::start().await;

    h.press_all(type_str("Lon"));
    sleep(Duration::from_millis(600)).await;
    assert_eq!(h.app.context().geo_coded_list().len(), 2);

    h.app.handle_event(&ctrl_key('u')).unwrap();
    sleep(Duration::from_millis(10)).await;

    assert_eq!(h.app.query(), "");
    assert_eq!(h.app.context().geo_coded_list(), default_locations());

    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_clear_before_debounce_skips_lookup() {
    let mut h = Harness::start().await;

    h.press_all(type_str("Paris"));
    h.app.handle_event(&ctrl_key('u')).unwrap();
    sleep(Duration::from_secs(1)).await;

    assert!(h.api.requests_to("/api/geocoded").is_empty());

    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_enter_on_candidate_switches_city() {
    let mut h = Harness::start().await;
    h.api.clear_requests();

    h.app.handle_event(&key(KeyCode::Tab)).unwrap();
    assert_eq!(h.app.focus(), Focus::List);

    h.app.handle_event(&key(KeyCode::Down)).unwrap();
    assert_eq!(h.app.selected(), 1);
    h.app.handle_event(&key(KeyCode::Enter)).unwrap();
    sleep(Duration::from_millis(10)).await;

    // second default entry is Oxford
    let oxford = Coords::new(51.7520131, -1.2578499);
    assert_eq!(h.app.context().active_city_coords(), oxford);
    assert_eq!(h.api.requests_to("/api/weather"), vec![format!(
        "/api/weather?lat={}&lon={}",
        oxford.lat, oxford.lon
    )]);

    let final_state = h.stop().await;
    assert_eq!(final_state.active_city_coords, oxford);
}

#[tokio::test(start_paused = true)]
async fn test_submit_moves_focus_to_list() {
    let mut h = Harness::start().await;

    h.app.handle_event(&key(KeyCode::Enter)).unwrap();
    assert_eq!(h.app.focus(), Focus::List);
    h.app.handle_event(&key(KeyCode::BackTab)).unwrap();
    assert_eq!(h.app.focus(), Focus::Search);

    h.stop().await;
}

#[tokio::test]
async fn test_debounce_with_manual_clock() {
    pause_time();
    let mut h = Harness::start().await;

    h.press_all(type_str("Lon"));
    // let the provider start the debounce timer before moving the clock
    sleep(Duration::from_millis(1)).await;
    advance_time(Duration::from_millis(400)).await;
    assert!(h.api.requests_to("/api/geocoded").is_empty());

    advance_time(Duration::from_millis(200)).await;
    // let the lookup task and the provider catch up
    sleep(Duration::from_millis(1)).await;
    assert_eq!(h.api.requests_to("/api/geocoded").len(), 1);

    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_escape_quits() {
    let mut h = Harness::start().await;

    h.app.handle_event(&key(KeyCode::Esc)).unwrap();
    assert!(h.app.should_quit());

    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_keys_after_shutdown_report_closed_provider() {
    let h = Harness::start().await;
    let Harness {
        mut app,
        shutdown,
        handle,
        ..
    } = h;

    shutdown.cancel();
    handle.await.unwrap();

    assert_eq!(
        app.handle_event(&type_str("x")[0]),
        Err(ContextError::ProviderClosed {
            handle: "WeatherContext"
        })
    );
}
