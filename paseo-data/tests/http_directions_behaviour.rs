//! Behavioural tests for [`HttpDirectionsProvider`] against local servers.

mod support;

use paseo_core::{Directions, DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint};
use paseo_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use support::{CannedServer, TWO_LEG_ROUTE, ZERO_RESULTS, silent_server};

/// Result cell holding the outcome of a directions request.
type ResultCell = RefCell<Option<Result<Directions, DirectionsError>>>;

/// The service under test: its base URL and, when it answers, the server.
type ServiceCell = RefCell<Option<(String, Option<CannedServer>)>>;

#[fixture]
fn service() -> ServiceCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn canned(service: &ServiceCell, status: &'static str, body: &'static str) {
    let server = CannedServer::start(status, body);
    *service.borrow_mut() = Some((server.base_url(), Some(server)));
}

// --- Given steps ---

#[given("a directions service returning a two-leg route")]
fn service_ok(#[from(service)] service: &ServiceCell) {
    canned(service, "200 OK", TWO_LEG_ROUTE);
}

#[given("a directions service reporting zero results")]
fn service_zero_results(#[from(service)] service: &ServiceCell) {
    canned(service, "200 OK", ZERO_RESULTS);
}

#[given("a directions service failing with HTTP 503")]
fn service_unavailable(#[from(service)] service: &ServiceCell) {
    canned(service, "503 Service Unavailable", "{}");
}

#[given("a directions service returning a malformed body")]
fn service_malformed(#[from(service)] service: &ServiceCell) {
    canned(service, "200 OK", "<html>oops</html>");
}

#[given("a directions service that never answers")]
fn service_silent(#[from(service)] service: &ServiceCell) {
    *service.borrow_mut() = Some((silent_server(), None));
}

// --- When steps ---

#[when("I request a walking route through one stop")]
fn request_route(#[from(service)] service: &ServiceCell, #[from(result)] result: &ResultCell) {
    let guard = service.borrow();
    let (base_url, _) = guard.as_ref().expect("service must be initialised");
    let config = HttpDirectionsProviderConfig::new(format!("{base_url}/maps/api/directions/json"))
        .with_api_key("test-key")
        .with_timeout(Duration::from_millis(300));
    let provider = HttpDirectionsProvider::with_config(config).expect("provider should build");
    let request = DirectionsRequest {
        origin: GeoPoint::new(20.5888, -100.3899),
        destination: GeoPoint::new(20.6042, -100.4028),
        stops: vec![GeoPoint::new(20.595, -100.395)],
        preserve_order: true,
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime should build");
    *result.borrow_mut() = Some(runtime.block_on(provider.walking_route(&request)));
}

// --- Then steps ---

#[then("a route with 2 legs is returned")]
fn then_route(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let directions = borrowed
        .as_ref()
        .expect("request must have run")
        .as_ref()
        .expect("expected Ok result");
    assert_eq!(directions.legs.len(), 2);
    assert_eq!(directions.legs[0].distance_meters, 912);
    assert_eq!(directions.legs[1].duration, Duration::from_secs(905));
    assert_eq!(directions.polyline.as_str(), "a~l~Fjk~uOwHJy@P");
}

#[then("the service received a walking request with the stop as waypoint")]
fn then_request_shape(#[from(service)] service: &ServiceCell) {
    let guard = service.borrow();
    let (_, server) = guard.as_ref().expect("service must be initialised");
    let requests = server.as_ref().expect("canned server").requests();
    let target = requests.first().expect("one request received");
    assert!(target.starts_with("/maps/api/directions/json?"), "got {target}");
    assert!(target.contains("mode=walking"), "got {target}");
    assert!(target.contains("waypoints=20.595%2C-100.395"), "got {target}");
    assert!(target.contains("key=test-key"), "got {target}");
}

#[then("an unavailable error with status \"ZERO_RESULTS\" is returned")]
fn then_unavailable(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(DirectionsError::Unavailable { status, .. })) if status == "ZERO_RESULTS"
        ),
        "expected Unavailable, got {borrowed:?}"
    );
}

#[then("an HTTP error with status 503 is returned")]
fn then_http(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(DirectionsError::Http { status: 503, .. }))),
        "expected Http error, got {borrowed:?}"
    );
}

#[then("a parse error is returned")]
fn then_parse(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(DirectionsError::Parse { .. }))),
        "expected Parse error, got {borrowed:?}"
    );
}

#[then("a timeout error is returned")]
fn then_timeout(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(DirectionsError::Timeout { .. }))),
        "expected Timeout error, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_directions.feature", name = $title)]
        fn $fn_name(service: ServiceCell, result: ResultCell) {
            let _ = (service, result);
        }
    };
}

register_scenario!(route_through_one_stop, "fetching a route through one stop");
register_scenario!(zero_results, "service reports no route");
register_scenario!(http_error, "service answers with an HTTP error");
register_scenario!(malformed_body, "service answers with a malformed body");
register_scenario!(silent_service, "service never answers");
