//! End-to-end refresh tests against a mocked site directory.

use charger_map::pipeline::{FeatureStore, Pipeline, RefreshOutcome};
use charger_map::sites::{SiteClient, SiteClientConfig, SiteError};
use geojson::Value;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITES_PATH: &str = "/service/supercharge/allSites";

fn pipeline_for(server: &MockServer) -> Pipeline {
    let config = SiteClientConfig::new(format!("{}{}", server.uri(), SITES_PATH)).with_timeout(5);
    let client = SiteClient::new(config).expect("client construction should not fail");
    Pipeline::new(client, FeatureStore::new())
}

async fn mount_body(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn site(name: &str, status: &str, power: f64, lat: f64, lon: f64) -> serde_json::Value {
    json!({
        "id": 1,
        "locationId": name.to_lowercase(),
        "name": name,
        "status": status,
        "address": { "city": "Reston", "state": "VA", "country": "USA" },
        "gps": { "latitude": lat, "longitude": lon },
        "stallCount": 8,
        "powerKilowatt": power,
        "solarCanopy": false,
        "battery": false,
        "otherEVs": false
    })
}

fn feature_names(collection: &geojson::FeatureCollection) -> Vec<String> {
    collection
        .features
        .iter()
        .filter_map(|f| f.property("name").and_then(|v| v.as_str()).map(String::from))
        .collect()
}

#[tokio::test]
async fn scenario_a_publishes_single_point() {
    let server = MockServer::start().await;
    mount_body(&server, json!([site("Site A", "OPEN", 250.0, 38.9, -77.3)])).await;

    let pipeline = pipeline_for(&server);
    let outcome = pipeline.refresh().await.expect("refresh should succeed");

    assert_eq!(
        outcome,
        RefreshOutcome::Published {
            features: 1,
            ineligible: 0,
            skipped: 0
        }
    );

    let collection = pipeline.store().current().await;
    assert_eq!(feature_names(&collection), vec!["Site A"]);
    let geometry = collection.features[0].geometry.as_ref().unwrap();
    assert_eq!(geometry.value, Value::Point(vec![-77.3, 38.9]));
}

#[tokio::test]
async fn scenarios_b_and_c_publish_empty_collection() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        json!([
            site("Slow", "OPEN", 150.0, 38.9, -77.3),
            site("Soon", "COMING_SOON", 250.0, 38.9, -77.3),
        ]),
    )
    .await;

    let pipeline = pipeline_for(&server);
    let outcome = pipeline.refresh().await.unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Published {
            features: 0,
            ineligible: 2,
            skipped: 0
        }
    );
    assert!(pipeline.store().current().await.features.is_empty());
    assert_eq!(pipeline.store().snapshot().await.publications, 1);
}

#[tokio::test]
async fn scenario_d_empty_array_leaves_store_unchanged() {
    let server = MockServer::start().await;
    mount_body(&server, json!([])).await;

    let pipeline = pipeline_for(&server);
    let before = pipeline.store().current().await;
    let outcome = pipeline.refresh().await.unwrap();
    let after = pipeline.store().current().await;

    assert_eq!(outcome, RefreshOutcome::Unchanged);
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert_eq!(pipeline.store().snapshot().await.publications, 0);
}

#[tokio::test]
async fn scenario_d_null_and_empty_body_leave_store_unchanged() {
    for body in ["null", ""] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SITES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let pipeline = pipeline_for(&server);
        assert_eq!(pipeline.refresh().await.unwrap(), RefreshOutcome::Unchanged);
        assert_eq!(pipeline.store().snapshot().await.publications, 0);
    }
}

#[tokio::test]
async fn empty_payload_keeps_previous_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([site("Site A", "OPEN", 250.0, 38.9, -77.3)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_body(&server, json!([])).await;

    let pipeline = pipeline_for(&server);
    pipeline.refresh().await.unwrap();
    let published = pipeline.store().current().await;

    assert_eq!(pipeline.refresh().await.unwrap(), RefreshOutcome::Unchanged);
    let current = pipeline.store().current().await;
    assert!(std::sync::Arc::ptr_eq(&published, &current));
    assert_eq!(feature_names(&current), vec!["Site A"]);
}

#[tokio::test]
async fn scenario_e_missing_gps_is_excluded() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        json!([
            { "name": "No GPS", "status": "OPEN", "powerKilowatt": 250 },
            site("Site A", "OPEN", 250.0, 38.9, -77.3),
        ]),
    )
    .await;

    let pipeline = pipeline_for(&server);
    let outcome = pipeline.refresh().await.unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Published {
            features: 1,
            ineligible: 0,
            skipped: 1
        }
    );
    assert_eq!(
        feature_names(&*pipeline.store().current().await),
        vec!["Site A"]
    );
}

#[tokio::test]
async fn refresh_is_idempotent_and_order_preserving() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        json!([
            site("Herndon", "OPEN", 250.0, 38.97, -77.38),
            site("Ashburn", "OPEN", 150.0, 39.03, -77.47),
            site("Fairfax", "OPEN", 250.0, 38.85, -77.30),
            site("Leesburg", "PERMIT", 250.0, 39.11, -77.56),
            site("Reston", "OPEN", 250.0, 38.96, -77.36),
        ]),
    )
    .await;

    let pipeline = pipeline_for(&server);
    pipeline.refresh().await.unwrap();
    let first = pipeline.store().current().await;
    pipeline.refresh().await.unwrap();
    let second = pipeline.store().current().await;

    assert_eq!(*first, *second);
    assert_eq!(feature_names(&second), vec!["Herndon", "Fairfax", "Reston"]);
    assert_eq!(pipeline.store().snapshot().await.publications, 2);
}

#[tokio::test]
async fn server_error_leaves_store_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    let err = pipeline.refresh().await.unwrap_err();

    assert!(matches!(err, SiteError::Api { status: 503, .. }));
    assert!(pipeline.store().current().await.features.is_empty());
    assert_eq!(pipeline.store().snapshot().await.publications, 0);
}

#[tokio::test]
async fn invalid_json_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    let err = pipeline.refresh().await.unwrap_err();

    assert!(matches!(err, SiteError::Json { .. }));
    assert_eq!(pipeline.store().snapshot().await.publications, 0);
}

#[tokio::test]
async fn unreachable_host_is_an_http_error() {
    // Port 1 is reserved; nothing listens there.
    let uri = format!("http://127.0.0.1:1{}", SITES_PATH);
    let client = SiteClient::new(SiteClientConfig::new(uri).with_timeout(2)).unwrap();
    let pipeline = Pipeline::new(client, FeatureStore::new());

    let err = pipeline.refresh().await.unwrap_err();
    assert!(matches!(err, SiteError::Http(_)));
}

#[tokio::test]
async fn concurrent_refresh_is_rejected_while_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([site("Site A", "OPEN", 250.0, 38.9, -77.3)]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    let (first, second) = tokio::join!(pipeline.refresh(), pipeline.refresh());

    assert!(matches!(first.unwrap(), RefreshOutcome::Published { features: 1, .. }));
    assert_eq!(second.unwrap(), RefreshOutcome::AlreadyRunning);
    assert_eq!(pipeline.store().snapshot().await.publications, 1);
}

#[tokio::test]
async fn slower_older_refresh_is_superseded_on_shared_store() {
    let slow_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([site("Old", "OPEN", 250.0, 38.9, -77.3)]))
                .set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&slow_server)
        .await;

    let fast_server = MockServer::start().await;
    mount_body(&fast_server, json!([site("New", "OPEN", 250.0, 39.0, -77.4)])).await;

    let store = FeatureStore::new();
    let client_for = |server: &MockServer| {
        let config = SiteClientConfig::new(format!("{}{}", server.uri(), SITES_PATH));
        SiteClient::new(config).unwrap()
    };
    let slow = Pipeline::new(client_for(&slow_server), store.clone());
    let fast = Pipeline::new(client_for(&fast_server), store.clone());

    let (older, newer) = tokio::join!(slow.refresh(), async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        fast.refresh().await
    });

    assert!(matches!(newer.unwrap(), RefreshOutcome::Published { features: 1, .. }));
    assert_eq!(older.unwrap(), RefreshOutcome::Superseded);

    let current = store.current().await;
    assert_eq!(feature_names(&current), vec!["New"]);
    assert_eq!(store.snapshot().await.publications, 1);
}
