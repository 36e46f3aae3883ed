//! End-to-end tests for `GET /rates` through the full middleware stack.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_default_request() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-10&origin=CNSGH&destination=north_europe_main",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"day": "2016-01-01", "average_price": 1150.0},
            {"day": "2016-01-02", "average_price": null},
            {"day": "2016-01-03", "average_price": 1000.25},
        ])
    );
}

#[tokio::test]
async fn test_defaults_and_trailing_slash() {
    let (app, _) = common::sample_app().await;

    let (status, plain) = common::get_json(&app, "/rates").await;
    assert_eq!(status, StatusCode::OK);

    let (status, slashed) = common::get_json(&app, "/rates/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, slashed);
    assert_eq!(plain.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_region_origin_includes_descendant_codes() {
    let (app, _) = common::sample_app().await;

    // china_main covers CNQIN through china_north_main: two records on day 1.
    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-01&origin=china_main&destination=NLRTM",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"day": "2016-01-01", "average_price": null}]));

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-01&origin=china_main&destination=north_europe_main",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"day": "2016-01-01", "average_price": 1320.0}]));
}

#[tokio::test]
async fn test_baltic_destination() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-10&origin=CNSGH&destination=baltic",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"day": "2016-01-04", "average_price": 500.0}]));
}

#[tokio::test]
async fn test_region_without_codes_returns_empty_list() {
    let (app, store) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?origin=CNSGH&destination=baltic_main",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(store.rate_query_count(), 0);
}

#[tokio::test]
async fn test_unknown_origin_code() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-10&origin=CNSGA&destination=north_europe_main",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"detail": "origin port not found in database. Please enter a valid value"})
    );
}

#[tokio::test]
async fn test_unknown_destination_slug() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-01-01&date_to=2016-01-10&origin=CNSGH&destination=north_europe",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"detail": "destination slug not found in database. Please enter a valid value"})
    );
}

#[tokio::test]
async fn test_prohibited_characters() {
    let (app, store) = common::sample_app().await;

    let cases = [
        ("CNSGH%20*", "north_europe_main", "origin contains prohibited characters"),
        // Destination is also invalid, but origin is reported.
        ("CNSGH%20*", "north_europe", "origin contains prohibited characters"),
        ("CNSGH", "north_europe_main.*", "destination contains prohibited characters"),
        ("CNSGH", "north%20europe", "destination contains prohibited characters"),
    ];

    for (origin, destination, detail) in cases {
        let uri = format!(
            "/rates?date_from=2016-01-01&date_to=2016-01-10&origin={origin}&destination={destination}"
        );
        let (status, body) = common::get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body, json!({ "detail": detail }), "{uri}");
    }
    assert_eq!(store.rate_query_count(), 0);
}

#[tokio::test]
async fn test_origin_existence_checked_before_destination_characters() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?origin=CNSGA&destination=north_europe_main.*",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"detail": "origin port not found in database. Please enter a valid value"})
    );
}

#[tokio::test]
async fn test_malformed_dates() {
    let (app, _) = common::sample_app().await;

    let cases = [
        ("abc", "2016-01-10", "date_from"),
        ("2016-01-01", "123", "date_to"),
        ("1680863201.566496", "2016-01-10", "date_from"),
        ("2016-01-10000", "2016-01-10", "date_from"),
        ("2016-100-01", "2016-01-10", "date_from"),
        ("2016-02-30", "2016-01-10", "date_from"),
    ];

    for (date_from, date_to, param) in cases {
        let uri = format!(
            "/rates?date_from={date_from}&date_to={date_to}&origin=CNSGH&destination=north_europe_main"
        );
        let (status, body) = common::get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(
            body,
            json!({ "detail": format!("{param} must be a date in YYYY-M-D format") }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_token_length_bounds() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(&app, "/rates?origin=CNSG").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"detail": "origin must be between 5 and 20 characters"}));

    let (status, _) =
        common::get_json(&app, "/rates?destination=a_very_long_region_slug_name").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_single_day_range() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(
        &app,
        "/rates?date_from=2016-1-3&date_to=2016-1-3&origin=CNSGH&destination=north_europe_main",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"day": "2016-01-03", "average_price": 1000.25}]));
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let (app, store) = common::sample_app().await;
    store.set_failing(true);

    let (status, body) = common::get_json(&app, "/rates?origin=CNSGH&destination=NLRTM").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "Failed to read rates from the data store"})
    );
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _) = common::sample_app().await;

    let (status, body) = common::get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "alive"}));

    let (status, body) = common::get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "regions": 12, "location_codes": 13}));
}

#[tokio::test]
async fn test_request_id_assigned_and_echoed() {
    let (app, _) = common::sample_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "test-request-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "test-request-1");
}
