use atlas::kernel::server::ApiState;
use atlas_database::Database;
use atlas_event_bus::EventBus;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_router() -> Router {
    let cfg = atlas::domain::config::ApiConfig::default();
    let db = Database::builder()
        .url("mem://")
        .session("atlas", "api_test")
        .init()
        .await
        .expect("mem db");
    let events = EventBus::new();

    let slices = atlas::init(&cfg, &db, &events).expect("slices init");
    let state = slices
        .into_iter()
        .fold(ApiState::builder().config(cfg).db(db).events(events), |builder, slice| {
            builder.register_slice(slice)
        })
        .build()
        .expect("state builds");

    atlas_server::router::init(state)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user", "jdoe")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let router = test_router().await;
    let (status, body) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn register_fetch_update_and_audit_trail() {
    let router = test_router().await;

    // Register
    let (status, registered) = send(
        &router,
        post_json(
            "/api/app",
            &json!({"name": "Ledger", "orgUnitId": 1, "kind": "IN_HOUSE"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = registered["id"].as_i64().expect("integer id");
    assert!(id > 0);

    // Fetch by id
    let (status, fetched) = send(&router, get(&format!("/api/app/id/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ledger");

    // Update with one discrete change
    let action = json!({
        "app": {
            "id": id,
            "name": "Ledger v2",
            "description": "",
            "orgUnitId": 1,
            "kind": "IN_HOUSE",
            "lifecyclePhase": "PRODUCTION",
        },
        "changes": [{"name": "title", "original": "Ledger", "current": "Ledger v2"}],
        "tags": ["finance"],
        "aliases": ["ldgr"],
    });
    let (status, updated) = send(&router, post_json(&format!("/api/app/{id}"), &action)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, Value::Bool(true));

    let (_, fetched) = send(&router, get(&format!("/api/app/id/{id}"))).await;
    assert_eq!(fetched["name"], "Ledger v2");

    // Audit trail: registration entry plus exactly one entry per change, in order.
    let (status, trail) = send(&router, get(&format!("/api/change-log/APPLICATION/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let entries = trail.as_array().expect("entry list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["message"], "Registered new application: Ledger");
    assert_eq!(entries[1]["message"], "Attribute 'title' changed from 'Ledger' to 'Ledger v2'");
    for entry in entries {
        assert_eq!(entry["username"], "jdoe");
        assert_eq!(entry["parent"]["kind"], "APPLICATION");
        assert_eq!(entry["parent"]["id"], id);
    }

    // The tag is now visible through the tag queries.
    let (_, tags) = send(&router, get("/api/app/tags")).await;
    assert_eq!(tags, json!(["finance"]));
}

#[tokio::test]
async fn update_without_id_leaves_no_audit_trace() {
    let router = test_router().await;

    let (_, registered) = send(
        &router,
        post_json("/api/app", &json!({"name": "Payments", "orgUnitId": 1, "kind": "IN_HOUSE"})),
    )
    .await;
    let id = registered["id"].as_i64().unwrap();

    let action = json!({
        "app": {
            "name": "Payments v2",
            "description": "",
            "orgUnitId": 1,
            "kind": "IN_HOUSE",
        },
        "changes": [{"name": "title", "original": "Payments", "current": "Payments v2"}],
        "tags": [],
        "aliases": [],
    });
    let (status, error) = send(&router, post_json(&format!("/api/app/{id}"), &action)).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(error["error"], "PRECONDITION");

    // Only the registration entry exists; the failed update wrote nothing.
    let (_, trail) = send(&router, get(&format!("/api/change-log/APPLICATION/{id}"))).await;
    assert_eq!(trail.as_array().unwrap().len(), 1);

    let (_, fetched) = send(&router, get(&format!("/api/app/id/{id}"))).await;
    assert_eq!(fetched["name"], "Payments");
}

#[tokio::test]
async fn by_ids_short_circuits_and_bad_bodies_are_structured() {
    let router = test_router().await;

    let (status, body) = send(&router, post_json("/api/app/by-ids", &json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Malformed body yields the structured error shape.
    let request = Request::builder()
        .method("POST")
        .uri("/api/app")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, error) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "BAD_REQUEST");
    assert!(error["message"].is_string());
}

#[tokio::test]
async fn missing_application_is_a_structured_404() {
    let router = test_router().await;

    let (status, error) = send(&router, get("/api/app/id/99999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "NOT_FOUND");
}

#[tokio::test]
async fn org_unit_tree_scopes_application_queries() {
    let router = test_router().await;

    let (_, root) = send(&router, post_json("/api/org-unit", &json!({"name": "Group"}))).await;
    let root_id = root["id"].as_i64().unwrap();
    let (_, child) = send(
        &router,
        post_json("/api/org-unit", &json!({"name": "Desk", "parentId": root_id})),
    )
    .await;
    let child_id = child["id"].as_i64().unwrap();

    for (name, ou) in [("RootApp", root_id), ("ChildApp", child_id)] {
        send(
            &router,
            post_json("/api/app", &json!({"name": name, "orgUnitId": ou, "kind": "IN_HOUSE"})),
        )
        .await;
    }

    let (_, direct) = send(&router, get(&format!("/api/app/org-unit/{root_id}"))).await;
    assert_eq!(direct.as_array().unwrap().len(), 1);

    let (_, tree) = send(&router, get(&format!("/api/app/org-unit-tree/{root_id}"))).await;
    assert_eq!(tree.as_array().unwrap().len(), 2);

    let (_, tallies) = send(&router, get("/api/app/count-by/org-unit")).await;
    assert_eq!(tallies.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn panels_round_trip_with_defaults() {
    let router = test_router().await;

    let (status, saved) = send(
        &router,
        post_json(
            "/api/panel",
            &json!({"title": "Welcome", "icon": "home", "group": "HOME", "content": "<p>hi</p>", "priority": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["width"], 12);
    assert_eq!(saved["kind"], "HTML");

    let (_, panels) = send(&router, get("/api/panel/group/HOME")).await;
    assert_eq!(panels.as_array().unwrap().len(), 1);

    // A draft missing a mandatory field is a validation failure.
    let (status, error) = send(
        &router,
        post_json("/api/panel", &json!({"icon": "home", "group": "HOME", "content": "x", "priority": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], "VALIDATION");
    assert!(error["message"].as_str().unwrap().contains("title"));
}
