use atlas_application::{ApplicationError, ApplicationService};
use atlas_database::Database;
use atlas_domain::application::{
    AppRegistrationRequest, Application, ApplicationKind, AssetCodeRelationshipKind,
    LifecyclePhase,
};
use atlas_domain::events::{ApplicationRegistered, ApplicationUpdated};
use atlas_event_bus::EventBus;

async fn test_service() -> (ApplicationService, EventBus) {
    let db = Database::builder()
        .url("mem://")
        .session("atlas", "application_test")
        .init()
        .await
        .expect("mem db");
    let events = EventBus::new();
    (ApplicationService::new(db, events.clone()), events)
}

fn registration(name: &str, org_unit_id: i64) -> AppRegistrationRequest {
    AppRegistrationRequest {
        name: name.to_owned(),
        description: Some(format!("{name} description")),
        asset_code: None,
        parent_asset_code: None,
        org_unit_id,
        kind: ApplicationKind::InHouse,
        lifecycle_phase: LifecyclePhase::Production,
    }
}

#[tokio::test]
async fn registration_assigns_a_positive_id_and_an_asset_code() {
    let (service, events) = test_service().await;
    let mut registered = events.subscribe::<ApplicationRegistered>().unwrap();

    let response = service.register(registration("Ledger", 1)).await.unwrap();

    assert!(response.id > 0);
    assert!(response.request.asset_code.is_some(), "missing asset code is generated");
    assert_eq!(registered.recv().await.unwrap().id, response.id);

    let fetched = service.get_by_id(response.id).await.unwrap().expect("persisted");
    assert_eq!(fetched.name, "Ledger");
    assert_eq!(fetched.org_unit_id, 1);
    assert_eq!(fetched.kind, ApplicationKind::InHouse);
}

#[tokio::test]
async fn update_replaces_entity_state() {
    let (service, events) = test_service().await;
    let response = service.register(registration("Ledger", 1)).await.unwrap();
    let mut updated_events = events.subscribe::<ApplicationUpdated>().unwrap();

    let mut app = service.get_by_id(response.id).await.unwrap().unwrap();
    app.name = "Ledger v2".to_owned();
    app.lifecycle_phase = LifecyclePhase::Retired;
    service.update(&app).await.unwrap();

    let fetched = service.get_by_id(response.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Ledger v2");
    assert_eq!(fetched.lifecycle_phase, LifecyclePhase::Retired);
    assert_eq!(updated_events.recv().await.unwrap().id, response.id);
}

#[tokio::test]
async fn update_without_id_is_rejected_before_any_write() {
    let (service, _events) = test_service().await;
    let app = Application {
        id: None,
        name: "Ghost".to_owned(),
        description: String::new(),
        asset_code: None,
        parent_asset_code: None,
        org_unit_id: 1,
        kind: ApplicationKind::ThirdParty,
        lifecycle_phase: LifecyclePhase::Conceptual,
    };

    let err = service.update(&app).await.unwrap_err();
    assert!(matches!(err, ApplicationError::MissingId));
    assert!(service.search("Ghost").await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_ids_short_circuits_on_empty_input() {
    let (service, _events) = test_service().await;
    assert!(service.find_by_ids(&[]).await.unwrap().is_empty());

    let a = service.register(registration("Alpha", 1)).await.unwrap().id;
    let b = service.register(registration("Beta", 1)).await.unwrap().id;

    let found = service.find_by_ids(&[a, b, 9999]).await.unwrap();
    let names: Vec<&str> = found.iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
}

#[tokio::test]
async fn search_matches_name_case_insensitively() {
    let (service, _events) = test_service().await;
    service.register(registration("Ledger", 1)).await.unwrap();
    service.register(registration("Payments Hub", 1)).await.unwrap();

    let hits = service.search("ledg").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ledger");

    assert!(service.search("no such thing").await.unwrap().is_empty());
}

#[tokio::test]
async fn tags_are_replaced_wholesale_and_searchable() {
    let (service, _events) = test_service().await;
    let id = service.register(registration("Ledger", 1)).await.unwrap().id;

    service
        .update_tags(id, &["finance".to_owned(), "core".to_owned()])
        .await
        .unwrap();
    assert_eq!(service.find_all_tags().await.unwrap(), ["core", "finance"]);

    let tagged = service.find_by_tag("finance").await.unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, Some(id));

    // Full replacement, not a merge.
    service.update_tags(id, &["archived".to_owned()]).await.unwrap();
    assert_eq!(service.find_all_tags().await.unwrap(), ["archived"]);
    assert!(service.find_by_tag("finance").await.unwrap().is_empty());
}

#[tokio::test]
async fn tally_counts_applications_per_org_unit() {
    let (service, _events) = test_service().await;
    service.register(registration("A", 1)).await.unwrap();
    service.register(registration("B", 1)).await.unwrap();
    service.register(registration("C", 2)).await.unwrap();

    let tallies = service.count_by_org_unit().await.unwrap();
    assert_eq!(tallies.len(), 2);
    assert_eq!(tallies[0].id, "1");
    assert_eq!(tallies[0].count, 2);
    assert_eq!(tallies[1].id, "2");
    assert_eq!(tallies[1].count, 1);
}

#[tokio::test]
async fn related_applications_follow_asset_code_links() {
    let (service, _events) = test_service().await;

    let parent = AppRegistrationRequest {
        asset_code: Some("CORE-1".to_owned()),
        ..registration("Core Platform", 1)
    };
    let child_a = AppRegistrationRequest {
        asset_code: Some("CORE-1-A".to_owned()),
        parent_asset_code: Some("CORE-1".to_owned()),
        ..registration("Reporting", 1)
    };
    let child_b = AppRegistrationRequest {
        asset_code: Some("CORE-1-B".to_owned()),
        parent_asset_code: Some("CORE-1".to_owned()),
        ..registration("Billing", 1)
    };

    let parent_id = service.register(parent).await.unwrap().id;
    let child_a_id = service.register(child_a).await.unwrap().id;
    service.register(child_b).await.unwrap();

    let related = service.find_related(child_a_id).await.unwrap();
    let parents = &related[&AssetCodeRelationshipKind::Parent];
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].id, Some(parent_id));

    let siblings = &related[&AssetCodeRelationshipKind::SharesParent];
    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0].name, "Billing");

    let from_parent = service.find_related(parent_id).await.unwrap();
    let children = &from_parent[&AssetCodeRelationshipKind::Child];
    assert_eq!(children.len(), 2);

    let err = service.find_related(12345).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(12345)));
}

#[tokio::test]
async fn find_by_org_units_scopes_results() {
    let (service, _events) = test_service().await;
    service.register(registration("A", 1)).await.unwrap();
    service.register(registration("B", 2)).await.unwrap();
    service.register(registration("C", 3)).await.unwrap();

    let scoped = service.find_by_org_units(&[1, 3]).await.unwrap();
    let names: Vec<&str> = scoped.iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
}
