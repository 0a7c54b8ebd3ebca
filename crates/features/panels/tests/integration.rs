use atlas_database::Database;
use atlas_domain::panel::{ContentKind, ContentPanelDraft, DEFAULT_PANEL_WIDTH};
use atlas_panels::{PanelError, PanelService};

async fn test_service() -> PanelService {
    let db = Database::builder()
        .url("mem://")
        .session("atlas", "panels_test")
        .init()
        .await
        .expect("mem db");
    PanelService::new(db)
}

fn draft(title: &str, group: &str, priority: i32) -> ContentPanelDraft {
    ContentPanelDraft {
        id: None,
        title: Some(title.to_owned()),
        icon: Some("info".to_owned()),
        group: Some(group.to_owned()),
        content: Some(format!("<p>{title}</p>")),
        priority: Some(priority),
        width: None,
        kind: None,
    }
}

#[tokio::test]
async fn saved_panels_get_ids_and_defaults() {
    let service = test_service().await;

    let panel = service.save(draft("Welcome", "HOME", 1)).await.unwrap();

    assert!(panel.id().unwrap() > 0);
    assert_eq!(panel.width(), DEFAULT_PANEL_WIDTH);
    assert_eq!(panel.kind(), ContentKind::Html);
}

#[tokio::test]
async fn saving_with_an_id_replaces_the_stored_value() {
    let service = test_service().await;

    let original = service.save(draft("Welcome", "HOME", 1)).await.unwrap();
    let id = original.id().unwrap();

    let replacement = ContentPanelDraft {
        id: Some(id),
        width: Some(6),
        kind: Some(ContentKind::Markdown),
        ..draft("Welcome v2", "HOME", 2)
    };
    service.save(replacement).await.unwrap();

    let stored = service.find_by_group("HOME").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), Some(id));
    assert_eq!(stored[0].title(), "Welcome v2");
    assert_eq!(stored[0].width(), 6);
    assert_eq!(stored[0].kind(), ContentKind::Markdown);
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_persisting() {
    let service = test_service().await;

    let incomplete = ContentPanelDraft { title: None, ..draft("x", "HOME", 1) };
    let err = service.save(incomplete).await.unwrap_err();
    assert!(matches!(err, PanelError::Validation(_)));

    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn groups_are_served_in_priority_order() {
    let service = test_service().await;

    service.save(draft("Second", "HOME", 20)).await.unwrap();
    service.save(draft("First", "HOME", 10)).await.unwrap();
    service.save(draft("Other", "ADMIN", 1)).await.unwrap();

    let home = service.find_by_group("HOME").await.unwrap();
    let titles: Vec<&str> = home.iter().map(|p| p.title()).collect();
    assert_eq!(titles, ["First", "Second"]);

    assert_eq!(service.find_all().await.unwrap().len(), 3);
    assert!(service.find_by_group("MISSING").await.unwrap().is_empty());
}
