use atlas_audit::ChangeLogService;
use atlas_database::Database;
use atlas_domain::changelog::ChangeLogEntry;
use atlas_domain::entity::{EntityKind, EntityReference, Severity};

async fn test_service() -> ChangeLogService {
    let db = Database::builder()
        .url("mem://")
        .session("atlas", "audit_test")
        .init()
        .await
        .expect("mem db");
    ChangeLogService::new(db)
}

fn entry(message: &str, parent: EntityReference) -> ChangeLogEntry {
    ChangeLogEntry::builder().message(message).username("jdoe").parent(parent).build()
}

#[tokio::test]
async fn written_entries_carry_id_and_timestamp() {
    let service = test_service().await;
    let parent = EntityReference::new(EntityKind::Application, 1);

    let written = service.write(entry("Attribute 'name' changed from 'a' to 'b'", parent)).await.unwrap();

    assert!(written.id.unwrap() > 0);
    assert!(written.created_at.is_some());
    assert_eq!(written.severity, Severity::Information);
    assert_eq!(written.parent, parent);
}

#[tokio::test]
async fn entries_read_back_in_insertion_order() {
    let service = test_service().await;
    let parent = EntityReference::new(EntityKind::Application, 7);

    for message in ["first", "second", "third"] {
        service.write(entry(message, parent)).await.unwrap();
    }

    let entries = service.find_by_reference(parent).await.unwrap();
    let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["first", "second", "third"]);

    for e in &entries {
        assert_eq!(e.parent, parent);
        assert_eq!(e.username, "jdoe");
    }
}

#[tokio::test]
async fn entries_are_scoped_to_their_parent_reference() {
    let service = test_service().await;
    let app = EntityReference::new(EntityKind::Application, 1);
    let other_app = EntityReference::new(EntityKind::Application, 2);
    let unit = EntityReference::new(EntityKind::OrgUnit, 1);

    service.write(entry("app change", app)).await.unwrap();
    service.write(entry("other app change", other_app)).await.unwrap();
    service.write(entry("unit change", unit)).await.unwrap();

    let entries = service.find_by_reference(app).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "app change");
}

#[tokio::test]
async fn unknown_reference_yields_empty_list() {
    let service = test_service().await;
    let entries = service
        .find_by_reference(EntityReference::new(EntityKind::ContentPanel, 999))
        .await
        .unwrap();
    assert!(entries.is_empty());
}
