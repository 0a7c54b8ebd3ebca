use atlas_database::Database;
use atlas_domain::orgunit::NewOrgUnit;
use atlas_organization::OrgUnitService;

async fn test_service() -> OrgUnitService {
    let db = Database::builder()
        .url("mem://")
        .session("atlas", "organization_test")
        .init()
        .await
        .expect("mem db");
    OrgUnitService::new(db)
}

fn unit(name: &str, parent_id: Option<i64>) -> NewOrgUnit {
    NewOrgUnit { name: name.to_owned(), description: String::new(), parent_id }
}

#[tokio::test]
async fn created_units_are_retrievable() {
    let service = test_service().await;

    let created = service.create(unit("Markets", None)).await.unwrap();
    let id = created.id.expect("assigned id");
    assert!(id > 0);

    let fetched = service.get_by_id(id).await.unwrap().expect("unit exists");
    assert_eq!(fetched.name, "Markets");
    assert_eq!(fetched.parent_id, None);

    assert!(service.get_by_id(id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_orders_by_name() {
    let service = test_service().await;

    service.create(unit("Treasury", None)).await.unwrap();
    service.create(unit("Compliance", None)).await.unwrap();
    service.create(unit("Markets", None)).await.unwrap();

    let names: Vec<String> =
        service.find_all().await.unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, ["Compliance", "Markets", "Treasury"]);
}

#[tokio::test]
async fn descendant_ids_cover_the_subtree() {
    let service = test_service().await;

    let root = service.create(unit("Group", None)).await.unwrap().id.unwrap();
    let child = service.create(unit("Division", Some(root))).await.unwrap().id.unwrap();
    let grandchild = service.create(unit("Desk", Some(child))).await.unwrap().id.unwrap();
    let sibling_tree = service.create(unit("Elsewhere", None)).await.unwrap().id.unwrap();

    let mut ids = service.descendant_ids(root).await.unwrap();
    ids.sort_unstable();
    assert_eq!(ids, [root, child, grandchild]);
    assert!(!ids.contains(&sibling_tree));

    assert_eq!(service.descendant_ids(grandchild).await.unwrap(), [grandchild]);
}
