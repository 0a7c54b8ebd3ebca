use atlas_database::Database;
use atlas_domain::config::ApiConfig;
use atlas_domain::registry::{FeatureSlice, InitializedSlice};
use atlas_kernel::server::{ApiState, ApiStateError};
use std::any::Any;

#[derive(Debug)]
struct DummySlice {
    name: &'static str,
}

impl FeatureSlice for DummySlice {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct UnregisteredSlice;

impl FeatureSlice for UnregisteredSlice {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

async fn test_db() -> Database {
    Database::builder().url("mem://").session("atlas", "kernel_test").init().await.expect("mem db")
}

#[tokio::test]
async fn build_without_config_fails_validation() {
    let err = ApiState::builder().db(test_db().await).build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn build_without_database_fails_validation() {
    let err = ApiState::builder().config(ApiConfig::default()).build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[tokio::test]
async fn registered_slices_are_retrievable_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(test_db().await)
        .register_slice(InitializedSlice::new(DummySlice { name: "dummy" }))
        .build()
        .expect("state builds");

    let slice = state.try_get_slice::<DummySlice>().expect("registered slice resolves");
    assert_eq!(slice.name, "dummy");
    assert_eq!(state.slice_ids().count(), 1);

    let err = state.try_get_slice::<UnregisteredSlice>().unwrap_err();
    assert!(matches!(err, ApiStateError::MissingSlice { .. }));
}
