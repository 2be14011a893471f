//! Integration tests for the fail-closed tenant row filter, against an
//! in-memory SurrealDB instance.

use skolaris_core::context::{DEFAULT_TENANT_ID, DeploymentMode, TenantContext};
use skolaris_core::error::SkolarisError;
use skolaris_core::models::student::{CreateStudent, UpdateStudent};
use skolaris_core::models::tenant::SubscriptionTier;
use skolaris_core::repository::{Pagination, StudentRepository};
use skolaris_db::repository::SurrealStudentRepository;
use skolaris_db::{DbManager, TenantFilter, run_migrations};
use skolaris_tenancy::scope;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

async fn test_db() -> Surreal<Db> {
    let manager = DbManager::memory().await.expect("in-memory db");
    run_migrations(manager.client()).await.expect("migrations");
    manager.client().clone()
}

fn ctx(tenant_id: Uuid) -> TenantContext {
    TenantContext {
        tenant_id,
        mode: DeploymentMode::SaaS,
        tier: SubscriptionTier::Pro,
    }
}

fn student(email: &str) -> CreateStudent {
    CreateStudent {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
    }
}

#[tokio::test]
async fn reads_are_scoped_to_the_current_tenant() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let repo_a = repo.clone();
    scope::with_context(Some(ctx(tenant_a)), async move {
        repo_a.create(student("ada@a.example")).await.unwrap();
        repo_a.create(student("grace@a.example")).await.unwrap();
    })
    .await;

    let repo_b = repo.clone();
    scope::with_context(Some(ctx(tenant_b)), async move {
        repo_b.create(student("alan@b.example")).await.unwrap();
    })
    .await;

    let page_a = scope::with_context(Some(ctx(tenant_a)), async {
        repo.list(Pagination::default()).await.unwrap()
    })
    .await;

    assert_eq!(page_a.total, 2);
    assert!(page_a.items.iter().all(|s| s.tenant_id == tenant_a));
}

#[tokio::test]
async fn missing_context_reads_return_nothing() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));
    let tenant = Uuid::new_v4();

    let repo_seed = repo.clone();
    let created = scope::with_context(Some(ctx(tenant)), async move {
        repo_seed.create(student("ada@a.example")).await.unwrap()
    })
    .await;

    // No context at all: an empty page, never all rows.
    let page = repo.list(Pagination::default()).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);

    // Point lookup is equally blind.
    let err = repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, SkolarisError::NotFound { .. }));
}

#[tokio::test]
async fn missing_context_writes_are_refused() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));

    let err = repo.create(student("ada@a.example")).await.unwrap_err();
    assert!(matches!(err, SkolarisError::TenantContext));

    let err = repo
        .update(Uuid::new_v4(), UpdateStudent::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SkolarisError::TenantContext));

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, SkolarisError::TenantContext));
}

#[tokio::test]
async fn create_stamps_the_context_tenant() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));
    let tenant = Uuid::new_v4();

    let created = scope::with_context(Some(ctx(tenant)), async {
        repo.create(student("ada@a.example")).await.unwrap()
    })
    .await;

    assert_eq!(created.tenant_id, tenant);
}

#[tokio::test]
async fn cross_tenant_point_lookup_is_not_found() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let repo_a = repo.clone();
    let created = scope::with_context(Some(ctx(tenant_a)), async move {
        repo_a.create(student("ada@a.example")).await.unwrap()
    })
    .await;

    let err = scope::with_context(Some(ctx(tenant_b)), async {
        repo.get_by_id(created.id).await.unwrap_err()
    })
    .await;

    assert!(matches!(err, SkolarisError::NotFound { .. }));
}

#[tokio::test]
async fn cross_tenant_update_and_delete_do_not_touch_the_row() {
    let db = test_db().await;
    let repo = SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SaaS));
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let repo_a = repo.clone();
    let created = scope::with_context(Some(ctx(tenant_a)), async move {
        repo_a.create(student("ada@a.example")).await.unwrap()
    })
    .await;

    let repo_b = repo.clone();
    let student_id = created.id;
    scope::with_context(Some(ctx(tenant_b)), async move {
        let update = UpdateStudent {
            first_name: Some("Mallory".into()),
            ..Default::default()
        };
        // The update matches no rows under B's scope.
        assert!(repo_b.update(student_id, update).await.is_err());
        // The delete silently matches nothing.
        repo_b.delete(student_id).await.unwrap();
    })
    .await;

    let survived = scope::with_context(Some(ctx(tenant_a)), async {
        repo.get_by_id(created.id).await.unwrap()
    })
    .await;

    assert_eq!(survived.first_name, "Ada");
}

#[tokio::test]
async fn self_hosted_mode_is_unrestricted() {
    let db = test_db().await;
    let repo =
        SurrealStudentRepository::new(db, TenantFilter::for_mode(DeploymentMode::SelfHosted));

    // No context needed: rows land under the fixed default tenant.
    let created = repo.create(student("ada@school.example")).await.unwrap();
    assert_eq!(created.tenant_id, DEFAULT_TENANT_ID);

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.email, "ada@school.example");
}
