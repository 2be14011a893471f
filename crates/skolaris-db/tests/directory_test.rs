//! Integration tests for the directory lookups that drive tenant
//! resolution and the membership check.

use skolaris_core::models::tenant::{CreateTenant, SubscriptionTier};
use skolaris_core::models::user::CreateUser;
use skolaris_core::repository::{TenantRepository, UserRepository};
use skolaris_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use skolaris_db::{DbManager, SurrealSubjectDirectory, SurrealTenantDirectory, run_migrations};
use skolaris_tenancy::{SubjectDirectory, TenantDirectory};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn test_db() -> Surreal<Db> {
    let manager = DbManager::memory().await.expect("in-memory db");
    run_migrations(manager.client()).await.expect("migrations");
    manager.client().clone()
}

fn tenant(name: &str, subdomain: &str) -> CreateTenant {
    CreateTenant {
        name: name.into(),
        subdomain: subdomain.into(),
        tier: SubscriptionTier::Pro,
        realm: subdomain.into(),
    }
}

#[tokio::test]
async fn finds_active_tenant_by_subdomain() {
    let db = test_db().await;
    let repo = SurrealTenantRepository::new(db.clone());
    let directory = SurrealTenantDirectory::new(db);

    let created = repo.create(tenant("Acme Academy", "acme")).await.unwrap();

    let found = directory
        .find_active_by_subdomain("acme")
        .await
        .unwrap()
        .expect("tenant should resolve");
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Acme Academy");
}

#[tokio::test]
async fn unknown_subdomain_resolves_to_none() {
    let db = test_db().await;
    let directory = SurrealTenantDirectory::new(db);

    let found = directory.find_active_by_subdomain("ghost").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn deactivated_tenant_is_invisible() {
    let db = test_db().await;
    let repo = SurrealTenantRepository::new(db.clone());
    let directory = SurrealTenantDirectory::new(db);

    let created = repo.create(tenant("Acme Academy", "acme")).await.unwrap();
    repo.deactivate(created.id).await.unwrap();

    let found = directory.find_active_by_subdomain("acme").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn maps_subject_to_owning_tenant() {
    let db = test_db().await;
    let tenants = SurrealTenantRepository::new(db.clone());
    let users = SurrealUserRepository::new(db.clone());
    let directory = SurrealSubjectDirectory::new(db);

    let created = tenants.create(tenant("Acme Academy", "acme")).await.unwrap();
    users
        .create(CreateUser {
            tenant_id: created.id,
            subject: "idp|alice".into(),
            email: "alice@acme.example".into(),
            display_name: "Alice".into(),
        })
        .await
        .unwrap();

    let owner = directory
        .find_tenant_for_subject("idp|alice")
        .await
        .unwrap();
    assert_eq!(owner, Some(created.id));

    let unknown = directory
        .find_tenant_for_subject("idp|nobody")
        .await
        .unwrap();
    assert_eq!(unknown, None);
}
