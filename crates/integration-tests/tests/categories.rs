//! Integration tests for category management.

#![allow(clippy::unwrap_used)]

use sqlx::PgPool;

use stockroom_admin::db::{CategoryRepository, RepositoryError};
use stockroom_admin::models::NewCategory;
use stockroom_admin::services::StockLedger;
use stockroom_core::ledger::CREATED_BY_ADMIN;
use stockroom_integration_tests::{category, product};

#[sqlx::test(migrations = "../admin/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_name_is_rejected(pool: PgPool) {
    category(&pool, "Cement").await;
    let repo = CategoryRepository::new(&pool);

    let err = repo
        .create(&NewCategory::parse("  Cement ", None).unwrap())
        .await
        .unwrap_err();

    match err {
        RepositoryError::Conflict(message) => {
            assert_eq!(message, "Category \"Cement\" already exists!");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../admin/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_names_are_case_sensitive(pool: PgPool) {
    category(&pool, "Cement").await;

    let created = CategoryRepository::new(&pool)
        .create(&NewCategory::parse("cement", None).unwrap())
        .await
        .unwrap();

    assert_eq!(created.name, "cement");
}

#[sqlx::test(migrations = "../admin/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_list_with_counts(pool: PgPool) {
    let tools = category(&pool, "Construction Tools").await;
    category(&pool, "Cement").await;
    let ledger = StockLedger::new(&pool, CREATED_BY_ADMIN);
    ledger
        .create_product(&product(tools.id, "Trowel", 1, 1))
        .await
        .unwrap();
    ledger
        .create_product(&product(tools.id, "Level", 1, 1))
        .await
        .unwrap();

    let listed = CategoryRepository::new(&pool).list_with_counts().await.unwrap();
    let summary: Vec<_> = listed
        .iter()
        .map(|c| (c.category.name.as_str(), c.product_count))
        .collect();

    assert_eq!(summary, vec![("Cement", 0), ("Construction Tools", 2)]);
}

#[sqlx::test(migrations = "../admin/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_restricted_while_products_exist(pool: PgPool) {
    let tools = category(&pool, "Construction Tools").await;
    let empty = category(&pool, "Cement").await;
    StockLedger::new(&pool, CREATED_BY_ADMIN)
        .create_product(&product(tools.id, "Trowel", 1, 1))
        .await
        .unwrap();
    let repo = CategoryRepository::new(&pool);

    let err = repo.delete(tools.id).await.unwrap_err();
    assert!(
        matches!(err, RepositoryError::Conflict(ref m) if m.contains("1 product(s)")),
        "got {err:?}"
    );

    assert_eq!(repo.delete(empty.id).await.unwrap(), "Cement");
    assert!(matches!(
        repo.delete(empty.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}
