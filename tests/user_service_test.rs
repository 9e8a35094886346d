//! User service unit tests.

use std::sync::Arc;

use sea_orm::{DbErr, RuntimeErr};

use users_api::domain::User;
use users_api::errors::AppError;
use users_api::infra::MockUserRepository;
use users_api::services::{UserManager, UserService};

fn create_test_user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

#[tokio::test]
async fn test_list_users_passes_rows_through() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .times(1)
        .returning(|| Ok(vec![create_test_user(1, "Ada"), create_test_user(2, "Alan")]));

    let service = UserManager::new(Arc::new(repo));
    let users = service.list_users().await.unwrap();

    assert_eq!(users, vec![create_test_user(1, "Ada"), create_test_user(2, "Alan")]);
}

#[tokio::test]
async fn test_list_users_empty() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).returning(|| Ok(vec![]));

    let service = UserManager::new(Arc::new(repo));

    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_users_propagates_database_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).returning(|| {
        Err(AppError::Database(DbErr::Conn(RuntimeErr::Internal(
            "unreachable".to_string(),
        ))))
    });

    let service = UserManager::new(Arc::new(repo));
    let result = service.list_users().await;

    assert!(matches!(result, Err(AppError::Database(DbErr::Conn(_)))));
}

#[tokio::test]
async fn test_list_users_never_writes() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|| Ok(vec![]));
    repo.expect_create().never();

    let service = UserManager::new(Arc::new(repo));
    service.list_users().await.unwrap();
    service.list_users().await.unwrap();
}
