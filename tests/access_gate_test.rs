//! Access gate unit tests.
//!
//! The employee service decides API access from the repository's
//! get-or-create result; the repository itself owns the atomic
//! insert-if-absent, so these tests only assert the gate's policy.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use electronet::domain::Employee;
use electronet::errors::AppError;
use electronet::infra::MockEmployeeRepository;
use electronet::services::{EmployeeManager, EmployeeService};

fn employee(principal: Uuid, is_active: bool) -> Employee {
    Employee {
        id: 1,
        principal,
        email: "employee@example.com".to_string(),
        is_active,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn active_employee_is_authorized() {
    let principal = Uuid::new_v4();

    let mut repo = MockEmployeeRepository::new();
    repo.expect_get_or_create()
        .withf(move |p, _| *p == principal)
        .returning(|p, _| Ok(employee(p, true)));

    let service = EmployeeManager::new(Arc::new(repo));
    assert!(service
        .authorize(principal, "employee@example.com")
        .await
        .is_ok());
}

#[tokio::test]
async fn inactive_employee_is_denied() {
    let principal = Uuid::new_v4();

    let mut repo = MockEmployeeRepository::new();
    repo.expect_get_or_create()
        .returning(|p, _| Ok(employee(p, false)));

    let service = EmployeeManager::new(Arc::new(repo));
    let err = service
        .authorize(principal, "employee@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::PermissionDenied));
}

#[tokio::test]
async fn first_time_principal_is_provisioned_and_granted() {
    // The repository provisions unknown principals as active; the gate
    // must pass the caller's email through for the new record.
    let principal = Uuid::new_v4();

    let mut repo = MockEmployeeRepository::new();
    repo.expect_get_or_create()
        .withf(move |p, email| *p == principal && email == "fresh@example.com")
        .returning(|p, email| {
            Ok(Employee {
                id: 7,
                principal: p,
                email: email.to_string(),
                is_active: true,
                created_at: Utc::now(),
            })
        });

    let service = EmployeeManager::new(Arc::new(repo));
    assert!(service.authorize(principal, "fresh@example.com").await.is_ok());
}

#[tokio::test]
async fn deactivation_flips_the_flag() {
    let principal = Uuid::new_v4();

    let mut repo = MockEmployeeRepository::new();
    repo.expect_set_active()
        .withf(|id, is_active| *id == 1 && !is_active)
        .returning(move |_, is_active| Ok(employee(principal, is_active)));

    let service = EmployeeManager::new(Arc::new(repo));
    let updated = service.set_active(1, false).await.unwrap();

    assert!(!updated.is_active);
}

#[tokio::test]
async fn missing_employee_lookup_is_not_found() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = EmployeeManager::new(Arc::new(repo));
    let err = service.get_employee(42).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}
