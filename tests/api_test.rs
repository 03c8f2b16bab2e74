//! Integration tests for API endpoints.
//!
//! The real router runs with stub services behind it, so these tests
//! cover the transport contract: the auth and employee-gate layers, the
//! raw-payload debt guard, validation rejection and admin-only routes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use electronet::api::{create_router, AppState};
use electronet::domain::{
    CreateNode, Employee, NewProduct, Node, NodeFilter, Product, ProductFilter, Tier, UpdateNode,
};
use electronet::errors::{AppError, AppResult};
use electronet::infra::Database;
use electronet::services::{AuthService, Claims, EmployeeService, NodeService, ProductService};
use electronet::types::PaginationParams;

// =============================================================================
// Stub services
// =============================================================================

/// Token verifier accepting two well-known test tokens
struct StubAuthService;

impl AuthService for StubAuthService {
    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let role = match token {
            "employee-token" => "employee",
            "admin-token" => "admin",
            _ => return Err(AppError::Unauthorized),
        };

        Ok(Claims {
            sub: Uuid::new_v4(),
            email: "caller@example.com".to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }
}

/// Employee gate with a fixed answer
struct StubEmployeeService {
    active: bool,
}

#[async_trait]
impl EmployeeService for StubEmployeeService {
    async fn authorize(&self, _principal: Uuid, _email: &str) -> AppResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        Ok(vec![Employee {
            id: 1,
            principal: Uuid::new_v4(),
            email: "employee@example.com".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }])
    }

    async fn get_employee(&self, id: i64) -> AppResult<Employee> {
        Ok(Employee {
            id,
            principal: Uuid::new_v4(),
            email: "employee@example.com".to_string(),
            is_active: true,
            created_at: Utc::now(),
        })
    }

    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<Employee> {
        Ok(Employee {
            id,
            principal: Uuid::new_v4(),
            email: "employee@example.com".to_string(),
            is_active,
            created_at: Utc::now(),
        })
    }
}

fn sample_node(id: i64, tier: Tier) -> Node {
    Node {
        id,
        name: format!("node-{}", id),
        email: "contact@example.com".to_string(),
        country: "Germany".to_string(),
        city: "Berlin".to_string(),
        street: "Hauptstrasse".to_string(),
        house_number: "1".to_string(),
        supplier_id: None,
        supplier_name: None,
        tier,
        debt: Decimal::ZERO,
        is_active: true,
        created_at: Utc::now(),
        products: vec![],
    }
}

/// Node service echoing inputs back; tier mimics derivation shape only
struct StubNodeService;

#[async_trait]
impl NodeService for StubNodeService {
    async fn get_node(&self, id: i64) -> AppResult<Node> {
        Ok(sample_node(id, Tier::Factory))
    }

    async fn list_nodes(
        &self,
        _filter: NodeFilter,
        _page: PaginationParams,
    ) -> AppResult<(Vec<Node>, u64)> {
        Ok((vec![], 0))
    }

    async fn create_node(&self, input: CreateNode) -> AppResult<Node> {
        let tier = if input.supplier_id.is_some() {
            Tier::Retail
        } else {
            Tier::Factory
        };
        let mut node = sample_node(10, tier);
        node.name = input.name;
        node.supplier_id = input.supplier_id;
        Ok(node)
    }

    async fn update_node(&self, id: i64, input: UpdateNode) -> AppResult<Node> {
        let mut node = sample_node(id, Tier::Factory);
        node.name = input.name;
        Ok(node)
    }

    async fn delete_node(&self, _id: i64) -> AppResult<()> {
        Ok(())
    }

    async fn clear_debt(&self, ids: Vec<i64>) -> AppResult<u64> {
        Ok(ids.len() as u64)
    }
}

struct StubProductService;

#[async_trait]
impl ProductService for StubProductService {
    async fn get_product(&self, id: i64) -> AppResult<Product> {
        Ok(Product {
            id,
            name: "Smartphone X12".to_string(),
            model: "X12-256GB".to_string(),
            release_date: Utc::now().date_naive(),
        })
    }

    async fn list_products(&self, _filter: ProductFilter) -> AppResult<Vec<Product>> {
        Ok(vec![])
    }

    async fn create_product(&self, data: NewProduct) -> AppResult<Product> {
        Ok(Product {
            id: 1,
            name: data.name,
            model: data.model,
            release_date: data.release_date,
        })
    }

    async fn update_product(&self, id: i64, data: NewProduct) -> AppResult<Product> {
        Ok(Product {
            id,
            name: data.name,
            model: data.model,
            release_date: data.release_date,
        })
    }

    async fn delete_product(&self, _id: i64) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Test helpers
// =============================================================================

fn test_app(employee_active: bool) -> Router {
    let database = Arc::new(Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
    ));

    let state = AppState::new(
        Arc::new(StubAuthService),
        Arc::new(StubNodeService),
        Arc::new(StubProductService),
        Arc::new(StubEmployeeService {
            active: employee_active,
        }),
        database,
    );

    create_router(state)
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn node_payload() -> Value {
    json!({
        "name": "Voltline Components",
        "email": "sales@voltline.example",
        "country": "Germany",
        "city": "Berlin",
        "street": "Hauptstrasse",
        "house_number": "17b"
    })
}

// =============================================================================
// Access control
// =============================================================================

#[tokio::test]
async fn root_is_public() {
    let response = test_app(true)
        .oneshot(get_request("/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let response = test_app(true)
        .oneshot(get_request("/network-nodes", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let response = test_app(true)
        .oneshot(get_request("/network-nodes", Some("garbage")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inactive_employee_is_forbidden() {
    let response = test_app(false)
        .oneshot(get_request("/network-nodes", Some("employee-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn active_employee_lists_nodes() {
    let response = test_app(true)
        .oneshot(get_request("/network-nodes", Some("employee-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

// =============================================================================
// Node mutation contract
// =============================================================================

#[tokio::test]
async fn create_node_returns_derived_tier() {
    let mut payload = node_payload();
    payload["supplier"] = json!(1);

    let response = test_app(true)
        .oneshot(json_request(
            "POST",
            "/network-nodes",
            "employee-token",
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["tier"], "retail");
}

#[tokio::test]
async fn create_node_with_invalid_email_fails_validation() {
    let mut payload = node_payload();
    payload["email"] = json!("not-an-email");

    let response = test_app(true)
        .oneshot(json_request(
            "POST",
            "/network-nodes",
            "employee-token",
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_with_debt_key_is_blocked() {
    let mut payload = node_payload();
    payload["debt"] = json!("0");

    let response = test_app(true)
        .oneshot(json_request(
            "PUT",
            "/network-nodes/5",
            "employee-token",
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN_FIELD");
}

#[tokio::test]
async fn update_with_null_debt_is_still_blocked() {
    let mut payload = node_payload();
    payload["debt"] = json!(null);

    let response = test_app(true)
        .oneshot(json_request(
            "PUT",
            "/network-nodes/5",
            "employee-token",
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN_FIELD");
}

#[tokio::test]
async fn update_without_debt_key_succeeds() {
    let response = test_app(true)
        .oneshot(json_request(
            "PUT",
            "/network-nodes/5",
            "employee-token",
            node_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Voltline Components");
}

// =============================================================================
// Privileged operations
// =============================================================================

#[tokio::test]
async fn clear_debt_requires_admin() {
    let response = test_app(true)
        .oneshot(json_request(
            "POST",
            "/network-nodes/clear-debt",
            "employee-token",
            json!({"ids": [1, 2]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_clears_debt_and_gets_the_count() {
    let response = test_app(true)
        .oneshot(json_request(
            "POST",
            "/network-nodes/clear-debt",
            "admin-token",
            json!({"ids": [1, 2]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["cleared"], 2);
}

#[tokio::test]
async fn employee_administration_requires_admin() {
    let app = test_app(true);

    let response = app
        .clone()
        .oneshot(get_request("/employees", Some("employee-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get_request("/employees", Some("admin-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
