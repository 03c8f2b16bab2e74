//! Network node handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{format_validation_errors, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{debt, CreateNode, NodeFilter, NodeResponse, UpdateNode};
use crate::errors::{AppError, AppResult};
use crate::types::{NoContent, Paginated, PaginationParams};

/// Node creation request.
///
/// Tier is intentionally absent: it is derived from the supplier chain
/// and never accepted from clients.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNodeRequest {
    /// Unique node name
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(example = "Voltline Components")]
    pub name: String,
    /// Contact email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "sales@voltline.example")]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Country must be 1 to 100 characters"))]
    #[schema(example = "Germany")]
    pub country: String,
    #[validate(length(min = 1, max = 100, message = "City must be 1 to 100 characters"))]
    #[schema(example = "Berlin")]
    pub city: String,
    #[validate(length(min = 1, max = 255, message = "Street must be 1 to 255 characters"))]
    #[schema(example = "Hauptstrasse")]
    pub street: String,
    #[validate(length(min = 1, max = 20, message = "House number must be 1 to 20 characters"))]
    #[schema(example = "17b")]
    pub house_number: String,
    /// Supplier node id; absent for a top-of-chain factory
    pub supplier: Option<i64>,
    /// Initial debt towards the supplier; defaults to zero
    #[schema(value_type = Option<String>, example = "1500.00")]
    pub debt: Option<Decimal>,
    /// Product ids to associate
    #[serde(default)]
    pub products: Vec<i64>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// Node update request.
///
/// Neither tier nor debt appear here; the raw payload is additionally
/// screened for a `debt` key before this type is deserialized.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNodeRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Country must be 1 to 100 characters"))]
    pub country: String,
    #[validate(length(min = 1, max = 100, message = "City must be 1 to 100 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 255, message = "Street must be 1 to 255 characters"))]
    pub street: String,
    #[validate(length(min = 1, max = 20, message = "House number must be 1 to 20 characters"))]
    pub house_number: String,
    /// Supplier node id; null detaches the node to top-of-chain
    pub supplier: Option<i64>,
    /// Product ids to associate; absent leaves associations unchanged
    pub products: Option<Vec<i64>>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl From<CreateNodeRequest> for CreateNode {
    fn from(payload: CreateNodeRequest) -> Self {
        CreateNode {
            name: payload.name,
            email: payload.email,
            country: payload.country,
            city: payload.city,
            street: payload.street,
            house_number: payload.house_number,
            supplier_id: payload.supplier,
            debt: payload.debt,
            is_active: payload.is_active,
            product_ids: payload.products,
        }
    }
}

impl From<UpdateNodeRequest> for UpdateNode {
    fn from(payload: UpdateNodeRequest) -> Self {
        UpdateNode {
            name: payload.name,
            email: payload.email,
            country: payload.country,
            city: payload.city,
            street: payload.street,
            house_number: payload.house_number,
            supplier_id: payload.supplier,
            is_active: payload.is_active,
            product_ids: payload.products,
        }
    }
}

/// Country convenience filter parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CountryQuery {
    /// Country name, required
    pub country: Option<String>,
}

/// Bulk clear-debt request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClearDebtRequest {
    /// Target node ids
    pub ids: Vec<i64>,
}

/// Bulk clear-debt result
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearDebtResponse {
    /// Number of nodes whose debt was reset to zero
    pub cleared: u64,
}

/// Create node routes
pub fn node_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nodes).post(create_node))
        .route("/by-country", get(by_country))
        .route("/high-debt", get(high_debt))
        .route("/clear-debt", post(clear_debt))
        .route("/:id", get(get_node).put(update_node).delete(delete_node))
}

/// Create a network node
#[utoipa::path(
    post,
    path = "/network-nodes",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    request_body = CreateNodeRequest,
    responses(
        (status = 201, description = "Node created with derived tier", body = NodeResponse),
        (status = 400, description = "Validation, range or supply-chain error"),
        (status = 409, description = "Node name already exists")
    )
)]
pub async fn create_node(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNodeRequest>,
) -> AppResult<(StatusCode, Json<NodeResponse>)> {
    let node = state.node_service.create_node(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(NodeResponse::from(node))))
}

/// List network nodes
#[utoipa::path(
    get,
    path = "/network-nodes",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    params(NodeFilter, PaginationParams),
    responses(
        (status = 200, description = "Filtered page of nodes"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_nodes(
    State(state): State<AppState>,
    Query(filter): Query<NodeFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<NodeResponse>>> {
    let (nodes, total) = state
        .node_service
        .list_nodes(filter, page.clone())
        .await?;

    Ok(Json(Paginated::new(
        nodes.into_iter().map(NodeResponse::from).collect(),
        page.page,
        page.limit(),
        total,
    )))
}

/// Get node by ID
#[utoipa::path(
    get,
    path = "/network-nodes/{id}",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Node ID")),
    responses(
        (status = 200, description = "Node detail", body = NodeResponse),
        (status = 404, description = "Node not found")
    )
)]
pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<NodeResponse>> {
    let node = state.node_service.get_node(id).await?;
    Ok(Json(NodeResponse::from(node)))
}

/// Update node
///
/// The raw body is screened first: any `debt` key blocks the entire
/// update, whatever its value.
#[utoipa::path(
    put,
    path = "/network-nodes/{id}",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Node ID")),
    request_body = UpdateNodeRequest,
    responses(
        (status = 200, description = "Node updated with re-derived tier", body = NodeResponse),
        (status = 400, description = "Validation, forbidden-field or supply-chain error"),
        (status = 404, description = "Node not found"),
        (status = 409, description = "Node name already exists")
    )
)]
pub async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<NodeResponse>> {
    debt::deny_debt_mutation(&payload)?;

    let payload: UpdateNodeRequest =
        serde_json::from_value(payload).map_err(|e| AppError::validation(e.to_string()))?;
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let node = state.node_service.update_node(id, payload.into()).await?;
    Ok(Json(NodeResponse::from(node)))
}

/// Delete node
#[utoipa::path(
    delete,
    path = "/network-nodes/{id}",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Node ID")),
    responses(
        (status = 204, description = "Node deleted; dependents are detached"),
        (status = 404, description = "Node not found")
    )
)]
pub async fn delete_node(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<NoContent> {
    state.node_service.delete_node(id).await?;
    Ok(NoContent)
}

/// Nodes in a given country
#[utoipa::path(
    get,
    path = "/network-nodes/by-country",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    params(CountryQuery),
    responses(
        (status = 200, description = "Nodes in the given country", body = Vec<NodeResponse>),
        (status = 400, description = "Missing country parameter")
    )
)]
pub async fn by_country(
    State(state): State<AppState>,
    Query(params): Query<CountryQuery>,
) -> AppResult<Json<Vec<NodeResponse>>> {
    let country = params
        .country
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("country parameter is required".to_string()))?;

    let filter = NodeFilter {
        country: Some(country),
        ..Default::default()
    };

    let (nodes, _) = state
        .node_service
        .list_nodes(filter, PaginationParams::default())
        .await?;

    Ok(Json(nodes.into_iter().map(NodeResponse::from).collect()))
}

/// Nodes with outstanding debt
#[utoipa::path(
    get,
    path = "/network-nodes/high-debt",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Nodes with debt above zero", body = Vec<NodeResponse>)
    )
)]
pub async fn high_debt(State(state): State<AppState>) -> AppResult<Json<Vec<NodeResponse>>> {
    // Debt is stored at two decimal places, so "> 0" is ">= 0.01".
    let filter = NodeFilter {
        min_debt: Some(Decimal::new(1, 2)),
        ..Default::default()
    };

    let (nodes, _) = state
        .node_service
        .list_nodes(filter, PaginationParams::default())
        .await?;

    Ok(Json(nodes.into_iter().map(NodeResponse::from).collect()))
}

/// Clear debt for a set of nodes (admin only)
#[utoipa::path(
    post,
    path = "/network-nodes/clear-debt",
    tag = "Network nodes",
    security(("bearer_auth" = [])),
    request_body = ClearDebtRequest,
    responses(
        (status = 200, description = "Debt cleared", body = ClearDebtResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn clear_debt(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<ClearDebtRequest>,
) -> AppResult<Json<ClearDebtResponse>> {
    require_admin(&current_user)?;

    let cleared = state.node_service.clear_debt(payload.ids).await?;
    Ok(Json(ClearDebtResponse { cleared }))
}
