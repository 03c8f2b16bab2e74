//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{employee_handler, node_handler, product_handler};
use crate::domain::{EmployeeResponse, NodeResponse, ProductResponse, Tier};

/// OpenAPI documentation for the Electronics Trade Network API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Electronics Trade Network API",
        version = "0.1.0",
        description = "Hierarchical supply network of electronics distributors with derived tiers and controlled debt mutation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Network node endpoints
        node_handler::create_node,
        node_handler::list_nodes,
        node_handler::get_node,
        node_handler::update_node,
        node_handler::delete_node,
        node_handler::by_country,
        node_handler::high_debt,
        node_handler::clear_debt,
        // Product endpoints
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::activate_employee,
        employee_handler::deactivate_employee,
    ),
    components(
        schemas(
            // Domain types
            Tier,
            NodeResponse,
            ProductResponse,
            EmployeeResponse,
            // Node handler types
            node_handler::CreateNodeRequest,
            node_handler::UpdateNodeRequest,
            node_handler::ClearDebtRequest,
            node_handler::ClearDebtResponse,
            // Product handler types
            product_handler::ProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Network nodes", description = "Supply-chain node management"),
        (name = "Products", description = "Product catalogue"),
        (name = "Employees", description = "Employee access administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Bearer token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
