//! Node service unit tests.
//!
//! Exercises the full pre-persistence sequence with a mocked
//! repository: uniqueness, debt bounds, supplier resolution and tier
//! derivation. Expectations on `create`/`update` double as assertions
//! that validation failures never reach storage.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use electronet::domain::{debt, CreateNode, Node, SupplierLink, Tier, UpdateNode};
use electronet::errors::AppError;
use electronet::infra::MockNodeRepository;
use electronet::services::{NodeManager, NodeService};

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

fn create_input(name: &str, supplier_id: Option<i64>) -> CreateNode {
    CreateNode {
        name: name.to_string(),
        email: "contact@example.com".to_string(),
        country: "Germany".to_string(),
        city: "Berlin".to_string(),
        street: "Hauptstrasse".to_string(),
        house_number: "1".to_string(),
        supplier_id,
        debt: None,
        is_active: true,
        product_ids: vec![],
    }
}

fn update_input(name: &str, supplier_id: Option<i64>) -> UpdateNode {
    UpdateNode {
        name: name.to_string(),
        email: "contact@example.com".to_string(),
        country: "Germany".to_string(),
        city: "Berlin".to_string(),
        street: "Hauptstrasse".to_string(),
        house_number: "1".to_string(),
        supplier_id,
        is_active: true,
        product_ids: None,
    }
}

#[tokio::test]
async fn create_without_supplier_derives_factory() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|data| data.tier == Tier::Factory && data.debt == Decimal::ZERO)
        .returning(|_| Ok(sample_node(1, Tier::Factory)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service.create_node(create_input("factory", None)).await.unwrap();

    assert_eq!(node.tier, Tier::Factory);
}

#[tokio::test]
async fn create_with_factory_supplier_derives_retail() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|id| {
        Ok(Some(SupplierLink {
            id,
            tier: Tier::Factory,
            supplier_id: None,
        }))
    });
    repo.expect_create()
        .withf(|data| data.tier == Tier::Retail)
        .returning(|_| Ok(sample_node(2, Tier::Retail)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service
        .create_node(create_input("retail", Some(1)))
        .await
        .unwrap();

    assert_eq!(node.tier, Tier::Retail);
}

#[tokio::test]
async fn create_with_retail_supplier_derives_entrepreneur() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|id| {
        Ok(Some(SupplierLink {
            id,
            tier: Tier::Retail,
            supplier_id: Some(1),
        }))
    });
    repo.expect_create()
        .withf(|data| data.tier == Tier::Entrepreneur)
        .returning(|_| Ok(sample_node(3, Tier::Entrepreneur)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service
        .create_node(create_input("reseller", Some(2)))
        .await
        .unwrap();

    assert_eq!(node.tier, Tier::Entrepreneur);
}

#[tokio::test]
async fn create_with_unknown_supplier_fails_validation() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|_| Ok(None));

    let service = NodeManager::new(Arc::new(repo));
    let err = service
        .create_node(create_input("orphan", Some(99)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn create_with_duplicate_name_conflicts() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(true));

    let service = NodeManager::new(Arc::new(repo));
    let err = service
        .create_node(create_input("taken", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn create_with_negative_debt_is_out_of_range() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));

    let service = NodeManager::new(Arc::new(repo));
    let mut input = create_input("debtor", None);
    input.debt = Some(Decimal::new(-100, 2));

    let err = service.create_node(input).await.unwrap_err();
    assert!(matches!(err, AppError::Range(_)));
}

#[tokio::test]
async fn create_accepts_debt_boundaries() {
    for boundary in [Decimal::ZERO, debt::debt_ceiling()] {
        let mut repo = MockNodeRepository::new();
        repo.expect_name_taken().returning(|_, _| Ok(false));
        repo.expect_create()
            .withf(move |data| data.debt == boundary)
            .returning(|_| Ok(sample_node(1, Tier::Factory)));

        let service = NodeManager::new(Arc::new(repo));
        let mut input = create_input("boundary", None);
        input.debt = Some(boundary);

        assert!(service.create_node(input).await.is_ok());
    }
}

#[tokio::test]
async fn create_with_unknown_product_fails_validation() {
    let mut repo = MockNodeRepository::new();
    repo.expect_name_taken().returning(|_, _| Ok(false));
    // Two ids referenced, only one exists
    repo.expect_count_products().returning(|_| Ok(1));

    let service = NodeManager::new(Arc::new(repo));
    let mut input = create_input("shop", None);
    input.product_ids = vec![10, 11];

    let err = service.create_node(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn update_to_self_supply_is_rejected() {
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(sample_node(id, Tier::Factory))));
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|id| {
        Ok(Some(SupplierLink {
            id,
            tier: Tier::Factory,
            supplier_id: None,
        }))
    });

    let service = NodeManager::new(Arc::new(repo));
    let err = service
        .update_node(1, update_input("node-1", Some(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SelfSupply));
}

#[tokio::test]
async fn update_closing_two_hop_cycle_is_rejected() {
    // Node 2 currently buys from node 1; pointing node 1 at node 2
    // would close the loop.
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(sample_node(id, Tier::Factory))));
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|_| {
        Ok(Some(SupplierLink {
            id: 2,
            tier: Tier::Retail,
            supplier_id: Some(1),
        }))
    });

    let service = NodeManager::new(Arc::new(repo));
    let err = service
        .update_node(1, update_input("node-1", Some(2)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::CyclicSupply));
}

#[tokio::test]
async fn update_three_hop_cycle_passes_the_bounded_check() {
    // Chain 1 <- 2 <- 3. Assigning node 3 as node 1's supplier closes a
    // three-hop loop; the bounded check only inspects node 3's direct
    // supplier (node 2), so the write goes through. Known limitation.
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(sample_node(id, Tier::Factory))));
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|_| {
        Ok(Some(SupplierLink {
            id: 3,
            tier: Tier::Entrepreneur,
            supplier_id: Some(2),
        }))
    });
    repo.expect_update()
        .withf(|_, data| data.tier == Tier::Entrepreneur)
        .returning(|id, _| Ok(sample_node(id, Tier::Entrepreneur)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service
        .update_node(1, update_input("node-1", Some(3)))
        .await
        .unwrap();

    assert_eq!(node.tier, Tier::Entrepreneur);
}

#[tokio::test]
async fn update_rederives_tier_from_new_supplier() {
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(sample_node(id, Tier::Factory))));
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_supplier_link().returning(|_| {
        Ok(Some(SupplierLink {
            id: 7,
            tier: Tier::Factory,
            supplier_id: None,
        }))
    });
    repo.expect_update()
        .withf(|_, data| data.tier == Tier::Retail)
        .returning(|id, _| Ok(sample_node(id, Tier::Retail)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service
        .update_node(4, update_input("node-4", Some(7)))
        .await
        .unwrap();

    assert_eq!(node.tier, Tier::Retail);
}

#[tokio::test]
async fn update_detaching_supplier_derives_factory() {
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(sample_node(id, Tier::Retail))));
    repo.expect_name_taken().returning(|_, _| Ok(false));
    repo.expect_update()
        .withf(|_, data| data.tier == Tier::Factory && data.supplier_id.is_none())
        .returning(|id, _| Ok(sample_node(id, Tier::Factory)));

    let service = NodeManager::new(Arc::new(repo));
    let node = service
        .update_node(4, update_input("node-4", None))
        .await
        .unwrap();

    assert_eq!(node.tier, Tier::Factory);
}

#[tokio::test]
async fn update_missing_node_is_not_found() {
    let mut repo = MockNodeRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = NodeManager::new(Arc::new(repo));
    let err = service
        .update_node(42, update_input("ghost", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn clear_debt_reports_affected_count() {
    let mut repo = MockNodeRepository::new();
    repo.expect_clear_debt()
        .withf(|ids| ids == [1, 2, 3].as_slice())
        .returning(|ids| Ok(ids.len() as u64));

    let service = NodeManager::new(Arc::new(repo));
    let cleared = service.clear_debt(vec![1, 2, 3]).await.unwrap();

    assert_eq!(cleared, 3);
}

#[tokio::test]
async fn clear_debt_with_no_targets_clears_nothing() {
    let mut repo = MockNodeRepository::new();
    repo.expect_clear_debt().returning(|_| Ok(0));

    let service = NodeManager::new(Arc::new(repo));
    assert_eq!(service.clear_debt(vec![]).await.unwrap(), 0);
}
