//! Supply-hierarchy derivation and validation.
//!
//! Tier is a pure function of the immediate supplier's current tier,
//! recomputed on every save. Validation runs on a point-in-time snapshot
//! of the supplier chain; no locks are held across the chain, so a
//! dependent of a re-tiered supplier keeps its old tier until it is
//! itself saved again.

use crate::domain::Tier;
use crate::errors::{AppError, AppResult};

/// Point-in-time snapshot of a proposed supplier and its own supplier
/// reference, read from storage at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplierLink {
    pub id: i64,
    pub tier: Tier,
    pub supplier_id: Option<i64>,
}

/// Validate a proposed supplier assignment and derive the node's tier.
///
/// `candidate_id` is `None` for nodes that do not exist yet (creation);
/// a node without an id cannot participate in a cycle.
///
/// Rejections, checked before derivation:
/// - the supplier is the candidate itself (`SelfSupply`);
/// - the supplier's own supplier is the candidate (`CyclicSupply`).
///
/// Cycles of three or more hops are not detected here; the check is a
/// bounded local one with O(1) cost per write.
pub fn derive_and_validate(
    candidate_id: Option<i64>,
    supplier: Option<&SupplierLink>,
) -> AppResult<Tier> {
    let Some(supplier) = supplier else {
        return Ok(Tier::Factory);
    };

    if let Some(candidate_id) = candidate_id {
        if supplier.id == candidate_id {
            return Err(AppError::SelfSupply);
        }
        if supplier.supplier_id == Some(candidate_id) {
            return Err(AppError::CyclicSupply);
        }
    }

    Ok(derive_tier(Some(supplier.tier)))
}

/// Derivation rule: no supplier makes a factory, buying from a factory
/// makes a retail chain, buying from anything else makes an entrepreneur.
pub fn derive_tier(supplier_tier: Option<Tier>) -> Tier {
    match supplier_tier {
        None => Tier::Factory,
        Some(Tier::Factory) => Tier::Retail,
        Some(Tier::Retail) | Some(Tier::Entrepreneur) => Tier::Entrepreneur,
    }
}
