//! Network node database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Tier;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "network_nodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    /// Nullable self-referential FK; NULL marks the top of a chain
    pub supplier_id: Option<i64>,
    /// Derived tier, denormalized for query efficiency
    pub tier: i16,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub debt: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Supplier,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Supplier => Entity::belongs_to(Entity)
                .from(Column::SupplierId)
                .to(Column::Id)
                .into(),
        }
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::node_product::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::node_product::Relation::Node.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Tier as the domain enum
    pub fn tier(&self) -> Tier {
        Tier::from(self.tier)
    }
}
