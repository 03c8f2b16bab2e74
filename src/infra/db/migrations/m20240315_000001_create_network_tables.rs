//! Migration: Create network node, product and employee tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Model).string().not_null())
                    .col(ColumnDef::new(Products::ReleaseDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NetworkNodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NetworkNodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NetworkNodes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NetworkNodes::Email).string().not_null())
                    .col(ColumnDef::new(NetworkNodes::Country).string().not_null())
                    .col(ColumnDef::new(NetworkNodes::City).string().not_null())
                    .col(ColumnDef::new(NetworkNodes::Street).string().not_null())
                    .col(ColumnDef::new(NetworkNodes::HouseNumber).string().not_null())
                    .col(ColumnDef::new(NetworkNodes::SupplierId).big_integer().null())
                    .col(ColumnDef::new(NetworkNodes::Tier).small_integer().not_null())
                    .col(
                        ColumnDef::new(NetworkNodes::Debt)
                            .decimal_len(15, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(NetworkNodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NetworkNodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Deleting a supplier detaches its dependents, it
                    // never cascades down the chain.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_network_nodes_supplier")
                            .from(NetworkNodes::Table, NetworkNodes::SupplierId)
                            .to(NetworkNodes::Table, NetworkNodes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NodeProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NodeProducts::NodeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(NodeProducts::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(NodeProducts::NodeId)
                            .col(NodeProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_products_node")
                            .from(NodeProducts::Table, NodeProducts::NodeId)
                            .to(NetworkNodes::Table, NetworkNodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_products_product")
                            .from(NodeProducts::Table, NodeProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::Principal)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NodeProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NetworkNodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NetworkNodes {
    Table,
    Id,
    Name,
    Email,
    Country,
    City,
    Street,
    HouseNumber,
    SupplierId,
    Tier,
    Debt,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Model,
    ReleaseDate,
}

#[derive(Iden)]
enum NodeProducts {
    Table,
    NodeId,
    ProductId,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Principal,
    Email,
    IsActive,
    CreatedAt,
}
