//! Migration: Index the node columns used by list filters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_network_nodes_supplier_id")
                    .table(NetworkNodes::Table)
                    .col(NetworkNodes::SupplierId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_network_nodes_country")
                    .table(NetworkNodes::Table)
                    .col(NetworkNodes::Country)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_network_nodes_city")
                    .table(NetworkNodes::Table)
                    .col(NetworkNodes::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_network_nodes_city")
                    .table(NetworkNodes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_network_nodes_country")
                    .table(NetworkNodes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_network_nodes_supplier_id")
                    .table(NetworkNodes::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum NetworkNodes {
    Table,
    SupplierId,
    Country,
    City,
}
