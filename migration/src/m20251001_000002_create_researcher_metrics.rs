// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResearcherMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResearcherMetrics::ResearcherId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResearcherMetrics::TotalPapers)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResearcherMetrics::TotalCitations)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResearcherMetrics::HIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResearcherMetrics::I10Index)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResearcherMetrics::LastFetch)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResearcherMetrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ResearcherMetrics {
    Table,
    ResearcherId,
    TotalPapers,
    TotalCitations,
    HIndex,
    #[sea_orm(iden = "i10_index")]
    I10Index,
    LastFetch,
}
