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
                    .table(Papers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Papers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Papers::Link).string().not_null())
                    .col(ColumnDef::new(Papers::ResearcherId).string().not_null())
                    .col(ColumnDef::new(Papers::ResearcherName).string().not_null())
                    .col(ColumnDef::new(Papers::ScholarId).string().not_null())
                    .col(ColumnDef::new(Papers::AdminId).string().not_null())
                    .col(ColumnDef::new(Papers::Title).text().not_null())
                    .col(ColumnDef::new(Papers::Authors).json().not_null())
                    .col(ColumnDef::new(Papers::PublicationDate).string().not_null())
                    .col(ColumnDef::new(Papers::Journal).text().not_null())
                    .col(ColumnDef::new(Papers::Volume).string().not_null())
                    .col(ColumnDef::new(Papers::Issue).string().not_null())
                    .col(ColumnDef::new(Papers::Pages).string().not_null())
                    .col(ColumnDef::new(Papers::Publisher).text().not_null())
                    .col(ColumnDef::new(Papers::Description).text().not_null())
                    .col(
                        ColumnDef::new(Papers::TotalCitations)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Papers::PublicationLink).text())
                    .col(ColumnDef::new(Papers::PdfLink).text())
                    .col(ColumnDef::new(Papers::Tags).json().not_null())
                    .col(
                        ColumnDef::new(Papers::LastFetch)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一管理员下同一研究者的同一篇论文只保留一行
        manager
            .create_index(
                Index::create()
                    .name("idx_papers_natural_key")
                    .table(Papers::Table)
                    .col(Papers::Link)
                    .col(Papers::ResearcherId)
                    .col(Papers::AdminId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_papers_researcher_id")
                    .table(Papers::Table)
                    .col(Papers::ResearcherId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Papers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Papers {
    Table,
    Id,
    Link,
    ResearcherId,
    ResearcherName,
    ScholarId,
    AdminId,
    Title,
    Authors,
    PublicationDate,
    Journal,
    Volume,
    Issue,
    Pages,
    Publisher,
    Description,
    TotalCitations,
    PublicationLink,
    PdfLink,
    Tags,
    LastFetch,
}
