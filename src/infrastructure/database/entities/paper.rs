// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub link: String,
    pub researcher_id: String,
    pub researcher_name: String,
    pub scholar_id: String,
    pub admin_id: String,
    pub title: String,
    pub authors: Json,
    pub publication_date: String,
    pub journal: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    pub publisher: String,
    pub description: String,
    pub total_citations: i64,
    pub publication_link: Option<String>,
    pub pdf_link: Option<String>,
    pub tags: Json,
    pub last_fetch: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
