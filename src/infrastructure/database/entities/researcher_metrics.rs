// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "researcher_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub researcher_id: String,
    pub total_papers: i64,
    pub total_citations: i64,
    pub h_index: i32,
    pub i10_index: i32,
    pub last_fetch: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
