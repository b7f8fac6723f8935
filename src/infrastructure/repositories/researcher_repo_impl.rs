// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::researcher_metrics::ResearcherMetrics;
use crate::domain::repositories::researcher_repository::ResearcherRepository;
use crate::infrastructure::database::entities::researcher_metrics;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 研究者指标仓库实现
pub struct ResearcherRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ResearcherRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResearcherRepository for ResearcherRepositoryImpl {
    async fn upsert_metrics(&self, metrics: &ResearcherMetrics) -> Result<(), RepositoryError> {
        let active_model = researcher_metrics::ActiveModel {
            researcher_id: Set(metrics.researcher_id.clone()),
            total_papers: Set(metrics.total_papers as i64),
            total_citations: Set(i64::try_from(metrics.total_citations).unwrap_or(i64::MAX)),
            h_index: Set(metrics.h_index as i32),
            i10_index: Set(metrics.i10_index as i32),
            last_fetch: Set(metrics.last_fetch),
        };

        researcher_metrics::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(researcher_metrics::Column::ResearcherId)
                    .update_columns([
                        researcher_metrics::Column::TotalPapers,
                        researcher_metrics::Column::TotalCitations,
                        researcher_metrics::Column::HIndex,
                        researcher_metrics::Column::I10Index,
                        researcher_metrics::Column::LastFetch,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn find_metrics(
        &self,
        researcher_id: &str,
    ) -> Result<Option<ResearcherMetrics>, RepositoryError> {
        let model = researcher_metrics::Entity::find_by_id(researcher_id.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| ResearcherMetrics {
            researcher_id: m.researcher_id,
            total_papers: m.total_papers.max(0) as u64,
            total_citations: m.total_citations.max(0) as u64,
            h_index: m.h_index.max(0) as u32,
            i10_index: m.i10_index.max(0) as u32,
            last_fetch: m.last_fetch,
        }))
    }
}
