// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::researcher_metrics::ResearcherMetrics;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 研究者指标仓库特质
#[async_trait]
pub trait ResearcherRepository: Send + Sync {
    /// 写入或覆盖研究者指标
    async fn upsert_metrics(&self, metrics: &ResearcherMetrics) -> Result<(), RepositoryError>;
    /// 查找研究者指标
    async fn find_metrics(
        &self,
        researcher_id: &str,
    ) -> Result<Option<ResearcherMetrics>, RepositoryError>;
}
