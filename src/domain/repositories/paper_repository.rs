// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::paper::PaperDocument;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 论文仓库特质
///
/// 定义论文文档数据访问接口
#[async_trait]
pub trait PaperRepository: Send + Sync {
    /// 按自然键 (link, researcher_id, admin_id) 写入或覆盖论文
    async fn upsert(&self, paper: &PaperDocument) -> Result<(), RepositoryError>;
    /// 查找研究者的全部论文
    async fn find_by_researcher(
        &self,
        researcher_id: &str,
    ) -> Result<Vec<PaperDocument>, RepositoryError>;
}
