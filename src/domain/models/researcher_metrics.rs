// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::publication::Publication;

/// 研究者引用指标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherMetrics {
    pub researcher_id: String,
    pub total_papers: u64,
    pub total_citations: u64,
    /// 最大的 h，使得至少 h 篇论文各被引用至少 h 次
    pub h_index: u32,
    /// 被引用至少 10 次的论文数
    pub i10_index: u32,
    pub last_fetch: DateTime<Utc>,
}

impl ResearcherMetrics {
    /// 根据本次采集的记录计算指标
    ///
    /// 同一链接只计一次，以最后一条为准，与按自然键覆盖写入的论文表一致
    pub fn from_publications(
        researcher_id: impl Into<String>,
        publications: &[Publication],
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let by_link: HashMap<&str, u64> = publications
            .iter()
            .map(|p| (p.link.as_str(), p.total_citations))
            .collect();
        let mut citations: Vec<u64> = by_link.into_values().collect();
        citations.sort_unstable_by(|a, b| b.cmp(a));

        let h_index = citations
            .iter()
            .enumerate()
            .take_while(|(rank, &c)| c > *rank as u64)
            .count() as u32;

        Self {
            researcher_id: researcher_id.into(),
            total_papers: citations.len() as u64,
            total_citations: citations.iter().sum(),
            h_index,
            i10_index: citations.iter().filter(|&&c| c >= 10).count() as u32,
            last_fetch: fetched_at,
        }
    }
}
