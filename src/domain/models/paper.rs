// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::Job;
use super::publication::Publication;

/// 持久化的论文文档
///
/// 一条出版物记录加上研究者/管理员标识、空标签集合和抓取时间。
/// 自然键为 (link, researcher_id, admin_id)，重复投递时覆盖而不是新增。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperDocument {
    pub id: Uuid,
    pub researcher_id: String,
    pub researcher_name: String,
    pub scholar_id: String,
    pub admin_id: String,
    pub publication: Publication,
    pub tags: Vec<String>,
    pub last_fetch: DateTime<Utc>,
}

impl PaperDocument {
    pub fn new(job: &Job, publication: Publication, fetched_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            researcher_id: job.researcher.researcher_id.clone(),
            researcher_name: job.researcher.name.clone(),
            scholar_id: job.researcher.scholar_id.clone(),
            admin_id: job.admin_id.clone(),
            publication,
            tags: Vec::new(),
            last_fetch: fetched_at,
        }
    }
}
