// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// 入站消息解码错误
#[derive(Error, Debug)]
pub enum DecodeError {
    /// 消息不是合法的 JSON 或结构不符
    #[error("invalid job payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// 必填字段为空
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// 被采集的研究者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearcherRef {
    pub researcher_id: String,
    pub name: String,
    /// 采集的根标识
    pub scholar_id: String,
    /// 调用方附带的其他字段，原样透传
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 一个采集任务
///
/// 对应一条入站消息；生命周期为一次采集 + 一次持久化 + 一次通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub admin_id: String,
    pub researcher: ResearcherRef,
    /// 调用方附带的其他字段，原样透传
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Job {
    /// 从原始消息解码任务
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let job: Job = serde_json::from_slice(raw)?;

        if job.researcher.scholar_id.trim().is_empty() {
            return Err(DecodeError::MissingField("researcher.scholar_id"));
        }
        if job.researcher.researcher_id.trim().is_empty() {
            return Err(DecodeError::MissingField("researcher.researcher_id"));
        }

        Ok(job)
    }

    /// 采集根标识
    pub fn root_id(&self) -> &str {
        &self.researcher.scholar_id
    }

    /// 完成通知
    pub fn completion_notice(&self) -> CompletionNotice {
        CompletionNotice {
            researcher_id: self.researcher.researcher_id.clone(),
            admin_id: self.admin_id.clone(),
        }
    }
}

/// 出站完成通知，触发下游计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotice {
    pub researcher_id: String,
    pub admin_id: String,
}

impl CompletionNotice {
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
