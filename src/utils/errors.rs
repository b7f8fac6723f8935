// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("数据序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("无效参数: {0}")]
    InvalidParameter(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("消息队列错误: {0}")]
    BrokerError(#[from] crate::queue::broker::BrokerError),

    #[error("内部错误: {0}")]
    InternalError(String),
}
