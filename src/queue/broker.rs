// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// 消息代理错误类型
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Broker error: {0}")]
    Other(String),
}

/// 从队列中取出、尚未确认的一条消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// 来源队列
    pub queue: String,
    /// 原始消息体
    pub payload: Vec<u8>,
}

/// 消息代理接口
///
/// 语义为至少一次投递：`receive` 取出的消息在 `ack` 之前处于处理中状态，
/// 进程崩溃后可由 `requeue_unacked` 放回原队列。
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// 非阻塞地取出一条消息，队列为空时返回 `None`
    async fn receive(&self, queue: &str) -> Result<Option<Delivery>, BrokerError>;

    /// 确认消息已处理完毕
    async fn ack(&self, delivery: &Delivery) -> Result<(), BrokerError>;

    /// 向队列发布一条消息
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError>;

    /// 把上次运行遗留的未确认消息放回队列
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 放回的消息数量
    async fn requeue_unacked(&self, queue: &str) -> Result<usize, BrokerError>;
}

#[async_trait]
impl<T: MessageBroker + ?Sized> MessageBroker for Arc<T> {
    async fn receive(&self, queue: &str) -> Result<Option<Delivery>, BrokerError> {
        (**self).receive(queue).await
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), BrokerError> {
        (**self).ack(delivery).await
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError> {
        (**self).publish(queue, payload).await
    }

    async fn requeue_unacked(&self, queue: &str) -> Result<usize, BrokerError> {
        (**self).requeue_unacked(queue).await
    }
}
