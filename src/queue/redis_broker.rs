// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::broker::{BrokerError, Delivery, MessageBroker};
use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};

/// 基于Redis列表的消息代理
///
/// 每个队列是一个列表：`publish` 从左侧推入，`receive` 从右侧弹出并原子地
/// 移入 `{queue}:processing`，`ack` 再从处理中列表删除。
#[derive(Clone)]
pub struct RedisBroker {
    client: redis::Client,
}

impl RedisBroker {
    /// 创建新的Redis代理实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    pub fn new(redis_url: &str) -> Result<Self, BrokerError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    fn processing_key(queue: &str) -> String {
        format!("{}:processing", queue)
    }
}

#[async_trait]
impl MessageBroker for RedisBroker {
    async fn receive(&self, queue: &str) -> Result<Option<Delivery>, BrokerError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<Vec<u8>> = con.rpoplpush(queue, Self::processing_key(queue)).await?;

        Ok(payload.map(|payload| Delivery {
            queue: queue.to_string(),
            payload,
        }))
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), BrokerError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let removed: i64 = con
            .lrem(
                Self::processing_key(&delivery.queue),
                1,
                delivery.payload.as_slice(),
            )
            .await?;
        if removed == 0 {
            debug!(queue = %delivery.queue, "Acked message was not in the processing list");
        }
        Ok(())
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.lpush::<_, _, ()>(queue, payload).await?;
        Ok(())
    }

    async fn requeue_unacked(&self, queue: &str) -> Result<usize, BrokerError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let processing = Self::processing_key(queue);
        let mut moved = 0;
        loop {
            let payload: Option<Vec<u8>> = con.rpoplpush(&processing, queue).await?;
            if payload.is_none() {
                break;
            }
            moved += 1;
        }
        if moved > 0 {
            info!(queue, moved, "Requeued unacknowledged messages");
        }
        Ok(moved)
    }
}
