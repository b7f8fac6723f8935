// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::queue::broker::MessageBroker;
use crate::utils::errors::WorkerError;
use crate::workers::dispatcher::JobDispatcher;
use crate::workers::worker::Worker;

/// 作业消费者
///
/// 从入站队列逐条取出消息交给分发器处理，处理完后确认。
/// 停机信号只在两条消息之间生效，正在处理的作业会被完成。
pub struct JobConsumer {
    name: String,
    broker: Arc<dyn MessageBroker>,
    dispatcher: Arc<JobDispatcher>,
    inbound_queue: String,
    poll_interval: Duration,
}

impl JobConsumer {
    /// 创建新的作业消费者
    ///
    /// # 参数
    ///
    /// * `name` - 工作器名称，用于日志
    /// * `broker` - 消息代理
    /// * `dispatcher` - 作业分发器
    /// * `inbound_queue` - 入站队列名
    /// * `poll_interval` - 队列为空时的等待间隔
    pub fn new(
        name: impl Into<String>,
        broker: Arc<dyn MessageBroker>,
        dispatcher: Arc<JobDispatcher>,
        inbound_queue: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            broker,
            dispatcher,
            inbound_queue: inbound_queue.into(),
            poll_interval,
        }
    }

    /// 处理一条消息
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 处理并确认了一条消息
    /// * `Ok(false)` - 队列为空
    /// * `Err(WorkerError)` - 消息代理出错
    pub async fn process_next(&self) -> Result<bool, WorkerError> {
        let Some(delivery) = self.broker.receive(&self.inbound_queue).await? else {
            return Ok(false);
        };

        let report = self.dispatcher.on_message(&delivery.payload).await;
        debug!(worker = %self.name, ?report, "Message dispatched");

        self.broker.ack(&delivery).await?;
        Ok(true)
    }
}

#[async_trait]
impl Worker for JobConsumer {
    async fn run(&self, shutdown: CancellationToken) -> Result<(), WorkerError> {
        info!(worker = %self.name, queue = %self.inbound_queue, "Job consumer started");

        while !shutdown.is_cancelled() {
            let idle = match self.process_next().await {
                Ok(processed) => !processed,
                Err(e) => {
                    error!(worker = %self.name, "Error processing job: {}", e);
                    true
                }
            };

            if idle {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = sleep(self.poll_interval) => {}
                }
            }
        }

        info!(worker = %self.name, "Job consumer stopped");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
