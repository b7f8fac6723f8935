// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::broker::{BrokerError, MessageBroker};
use crate::workers::dispatcher::JobDispatcher;
use crate::workers::job_consumer::JobConsumer;
use crate::workers::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 工作管理器
///
/// 启动若干作业消费者并负责优雅停机
pub struct WorkerManager {
    broker: Arc<dyn MessageBroker>,
    dispatcher: Arc<JobDispatcher>,
    inbound_queue: String,
    poll_interval: Duration,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn new(
        broker: Arc<dyn MessageBroker>,
        dispatcher: Arc<JobDispatcher>,
        inbound_queue: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            broker,
            dispatcher,
            inbound_queue: inbound_queue.into(),
            poll_interval,
            shutdown: CancellationToken::new(),
            handles: Vec::new(),
        }
    }

    /// 停机令牌，可用于从外部触发停机
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 把上次运行遗留的未确认消息放回入站队列
    ///
    /// 必须在启动消费者之前调用
    pub async fn recover_unacked(&self) -> Result<usize, BrokerError> {
        self.broker.requeue_unacked(&self.inbound_queue).await
    }

    /// 启动工作进程
    ///
    /// # 参数
    ///
    /// * `count` - 要启动的消费者数量，不同作业之间互不共享状态
    pub fn start_workers(&mut self, count: usize) {
        for i in 0..count.max(1) {
            let worker = JobConsumer::new(
                format!("job-consumer-{}", i),
                self.broker.clone(),
                self.dispatcher.clone(),
                self.inbound_queue.clone(),
                self.poll_interval,
            );

            let shutdown = self.shutdown.clone();
            let handle = tokio::spawn(async move {
                if let Err(e) = worker.run(shutdown).await {
                    error!(worker = worker.name(), "Worker exited with error: {}", e);
                }
            });
            self.handles.push(handle);
        }
        info!(count = self.handles.len(), "Workers started");
    }

    /// 触发停机并等待所有消费者完成手头的作业
    pub async fn shutdown(&mut self) {
        info!("Shutting down workers...");
        self.shutdown.cancel();

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("Worker task failed: {}", e);
            }
        }

        info!("Workers shut down successfully");
    }

    /// 等待关闭信号并关闭工作进程
    pub async fn wait_for_shutdown(&mut self) {
        tokio::select! {
            result = signal::ctrl_c() => match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(err) => error!("Unable to listen for shutdown signal: {}", err),
            },
            _ = self.shutdown.cancelled() => info!("Shutdown requested"),
        }

        self.shutdown().await;
    }
}
