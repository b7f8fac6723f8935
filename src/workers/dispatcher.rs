// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tracing::{error, info, instrument, warn};

use crate::domain::models::harvest::HarvestResult;
use crate::domain::models::job::Job;
use crate::domain::models::paper::PaperDocument;
use crate::domain::models::researcher_metrics::ResearcherMetrics;
use crate::domain::repositories::paper_repository::PaperRepository;
use crate::domain::repositories::researcher_repository::ResearcherRepository;
use crate::domain::services::harvest_service::HarvestService;
use crate::queue::broker::MessageBroker;

/// 单个作业的处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    /// 成功写入的记录数
    pub persisted: usize,
    /// 写入失败的记录数
    pub persist_failures: usize,
    /// 采集阶段被吞掉的详情页失败数
    pub suppressed_failures: usize,
    /// 采集是否因时间预算耗尽而提前结束
    pub partial: bool,
    /// 研究者指标是否已更新
    pub metrics_updated: bool,
    /// 完成通知是否已发布
    pub notified: bool,
}

/// 一条入站消息的处理结果
///
/// 三种结果下消息都应被确认：作业从不自动重试
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReport {
    /// 消息无法解码，已丢弃
    Dropped,
    /// 列表页失败，作业中止，未写入也未通知
    Aborted,
    /// 采集完成（可能为部分结果）
    Completed(JobReport),
}

/// 作业分发器
///
/// 把一条入站消息变成一次采集、一批记录写入和一条完成通知
pub struct JobDispatcher {
    harvester: Arc<HarvestService>,
    papers: Arc<dyn PaperRepository>,
    researchers: Arc<dyn ResearcherRepository>,
    broker: Arc<dyn MessageBroker>,
    outbound_queue: String,
    time_budget: Duration,
}

impl JobDispatcher {
    /// 创建新的作业分发器
    ///
    /// # 参数
    ///
    /// * `harvester` - 采集服务
    /// * `papers` - 论文仓库
    /// * `researchers` - 研究者指标仓库
    /// * `broker` - 用于发布完成通知的消息代理
    /// * `outbound_queue` - 完成通知的目标队列
    /// * `time_budget` - 每次采集的时间预算
    pub fn new(
        harvester: Arc<HarvestService>,
        papers: Arc<dyn PaperRepository>,
        researchers: Arc<dyn ResearcherRepository>,
        broker: Arc<dyn MessageBroker>,
        outbound_queue: impl Into<String>,
        time_budget: Duration,
    ) -> Self {
        Self {
            harvester,
            papers,
            researchers,
            broker,
            outbound_queue: outbound_queue.into(),
            time_budget,
        }
    }

    /// 处理一条入站消息
    ///
    /// 解码失败时记录日志并丢弃；不会向调用方返回错误
    pub async fn on_message(&self, raw: &[u8]) -> DispatchReport {
        let job = match Job::decode(raw) {
            Ok(job) => job,
            Err(e) => {
                warn!(error = %e, "Dropping undecodable job message");
                counter!("jobs_dropped_total").increment(1);
                return DispatchReport::Dropped;
            }
        };

        self.dispatch(&job).await
    }

    #[instrument(
        skip_all,
        fields(
            researcher_id = %job.researcher.researcher_id,
            admin_id = %job.admin_id,
            scholar_id = %job.root_id(),
        )
    )]
    async fn dispatch(&self, job: &Job) -> DispatchReport {
        info!("Starting harvest");

        let result = match self.harvester.run(job.root_id(), true, self.time_budget).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Harvest aborted");
                counter!("jobs_dropped_total").increment(1);
                return DispatchReport::Aborted;
            }
        };

        let mut report = JobReport {
            suppressed_failures: result.suppressed_failures,
            partial: result.partial,
            ..Default::default()
        };

        report.metrics_updated = self.update_metrics(job, &result).await;
        self.persist(job, result, &mut report).await;
        report.notified = self.notify(job).await;

        counter!("jobs_processed_total").increment(1);
        info!(
            persisted = report.persisted,
            persist_failures = report.persist_failures,
            suppressed_failures = report.suppressed_failures,
            partial = report.partial,
            "Job finished"
        );

        DispatchReport::Completed(report)
    }

    // 每条记录独立写入，单条失败不影响其余记录
    async fn persist(&self, job: &Job, result: HarvestResult, report: &mut JobReport) {
        let fetched_at = Utc::now();
        for publication in result.publications {
            let document = PaperDocument::new(job, publication, fetched_at);
            match self.papers.upsert(&document).await {
                Ok(()) => report.persisted += 1,
                Err(e) => {
                    report.persist_failures += 1;
                    error!(link = %document.publication.link, error = %e, "Failed to persist paper");
                }
            }
        }
    }

    // 部分结果会低估指标，不覆盖已有值
    async fn update_metrics(&self, job: &Job, result: &HarvestResult) -> bool {
        if result.partial {
            warn!("Skipping researcher metrics for partial harvest");
            return false;
        }

        let metrics = ResearcherMetrics::from_publications(
            job.researcher.researcher_id.as_str(),
            &result.publications,
            Utc::now(),
        );
        match self.researchers.upsert_metrics(&metrics).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to update researcher metrics");
                false
            }
        }
    }

    async fn notify(&self, job: &Job) -> bool {
        let payload = match job.completion_notice().encode() {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to encode completion notice");
                return false;
            }
        };

        match self.broker.publish(&self.outbound_queue, &payload).await {
            Ok(()) => true,
            Err(e) => {
                error!(queue = %self.outbound_queue, error = %e, "Failed to publish completion notice");
                false
            }
        }
    }
}
