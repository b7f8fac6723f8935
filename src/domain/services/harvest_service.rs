// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::settings::HarvestSettings;
use crate::domain::models::harvest::HarvestResult;
use crate::domain::models::publication::Publication;
use crate::domain::services::extraction_service::{ExtractError, ExtractionService};
use crate::domain::services::listing_parser::ListingParser;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::url_utils;

/// 采集错误类型
///
/// 只有列表页失败会中止采集；详情页失败被计数后吞掉
#[derive(Error, Debug)]
pub enum HarvestError {
    /// 列表页抓取失败
    #[error("failed to fetch listing page {url}: {source}")]
    ListingFetch {
        url: String,
        #[source]
        source: FetchError,
    },
    /// 列表页无法解析
    #[error("failed to parse listing page {url}: {source}")]
    ListingParse {
        url: String,
        #[source]
        source: ExtractError,
    },
    /// 配置中的地址无效
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 采集配置
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub listing_base_url: Url,
    pub detail_base_url: Url,
    pub language: String,
    /// 分页步长，与请求中的 pagesize 一致
    pub page_size: usize,
    pub max_concurrency: usize,
    /// 单个详情页任务的 I/O 超时，应小于总预算
    pub task_timeout: Duration,
    pub dedup_links: bool,
}

impl TryFrom<&HarvestSettings> for HarvestConfig {
    type Error = HarvestError;

    fn try_from(settings: &HarvestSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            listing_base_url: Url::parse(&settings.listing_base_url)?,
            detail_base_url: Url::parse(&settings.detail_base_url)?,
            language: settings.language.clone(),
            page_size: settings.page_size.max(1),
            max_concurrency: settings.max_concurrency.max(1),
            task_timeout: settings.task_timeout(),
            dedup_links: settings.dedup_links,
        })
    }
}

/// 详情页任务的结果，经由通道送回收集者
#[derive(Debug)]
enum TaskOutcome {
    Harvested(Publication),
    Failed {
        link: String,
        reason: String,
        transient: bool,
    },
}

/// 采集服务
///
/// 给定学者ID，逐页抓取列表页、发现详情页链接，为每个链接派发一个
/// 抓取+提取任务，并在时间预算内汇总结果。
///
/// 并发模型：
/// - 任务数量不设上限，但同时进行 I/O 的任务受信号量限制
/// - 任务只通过通道回报结果，累加状态只由收集者持有
/// - 预算耗尽时取消令牌被触发，所有未完成任务随之终止
pub struct HarvestService {
    fetcher: Arc<dyn PageFetcher>,
    extractor: ExtractionService,
    listing_parser: ListingParser,
    config: HarvestConfig,
}

impl HarvestService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: HarvestConfig) -> Self {
        Self {
            fetcher,
            extractor: ExtractionService::new(),
            listing_parser: ListingParser::new(config.detail_base_url.clone()),
            config,
        }
    }

    /// 执行一次采集
    ///
    /// # 参数
    ///
    /// * `root_id` - 学者ID
    /// * `follow_pagination` - 为 false 时只抓取第一页
    /// * `time_budget` - 总时间预算，从调用开始计时
    ///
    /// # 返回值
    ///
    /// * `Ok(HarvestResult)` - 完整或部分结果
    /// * `Err(HarvestError)` - 列表页抓取或解析失败
    #[instrument(skip(self), fields(engine = self.fetcher.name()))]
    pub async fn run(
        &self,
        root_id: &str,
        follow_pagination: bool,
        time_budget: Duration,
    ) -> Result<HarvestResult, HarvestError> {
        let deadline = Instant::now() + time_budget;
        let cancel = CancellationToken::new();
        // 任何返回路径（包括列表页错误）都会取消仍在运行的任务
        let _cancel_on_exit = cancel.clone().drop_guard();

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel::<TaskOutcome>();
        let mut tasks = JoinSet::new();
        let mut seen = HashSet::new();

        let mut result = HarvestResult::default();
        let mut offset = 0;

        // 1. 分页发现 + 派发
        loop {
            let url = url_utils::listing_url(
                &self.config.listing_base_url,
                root_id,
                &self.config.language,
                offset,
                self.config.page_size,
            );
            debug!(%url, offset, "Fetching listing page");

            let fetched = tokio::select! {
                biased;
                _ = sleep_until(deadline) => None,
                fetched = self.fetcher.fetch(url.as_str()) => Some(fetched),
            };
            let Some(fetched) = fetched else {
                warn!(offset, "Time budget elapsed during pagination");
                result.partial = true;
                break;
            };

            let content = fetched.map_err(|source| HarvestError::ListingFetch {
                url: url.to_string(),
                source,
            })?;
            let page = self
                .listing_parser
                .parse(&content)
                .map_err(|source| HarvestError::ListingParse {
                    url: url.to_string(),
                    source,
                })?;
            result.listing_pages += 1;

            if page.is_exhausted() {
                debug!(offset, "Listing exhausted");
                break;
            }

            for link in page.links {
                if self.config.dedup_links && !seen.insert(link.clone()) {
                    continue;
                }
                result.dispatched += 1;
                tasks.spawn(harvest_detail(
                    self.fetcher.clone(),
                    self.extractor,
                    semaphore.clone(),
                    cancel.clone(),
                    self.config.task_timeout,
                    link,
                    tx.clone(),
                ));
            }

            if !follow_pagination {
                break;
            }
            offset += self.config.page_size;
        }
        drop(tx);

        // 2. 汇总，与截止时间赛跑
        let mut received = 0;
        while !result.partial && received < result.dispatched {
            tokio::select! {
                biased;
                _ = sleep_until(deadline) => {
                    result.partial = true;
                }
                outcome = rx.recv() => match outcome {
                    Some(outcome) => {
                        received += 1;
                        record(&mut result, outcome);
                    }
                    None => {
                        // 所有发送端已关闭但仍有任务未回报（任务崩溃）
                        let missing = result.dispatched - received;
                        warn!(missing, "Detail tasks exited without reporting");
                        result.suppressed_failures += missing;
                        break;
                    }
                },
            }
        }

        if result.partial {
            cancel.cancel();
            // 截止前已经完成的任务结果仍在通道中，取消后一并收下
            while let Ok(outcome) = rx.try_recv() {
                record(&mut result, outcome);
            }
            tasks.abort_all();
            counter!("harvest_partial_total").increment(1);
            warn!(
                collected = result.publications.len(),
                outstanding = result.outstanding(),
                "Time budget elapsed, returning partial result"
            );
        }

        counter!("harvest_records_total").increment(result.publications.len() as u64);
        counter!("harvest_failures_total").increment(result.suppressed_failures as u64);
        info!(
            records = result.publications.len(),
            failures = result.suppressed_failures,
            pages = result.listing_pages,
            partial = result.partial,
            "Harvest finished"
        );

        Ok(result)
    }
}

fn record(result: &mut HarvestResult, outcome: TaskOutcome) {
    match outcome {
        TaskOutcome::Harvested(publication) => result.publications.push(publication),
        TaskOutcome::Failed {
            link,
            reason,
            transient,
        } => {
            result.suppressed_failures += 1;
            warn!(%link, %reason, transient, "Detail page failed");
        }
    }
}

// 单个详情页任务：在取消令牌和实际工作之间竞争，被取消时不回报
async fn harvest_detail(
    fetcher: Arc<dyn PageFetcher>,
    extractor: ExtractionService,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    task_timeout: Duration,
    link: String,
    tx: mpsc::UnboundedSender<TaskOutcome>,
) {
    let outcome = tokio::select! {
        _ = cancel.cancelled() => return,
        outcome = fetch_and_extract(fetcher, extractor, semaphore, task_timeout, link) => outcome,
    };
    // 收集者已经返回时接收端被丢弃，发送失败可以忽略
    let _ = tx.send(outcome);
}

async fn fetch_and_extract(
    fetcher: Arc<dyn PageFetcher>,
    extractor: ExtractionService,
    semaphore: Arc<Semaphore>,
    task_timeout: Duration,
    link: String,
) -> TaskOutcome {
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return TaskOutcome::Failed {
                link,
                reason: "worker pool closed".to_string(),
                transient: false,
            }
        }
    };

    let content = match timeout(task_timeout, fetcher.fetch(&link)).await {
        Ok(Ok(content)) => content,
        Ok(Err(e)) => {
            return TaskOutcome::Failed {
                reason: e.to_string(),
                transient: e.is_transient(),
                link,
            }
        }
        Err(_) => {
            return TaskOutcome::Failed {
                reason: format!("timed out after {:?}", task_timeout),
                transient: true,
                link,
            }
        }
    };

    match extractor.extract(&content, &link) {
        Ok(publication) => TaskOutcome::Harvested(publication),
        Err(e) => TaskOutcome::Failed {
            reason: e.to_string(),
            transient: false,
            link,
        },
    }
}
