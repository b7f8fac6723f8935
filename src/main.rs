// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use scholarrs::config::settings::Settings;
use scholarrs::domain::services::harvest_service::{HarvestConfig, HarvestService};
use scholarrs::engines::build_fetcher;
use scholarrs::infrastructure::database::connection;
use scholarrs::infrastructure::repositories::paper_repo_impl::PaperRepositoryImpl;
use scholarrs::infrastructure::repositories::researcher_repo_impl::ResearcherRepositoryImpl;
use scholarrs::queue::redis_broker::RedisBroker;
use scholarrs::utils::telemetry;
use scholarrs::workers::dispatcher::JobDispatcher;
use scholarrs::workers::manager::WorkerManager;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动作业消费者
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(settings.logging.json);
    info!("Starting scholarrs...");

    if settings.metrics.enabled {
        scholarrs::infrastructure::metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let broker = Arc::new(RedisBroker::new(&settings.redis.url)?);
    let fetcher = build_fetcher(&settings.fetcher)?;
    info!(engine = fetcher.name(), "Page fetcher initialized");

    let harvester = Arc::new(HarvestService::new(
        fetcher,
        HarvestConfig::try_from(&settings.harvest)?,
    ));
    let dispatcher = Arc::new(JobDispatcher::new(
        harvester,
        Arc::new(PaperRepositoryImpl::new(db.clone())),
        Arc::new(ResearcherRepositoryImpl::new(db.clone())),
        broker.clone(),
        settings.queues.outbound.clone(),
        settings.harvest.time_budget(),
    ));

    // 5. Start workers
    let mut manager = WorkerManager::new(
        broker,
        dispatcher,
        settings.queues.inbound.clone(),
        settings.queues.poll_interval(),
    );
    match manager.recover_unacked().await {
        Ok(0) => {}
        Ok(n) => info!("Recovered {} unacknowledged jobs", n),
        Err(e) => warn!("Failed to recover unacknowledged jobs: {}", e),
    }
    manager.start_workers(settings.dispatcher.concurrency);
    info!(
        queue = %settings.queues.inbound,
        "Listening for researcher jobs"
    );

    manager.wait_for_shutdown().await;
    info!("scholarrs stopped");

    Ok(())
}
