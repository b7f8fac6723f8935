// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::fixtures::*;
use super::helpers::memory_repos::{InMemoryPaperRepository, InMemoryResearcherRepository};
use super::helpers::mock_broker::MockBroker;
use super::helpers::mock_fetcher::MockFetcher;
use scholarrs::domain::services::harvest_service::HarvestService;
use scholarrs::queue::broker::MessageBroker;
use scholarrs::workers::dispatcher::JobDispatcher;
use scholarrs::workers::job_consumer::JobConsumer;
use scholarrs::workers::manager::WorkerManager;
use scholarrs::workers::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const INBOUND: &str = "researcher-queue";
const OUTBOUND: &str = "calculations-queue";
const POLL: Duration = Duration::from_millis(50);

fn setup() -> (Arc<MockBroker>, Arc<JobDispatcher>) {
    let fetcher = Arc::new(MockFetcher::new());
    fetcher
        .page(listing_url("S1", 0), listing_page(&["S1:a"]))
        .page(listing_url("S1", 100), listing_page(&[]))
        .page(detail_url("S1:a"), detail_page("A", 1));

    let broker = Arc::new(MockBroker::new());
    let dispatcher = Arc::new(JobDispatcher::new(
        Arc::new(HarvestService::new(fetcher, harvest_config())),
        Arc::new(InMemoryPaperRepository::new()),
        Arc::new(InMemoryResearcherRepository::new()),
        broker.clone(),
        OUTBOUND,
        Duration::from_secs(60),
    ));
    (broker, dispatcher)
}

fn consumer(broker: &Arc<MockBroker>, dispatcher: &Arc<JobDispatcher>) -> JobConsumer {
    JobConsumer::new("test-consumer", broker.clone(), dispatcher.clone(), INBOUND, POLL)
}

#[tokio::test]
async fn test_message_is_acked_after_dispatch() {
    let (broker, dispatcher) = setup();
    broker.push(INBOUND, INBOUND_MESSAGE);

    let processed = consumer(&broker, &dispatcher).process_next().await.unwrap();

    assert!(processed);
    assert_eq!(broker.acked(), 1);
    assert_eq!(broker.unacked(), 0);
    assert_eq!(broker.pending(OUTBOUND), vec![OUTBOUND_MESSAGE]);
}

#[tokio::test]
async fn test_empty_queue_reports_idle() {
    let (broker, dispatcher) = setup();

    let processed = consumer(&broker, &dispatcher).process_next().await.unwrap();

    assert!(!processed);
    assert_eq!(broker.acked(), 0);
}

#[tokio::test]
async fn test_undecodable_message_is_acked_and_dropped() {
    let (broker, dispatcher) = setup();
    broker.push(INBOUND, "not json");

    let processed = consumer(&broker, &dispatcher).process_next().await.unwrap();

    assert!(processed);
    assert_eq!(broker.acked(), 1);
    assert!(broker.pending(OUTBOUND).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_run_drains_queue_and_stops_on_shutdown() {
    let (broker, dispatcher) = setup();
    broker.push(INBOUND, INBOUND_MESSAGE);
    broker.push(INBOUND, INBOUND_MESSAGE);

    let worker = consumer(&broker, &dispatcher);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { worker.run(shutdown).await }
    });

    tokio::time::sleep(POLL * 4).await;
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("consumer should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(broker.acked(), 2);
    assert!(broker.pending(INBOUND).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_manager_recovers_unacked_messages_before_starting() {
    let (broker, dispatcher) = setup();
    broker.push(INBOUND, INBOUND_MESSAGE);
    // 模拟上次运行取出后崩溃
    broker.receive(INBOUND).await.unwrap().unwrap();
    assert_eq!(broker.unacked(), 1);

    let mut manager = WorkerManager::new(broker.clone(), dispatcher, INBOUND, POLL);
    assert_eq!(manager.recover_unacked().await.unwrap(), 1);
    assert_eq!(broker.pending(INBOUND).len(), 1);

    manager.start_workers(2);
    tokio::time::sleep(POLL * 4).await;
    manager.shutdown().await;

    assert_eq!(broker.acked(), 1);
    assert_eq!(broker.unacked(), 0);
    assert_eq!(broker.pending(OUTBOUND), vec![OUTBOUND_MESSAGE]);
}
