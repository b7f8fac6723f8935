// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::fixtures::*;
use super::helpers::memory_repos::{InMemoryPaperRepository, InMemoryResearcherRepository};
use super::helpers::mock_broker::MockBroker;
use super::helpers::mock_fetcher::MockFetcher;
use scholarrs::domain::repositories::researcher_repository::ResearcherRepository;
use scholarrs::domain::services::harvest_service::HarvestService;
use scholarrs::workers::dispatcher::{DispatchReport, JobDispatcher, JobReport};
use std::sync::Arc;
use std::time::Duration;

const OUTBOUND: &str = "calculations-queue";

struct Harness {
    fetcher: Arc<MockFetcher>,
    papers: Arc<InMemoryPaperRepository>,
    researchers: Arc<InMemoryResearcherRepository>,
    broker: Arc<MockBroker>,
    dispatcher: JobDispatcher,
}

fn harness() -> Harness {
    let fetcher = Arc::new(MockFetcher::new());
    let papers = Arc::new(InMemoryPaperRepository::new());
    let researchers = Arc::new(InMemoryResearcherRepository::new());
    let broker = Arc::new(MockBroker::new());

    let dispatcher = JobDispatcher::new(
        Arc::new(HarvestService::new(fetcher.clone(), harvest_config())),
        papers.clone(),
        researchers.clone(),
        broker.clone(),
        OUTBOUND,
        Duration::from_secs(60),
    );

    Harness {
        fetcher,
        papers,
        researchers,
        broker,
        dispatcher,
    }
}

fn two_paper_profile(fetcher: &MockFetcher) {
    fetcher
        .page(listing_url("S1", 0), listing_page(&["S1:a", "S1:b"]))
        .page(listing_url("S1", 100), listing_page(&[]))
        .page(detail_url("S1:a"), detail_page("A", 5))
        .page(detail_url("S1:b"), detail_page("B", 3));
}

fn completed(report: DispatchReport) -> JobReport {
    match report {
        DispatchReport::Completed(report) => report,
        other => panic!("expected completed job, got {:?}", other),
    }
}

#[tokio::test]
async fn test_job_persists_records_and_notifies() {
    let h = harness();
    two_paper_profile(&h.fetcher);

    let report = completed(h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await);

    assert_eq!(report.persisted, 2);
    assert_eq!(report.suppressed_failures, 0);
    assert!(report.notified);
    assert!(!report.partial);

    let papers = h.papers.all();
    assert_eq!(papers.len(), 2);
    for paper in &papers {
        assert_eq!(paper.researcher_id, "r1");
        assert_eq!(paper.admin_id, "a1");
        assert_eq!(paper.researcher_name, "X");
        assert!(paper.tags.is_empty());
    }

    assert_eq!(h.broker.pending(OUTBOUND), vec![OUTBOUND_MESSAGE]);
}

#[tokio::test]
async fn test_detail_failure_still_notifies() {
    let h = harness();
    h.fetcher
        .page(listing_url("S1", 0), listing_page(&["S1:a", "S1:b"]))
        .page(listing_url("S1", 100), listing_page(&[]))
        .page(detail_url("S1:a"), detail_page("A", 5))
        .failing(detail_url("S1:b"), 502);

    let report = completed(h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await);

    assert_eq!(report.persisted, 1);
    assert_eq!(report.suppressed_failures, 1);
    assert_eq!(h.papers.all().len(), 1);
    assert_eq!(h.broker.pending(OUTBOUND), vec![OUTBOUND_MESSAGE]);
}

#[tokio::test]
async fn test_undecodable_message_is_dropped() {
    let h = harness();

    let report = h.dispatcher.on_message(b"{\"admin_id\":\"a1\"}").await;

    assert_eq!(report, DispatchReport::Dropped);
    assert!(h.fetcher.requests().is_empty());
    assert!(h.broker.pending(OUTBOUND).is_empty());
}

#[tokio::test]
async fn test_listing_failure_aborts_without_notification() {
    let h = harness();
    h.fetcher.failing(listing_url("S1", 0), 503);

    let report = h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await;

    assert_eq!(report, DispatchReport::Aborted);
    assert!(h.papers.all().is_empty());
    assert!(h.broker.pending(OUTBOUND).is_empty());
}

#[tokio::test]
async fn test_persistence_failure_does_not_stop_remaining_records() {
    let h = harness();
    two_paper_profile(&h.fetcher);
    h.papers.fail_on(detail_url("S1:a"));

    let report = completed(h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await);

    assert_eq!(report.persisted, 1);
    assert_eq!(report.persist_failures, 1);
    assert!(report.notified);
    assert_eq!(h.papers.all()[0].publication.title, "B");
}

#[tokio::test]
async fn test_publish_failure_is_reported_not_raised() {
    let h = harness();
    two_paper_profile(&h.fetcher);
    h.broker.set_fail_publish(true);

    let report = completed(h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await);

    assert_eq!(report.persisted, 2);
    assert!(!report.notified);
}

#[tokio::test]
async fn test_redelivered_job_does_not_duplicate_records() {
    let h = harness();
    two_paper_profile(&h.fetcher);

    h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await;
    h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await;

    assert_eq!(h.papers.all().len(), 2);
    assert_eq!(h.broker.pending(OUTBOUND).len(), 2);
}

#[tokio::test]
async fn test_researcher_metrics_are_updated() {
    let h = harness();
    two_paper_profile(&h.fetcher);

    let report = completed(h.dispatcher.on_message(INBOUND_MESSAGE.as_bytes()).await);
    assert!(report.metrics_updated);

    let metrics = h.researchers.find_metrics("r1").await.unwrap().unwrap();
    assert_eq!(metrics.total_papers, 2);
    assert_eq!(metrics.total_citations, 8);
    assert_eq!(metrics.h_index, 2);
    assert_eq!(metrics.i10_index, 0);
}
