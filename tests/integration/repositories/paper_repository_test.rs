// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use scholarrs::config::settings::DatabaseSettings;
use scholarrs::domain::models::job::Job;
use scholarrs::domain::models::paper::PaperDocument;
use scholarrs::domain::models::publication::Publication;
use scholarrs::domain::models::researcher_metrics::ResearcherMetrics;
use scholarrs::domain::repositories::paper_repository::PaperRepository;
use scholarrs::domain::repositories::researcher_repository::ResearcherRepository;
use scholarrs::infrastructure::database::connection;
use scholarrs::infrastructure::repositories::paper_repo_impl::PaperRepositoryImpl;
use scholarrs::infrastructure::repositories::researcher_repo_impl::ResearcherRepositoryImpl;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::super::helpers::fixtures::INBOUND_MESSAGE;

// 单连接保证所有语句落在同一个内存数据库上
async fn memory_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
        sqlx_logging: false,
    };
    let db = connection::create_pool(&settings).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

fn paper(title: &str, citations: u64) -> PaperDocument {
    let job = Job::decode(INBOUND_MESSAGE.as_bytes()).unwrap();
    let publication = Publication {
        title: title.to_string(),
        authors: vec!["Ada Lovelace".to_string(), "Charles Babbage".to_string()],
        total_citations: citations,
        pdf_link: Some("https://example.org/paper.pdf".to_string()),
        ..Publication::new("https://scholar.test/citations?citation_for_view=S1:a")
    };
    PaperDocument::new(&job, publication, Utc::now())
}

#[tokio::test]
async fn test_upsert_by_natural_key_replaces_existing_row() {
    let repo = PaperRepositoryImpl::new(memory_db().await);

    let first = paper("Notes", 3);
    repo.upsert(&first).await.unwrap();

    let mut second = paper("Notes (revised)", 7);
    second.last_fetch = first.last_fetch + Duration::days(1);
    repo.upsert(&second).await.unwrap();

    let stored = repo.find_by_researcher("r1").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);
    assert_eq!(stored[0].publication.title, "Notes (revised)");
    assert_eq!(stored[0].publication.total_citations, 7);
    assert_eq!(stored[0].publication.authors, first.publication.authors);
    assert_eq!(stored[0].publication.pdf_link, first.publication.pdf_link);
    assert!(stored[0].publication.publication_link.is_none());
}

#[tokio::test]
async fn test_same_link_for_another_admin_is_a_separate_row() {
    let repo = PaperRepositoryImpl::new(memory_db().await);

    let first = paper("Notes", 3);
    let mut other_admin = paper("Notes", 3);
    other_admin.admin_id = "a2".to_string();

    repo.upsert(&first).await.unwrap();
    repo.upsert(&other_admin).await.unwrap();

    assert_eq!(repo.find_by_researcher("r1").await.unwrap().len(), 2);
    assert!(repo.find_by_researcher("r2").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_researcher_metrics_upsert() {
    let repo = ResearcherRepositoryImpl::new(memory_db().await);
    assert!(repo.find_metrics("r1").await.unwrap().is_none());

    let publications = vec![Publication {
        total_citations: 12,
        ..Publication::new("https://scholar.test/p1")
    }];
    let metrics = ResearcherMetrics::from_publications("r1", &publications, Utc::now());
    repo.upsert_metrics(&metrics).await.unwrap();

    let updated = ResearcherMetrics::from_publications("r1", &[], Utc::now());
    repo.upsert_metrics(&updated).await.unwrap();

    let stored = repo.find_metrics("r1").await.unwrap().unwrap();
    assert_eq!(stored.total_papers, 0);
    assert_eq!(stored.h_index, 0);
}
