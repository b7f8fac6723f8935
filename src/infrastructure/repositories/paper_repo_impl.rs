// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::paper::PaperDocument;
use crate::domain::models::publication::Publication;
use crate::domain::repositories::paper_repository::PaperRepository;
use crate::infrastructure::database::entities::paper;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 论文仓库实现
pub struct PaperRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl PaperRepositoryImpl {
    /// 创建新的论文仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_active_model(document: &PaperDocument) -> Result<paper::ActiveModel, RepositoryError> {
    let publication = &document.publication;
    Ok(paper::ActiveModel {
        id: Set(document.id),
        link: Set(publication.link.clone()),
        researcher_id: Set(document.researcher_id.clone()),
        researcher_name: Set(document.researcher_name.clone()),
        scholar_id: Set(document.scholar_id.clone()),
        admin_id: Set(document.admin_id.clone()),
        title: Set(publication.title.clone()),
        authors: Set(serde_json::to_value(&publication.authors)?),
        publication_date: Set(publication.publication_date.clone()),
        journal: Set(publication.journal.clone()),
        volume: Set(publication.volume.clone()),
        issue: Set(publication.issue.clone()),
        pages: Set(publication.pages.clone()),
        publisher: Set(publication.publisher.clone()),
        description: Set(publication.description.clone()),
        total_citations: Set(i64::try_from(publication.total_citations).unwrap_or(i64::MAX)),
        publication_link: Set(publication.publication_link.clone()),
        pdf_link: Set(publication.pdf_link.clone()),
        tags: Set(serde_json::to_value(&document.tags)?),
        last_fetch: Set(document.last_fetch),
    })
}

fn from_model(model: paper::Model) -> Result<PaperDocument, RepositoryError> {
    let total_citations = u64::try_from(model.total_citations).map_err(|_| {
        RepositoryError::InternalError(format!(
            "total_citations out of range: {}",
            model.total_citations
        ))
    })?;

    Ok(PaperDocument {
        id: model.id,
        researcher_id: model.researcher_id,
        researcher_name: model.researcher_name,
        scholar_id: model.scholar_id,
        admin_id: model.admin_id,
        publication: Publication {
            title: model.title,
            authors: serde_json::from_value(model.authors)?,
            publication_date: model.publication_date,
            journal: model.journal,
            volume: model.volume,
            issue: model.issue,
            pages: model.pages,
            publisher: model.publisher,
            description: model.description,
            total_citations,
            link: model.link,
            publication_link: model.publication_link,
            pdf_link: model.pdf_link,
        },
        tags: serde_json::from_value(model.tags)?,
        last_fetch: model.last_fetch,
    })
}

#[async_trait]
impl PaperRepository for PaperRepositoryImpl {
    async fn upsert(&self, document: &PaperDocument) -> Result<(), RepositoryError> {
        let active_model = to_active_model(document)?;

        // 冲突时保留原有 id，其余字段以本次采集为准
        paper::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    paper::Column::Link,
                    paper::Column::ResearcherId,
                    paper::Column::AdminId,
                ])
                .update_columns([
                    paper::Column::ResearcherName,
                    paper::Column::ScholarId,
                    paper::Column::Title,
                    paper::Column::Authors,
                    paper::Column::PublicationDate,
                    paper::Column::Journal,
                    paper::Column::Volume,
                    paper::Column::Issue,
                    paper::Column::Pages,
                    paper::Column::Publisher,
                    paper::Column::Description,
                    paper::Column::TotalCitations,
                    paper::Column::PublicationLink,
                    paper::Column::PdfLink,
                    paper::Column::Tags,
                    paper::Column::LastFetch,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn find_by_researcher(
        &self,
        researcher_id: &str,
    ) -> Result<Vec<PaperDocument>, RepositoryError> {
        let models = paper::Entity::find()
            .filter(paper::Column::ResearcherId.eq(researcher_id))
            .order_by_asc(paper::Column::Link)
            .all(self.db.as_ref())
            .await?;

        models.into_iter().map(from_model).collect()
    }
}
