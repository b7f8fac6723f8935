// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::Selector;
use tracing::debug;
use url::Url;

use crate::domain::models::publication::ListingPage;
use crate::domain::services::extraction_service::{parse_document, ExtractError};
use crate::utils::url_utils;

static PUBLICATION_ANCHOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#gsc_a_b .gsc_a_t a").expect("static selector is valid")
});

/// 列表页解析器
///
/// 从学者主页的一页分页索引中按顺序取出详情页链接
#[derive(Debug, Clone)]
pub struct ListingParser {
    detail_base_url: Url,
}

impl ListingParser {
    /// # 参数
    ///
    /// * `detail_base_url` - 解析相对链接时使用的基础地址
    pub fn new(detail_base_url: Url) -> Self {
        Self { detail_base_url }
    }

    /// 解析列表页
    ///
    /// 缺少 href 或无法解析的锚点被跳过
    pub fn parse(&self, content: &str) -> Result<ListingPage, ExtractError> {
        let document = parse_document(content)?;

        let links = document
            .select(&PUBLICATION_ANCHOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .filter_map(|href| match url_utils::resolve_url(&self.detail_base_url, href) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!("Skipping unresolvable link {}: {}", href, e);
                    None
                }
            })
            .collect();

        Ok(ListingPage { links })
    }
}
