// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scholarrs::domain::services::harvest_service::HarvestConfig;
use scholarrs::utils::url_utils;
use std::time::Duration;
use url::Url;

pub const LISTING_BASE: &str = "https://scholar.test/citations";
pub const DETAIL_BASE: &str = "https://scholar.test";
pub const PAGE_SIZE: usize = 100;

pub const INBOUND_MESSAGE: &str =
    r#"{"admin_id":"a1","researcher":{"researcher_id":"r1","name":"X","scholar_id":"S1"}}"#;
pub const OUTBOUND_MESSAGE: &str = r#"{"researcher_id":"r1","admin_id":"a1"}"#;

pub fn harvest_config() -> HarvestConfig {
    HarvestConfig {
        listing_base_url: Url::parse(LISTING_BASE).unwrap(),
        detail_base_url: Url::parse(DETAIL_BASE).unwrap(),
        language: "en".to_string(),
        page_size: PAGE_SIZE,
        max_concurrency: 4,
        task_timeout: Duration::from_secs(20),
        dedup_links: false,
    }
}

/// 某个学者第 `offset` 条起的列表页地址
pub fn listing_url(scholar_id: &str, offset: usize) -> String {
    url_utils::listing_url(
        &Url::parse(LISTING_BASE).unwrap(),
        scholar_id,
        "en",
        offset,
        PAGE_SIZE,
    )
    .to_string()
}

/// 列表页中的相对链接
pub fn detail_href(key: &str) -> String {
    format!("/citations?view_op=view_citation&hl=en&citation_for_view={}", key)
}

/// 列表页链接解析后的绝对地址
pub fn detail_url(key: &str) -> String {
    Url::parse(DETAIL_BASE)
        .unwrap()
        .join(&detail_href(key))
        .unwrap()
        .to_string()
}

pub fn listing_page(keys: &[&str]) -> String {
    let rows: String = keys
        .iter()
        .map(|key| {
            format!(
                r#"<tr class="gsc_a_tr"><td class="gsc_a_t"><a href="{}" class="gsc_a_at">Paper {}</a></td></tr>"#,
                detail_href(key),
                key
            )
        })
        .collect();
    format!(
        r#"<html><body><table id="gsc_a_t"><tbody id="gsc_a_b">{}</tbody></table></body></html>"#,
        rows
    )
}

pub fn detail_page(title: &str, citations: u32) -> String {
    format!(
        r#"<html><body><div id="gsc_vcpb">
            <div id="gsc_oci_title"><a class="gsc_oci_title_link" href="https://publisher.test/{title}">{title}</a></div>
            <div id="gsc_oci_table">
                <div class="gs_scl"><div class="gsc_oci_field">Authors</div><div class="gsc_oci_value">Ada Lovelace, Charles Babbage</div></div>
                <div class="gs_scl"><div class="gsc_oci_field">Publication date</div><div class="gsc_oci_value">1843/10/01</div></div>
                <div class="gs_scl"><div class="gsc_oci_field">Total citations</div><div class="gsc_oci_value"><a href="/scholar?cites=1">Cited by {citations}</a></div></div>
            </div>
        </div></body></html>"#,
        title = title,
        citations = citations
    )
}
