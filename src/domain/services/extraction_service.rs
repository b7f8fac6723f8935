// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

use crate::domain::models::publication::Publication;

static FIELD_BLOCK: Lazy<Selector> = Lazy::new(|| selector(".gs_scl"));
static FIELD_LABEL: Lazy<Selector> = Lazy::new(|| selector(".gsc_oci_field"));
static FIELD_VALUE: Lazy<Selector> = Lazy::new(|| selector(".gsc_oci_value"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("#gsc_oci_title"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| selector("#gsc_oci_title a.gsc_oci_title_link"));
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector("#gsc_oci_descr"));
static PDF_LINK: Lazy<Selector> = Lazy::new(|| selector("#gsc_vcpb .gsc_oci_title_ggi a"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

const AUTHOR_SEPARATOR: &str = ", ";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// 提取错误类型
///
/// 只在内容根本无法作为文档解析时出现；缺失字段不是错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// 内容为空
    #[error("empty document")]
    EmptyDocument,
    /// 内容不含任何标记
    #[error("content is not a markup document")]
    NotMarkup,
}

/// 将内容解析为HTML文档
///
/// html5ever 对任何输入都能构建出文档树，因此这里把空内容和不含任何标签的
/// 纯文本视为无法解析
pub fn parse_document(content: &str) -> Result<Html, ExtractError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    if !trimmed.contains('<') {
        return Err(ExtractError::NotMarkup);
    }
    Ok(Html::parse_document(content))
}

/// 详情页字段
///
/// 标签文本到记录字段的固定映射，匹配区分大小写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    Authors,
    PublicationDate,
    Journal,
    Volume,
    Issue,
    Pages,
    Publisher,
    TotalCitations,
}

impl DetailField {
    pub const ALL: [DetailField; 8] = [
        DetailField::Authors,
        DetailField::PublicationDate,
        DetailField::Journal,
        DetailField::Volume,
        DetailField::Issue,
        DetailField::Pages,
        DetailField::Publisher,
        DetailField::TotalCitations,
    ];

    /// 页面上显示的标签
    pub fn label(self) -> &'static str {
        match self {
            DetailField::Authors => "Authors",
            DetailField::PublicationDate => "Publication date",
            DetailField::Journal => "Journal",
            DetailField::Volume => "Volume",
            DetailField::Issue => "Issue",
            DetailField::Pages => "Pages",
            DetailField::Publisher => "Publisher",
            DetailField::TotalCitations => "Total citations",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }

    fn apply(self, publication: &mut Publication, value: String) {
        match self {
            DetailField::Authors => publication.authors = split_authors(&value),
            DetailField::PublicationDate => publication.publication_date = value,
            DetailField::Journal => publication.journal = value,
            DetailField::Volume => publication.volume = value,
            DetailField::Issue => publication.issue = value,
            DetailField::Pages => publication.pages = value,
            DetailField::Publisher => publication.publisher = value,
            DetailField::TotalCitations => publication.total_citations = parse_citations(&value),
        }
    }
}

/// 按 ", " 拆分作者列表
///
/// 作者名本身含有逗号时会被错误拆分
pub fn split_authors(value: &str) -> Vec<String> {
    value
        .split(AUTHOR_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// 取显示文本中第一段连续数字作为被引次数，没有数字（或溢出）时为 0
pub fn parse_citations(text: &str) -> u64 {
    DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// Keeps text nodes apart so adjacent numbers don't fuse ("Cited by 42" + "2019").
fn spaced_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn first_href(document: &Html, selector: &Selector, base: Option<&Url>) -> Option<String> {
    let href = document
        .select(selector)
        .next()?
        .value()
        .attr("href")?
        .trim();
    if href.is_empty() {
        return None;
    }
    match base.and_then(|b| b.join(href).ok()) {
        Some(absolute) => Some(absolute.to_string()),
        None => Some(href.to_string()),
    }
}

/// 提取服务
///
/// 从详情页内容中提取出版物记录。纯函数，不持有共享状态。
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionService;

impl ExtractionService {
    pub fn new() -> Self {
        Self
    }

    /// 提取记录
    ///
    /// # 参数
    ///
    /// * `content` - 详情页HTML
    /// * `source_link` - 产生该内容的详情页地址
    ///
    /// # 返回值
    ///
    /// * `Ok(Publication)` - 提取结果，缺失字段为空值
    /// * `Err(ExtractError)` - 内容无法解析为文档
    pub fn extract(&self, content: &str, source_link: &str) -> Result<Publication, ExtractError> {
        let document = parse_document(content)?;
        let base = Url::parse(source_link).ok();

        let mut publication = Publication::new(source_link);
        publication.title = first_text(&document, &TITLE);
        publication.description = first_text(&document, &DESCRIPTION);
        publication.publication_link = first_href(&document, &TITLE_LINK, base.as_ref());
        publication.pdf_link = first_href(&document, &PDF_LINK, base.as_ref());

        // 单次遍历字段块；同一标签出现多次时取第一个
        let mut seen = HashSet::new();
        for block in document.select(&FIELD_BLOCK) {
            let Some(label) = block.select(&FIELD_LABEL).next().map(element_text) else {
                continue;
            };
            let Some(field) = DetailField::from_label(&label) else {
                continue;
            };
            if !seen.insert(field) {
                continue;
            }
            let value = block
                .select(&FIELD_VALUE)
                .next()
                .map(|element| match field {
                    DetailField::TotalCitations => spaced_text(element),
                    _ => element_text(element),
                })
                .unwrap_or_default();
            field.apply(&mut publication, value);
        }

        Ok(publication)
    }
}
