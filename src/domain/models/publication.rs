// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 出版物记录
///
/// 从单个详情页提取的结构化数据。除 `link` 外所有字段都可以为空：
/// 页面缺少某个字段时对应值为空字符串、空列表或 0，而不是错误。
/// `link` 永远是产生该记录的详情页地址。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// 标题
    pub title: String,
    /// 作者列表，保持页面顺序
    pub authors: Vec<String>,
    /// 发表日期（原始文本）
    pub publication_date: String,
    /// 期刊/会议
    pub journal: String,
    /// 卷
    pub volume: String,
    /// 期
    pub issue: String,
    /// 页码范围
    pub pages: String,
    /// 出版商
    pub publisher: String,
    /// 摘要
    pub description: String,
    /// 被引次数
    pub total_citations: u64,
    /// 详情页地址
    pub link: String,
    /// 出版方页面链接，缺失时为 None
    pub publication_link: Option<String>,
    /// 全文（PDF）链接，缺失时为 None
    pub pdf_link: Option<String>,
}

impl Publication {
    /// 创建一个只包含来源链接的空记录
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }
}

/// 列表页
///
/// 一页分页索引中按顺序出现的详情页链接
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub links: Vec<String>,
}

impl ListingPage {
    /// 列表页没有任何链接即表示分页结束
    pub fn is_exhausted(&self) -> bool {
        self.links.is_empty()
    }
}
