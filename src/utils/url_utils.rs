// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 构造学者主页的分页列表URL
///
/// # 参数
///
/// * `base_url` - 列表页基础地址（不含查询参数）
/// * `scholar_id` - 学者ID
/// * `language` - 界面语言
/// * `offset` - 分页起始位置
/// * `page_size` - 每页条目数
pub fn listing_url(
    base_url: &Url,
    scholar_id: &str,
    language: &str,
    offset: usize,
    page_size: usize,
) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("user", scholar_id)
        .append_pair("hl", language)
        .append_pair("cstart", &offset.to_string())
        .append_pair("pagesize", &page_size.to_string());
    url
}
