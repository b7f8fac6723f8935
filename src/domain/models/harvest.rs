// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::publication::Publication;

/// 单次采集的聚合结果
///
/// `publications` 是无序集合。若分页过程中同一链接出现两次且未开启去重，
/// 会产生两条记录，调用方需要按 `link` 自行去重。
#[derive(Debug, Clone, Default)]
pub struct HarvestResult {
    /// 已收集的记录
    pub publications: Vec<Publication>,
    /// 是否因时间预算耗尽而提前结束
    pub partial: bool,
    /// 被吞掉的详情页抓取/提取失败数
    pub suppressed_failures: usize,
    /// 已抓取的列表页数
    pub listing_pages: usize,
    /// 已派发的详情页任务数
    pub dispatched: usize,
}

impl HarvestResult {
    /// 是否在所有任务回报后自然结束
    pub fn is_complete(&self) -> bool {
        !self.partial
    }

    /// 尚未回报的任务数（仅在部分结果中可能非零）
    pub fn outstanding(&self) -> usize {
        self.dispatched
            .saturating_sub(self.publications.len() + self.suppressed_failures)
    }
}
