// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：把详情页HTML解析为出版物记录
/// - 列表解析（listing_parser）：从分页索引中发现详情页链接
/// - 采集服务（harvest_service）：分页、并发派发并在时间预算内汇总
pub mod extraction_service;
pub mod harvest_service;
pub mod listing_parser;
