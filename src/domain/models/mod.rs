// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 出版物（publication）：从详情页提取的单条记录及列表页
/// - 采集结果（harvest）：一次采集的聚合结果
/// - 任务（job）：入站采集请求与出站完成通知
/// - 论文文档（paper）：持久化形态的记录
/// - 研究者指标（researcher_metrics）：h-index 等统计
pub mod harvest;
pub mod job;
pub mod paper;
pub mod publication;
pub mod researcher_metrics;
