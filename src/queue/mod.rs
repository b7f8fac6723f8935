// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 负责与消息代理交互：接收作业、确认、发布完成通知
pub mod broker;
pub mod redis_broker;
