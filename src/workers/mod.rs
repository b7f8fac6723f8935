// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 包括作业分发、队列消费和工作器生命周期管理
pub mod dispatcher;
pub mod job_consumer;
pub mod manager;
pub mod worker;

pub use worker::Worker;
