// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的数据持久化抽象，具体实现位于 infrastructure::repositories
pub mod paper_repository;
pub mod researcher_repository;
