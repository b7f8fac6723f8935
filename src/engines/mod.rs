// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FetcherSettings;
use std::sync::Arc;
use std::time::Duration;

pub mod browser_engine;
pub mod reqwest_engine;
pub mod traits;

use browser_engine::BrowserEngine;
use reqwest_engine::ReqwestEngine;
use traits::{FetchError, PageFetcher};

/// 根据配置构建页面抓取引擎
///
/// `engine` 取值 `browser`（默认，渲染页面）或 `http`（纯HTTP）
pub fn build_fetcher(settings: &FetcherSettings) -> Result<Arc<dyn PageFetcher>, FetchError> {
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    match settings.engine.as_str() {
        "browser" => Ok(Arc::new(BrowserEngine::new(
            settings.remote_debugging_url.clone(),
            timeout,
        ))),
        "http" => Ok(Arc::new(ReqwestEngine::new(&settings.user_agent, timeout)?)),
        other => Err(FetchError::Other(format!("Unknown fetcher engine: {}", other))),
    }
}
