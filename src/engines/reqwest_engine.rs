// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::engines::traits::{FetchError, PageFetcher};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// Reqwest引擎
///
/// 基于reqwest的纯HTTP抓取引擎，不执行JavaScript
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的Reqwest引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的User-Agent
    /// * `timeout` - 单次请求超时时间
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 响应正文
    /// * `Err(FetchError)` - 网络错误或非 2xx 状态码
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content = response.text().await?;
        debug!(
            url,
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = content.len(),
            "Fetched page"
        );
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
