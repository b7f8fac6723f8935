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

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 浏览器操作失败
    #[error("Browser error: {0}")]
    Browser(String),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl FetchError {
    /// 判断错误是否可能是暂时性的
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            FetchError::Status(code) => *code == 429 || *code >= 500,
            FetchError::Timeout => true,
            _ => false,
        }
    }
}

/// 页面抓取特质
///
/// 给定URL，返回渲染后的页面内容。实现必须保证每次调用使用独立的会话，
/// 调用方会并发地对同一个实例发起多次抓取。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取页面并返回其HTML
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
