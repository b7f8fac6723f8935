// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{FetchError, PageFetcher};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// 资源关闭守卫
///
/// 正常路径通过 `take` 取回资源并自行关闭；持有守卫的 future 被丢弃
/// （超时、取消、任务中止）时，在后台任务中执行关闭
pub(crate) struct CloseOnDrop<T: Send + 'static> {
    resource: Option<T>,
    close: fn(T) -> BoxFuture<'static, ()>,
}

impl<T: Send + 'static> CloseOnDrop<T> {
    pub(crate) fn new(resource: T, close: fn(T) -> BoxFuture<'static, ()>) -> Self {
        Self {
            resource: Some(resource),
            close,
        }
    }

    pub(crate) fn take(&mut self) -> Option<T> {
        self.resource.take()
    }
}

impl<T: Send + 'static> Drop for CloseOnDrop<T> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn((self.close)(resource));
                }
                Err(_) => warn!("No runtime available, resource dropped without close"),
            }
        }
    }
}

fn close_page(page: Page) -> BoxFuture<'static, ()> {
    async move {
        if let Err(e) = page.close().await {
            warn!("Failed to close page: {}", e);
        }
    }
    .boxed()
}

/// 浏览器引擎
///
/// 基于chromiumoxide的渲染抓取引擎：导航到目标地址，等待页面就绪，
/// 返回完整的外层HTML。浏览器进程在首次抓取时启动并在实例内复用，
/// 每次抓取打开独立的标签页，结束后关闭。
pub struct BrowserEngine {
    browser: OnceCell<Browser>,
    remote_debugging_url: Option<String>,
    request_timeout: Duration,
}

impl BrowserEngine {
    /// 创建新的浏览器引擎实例
    ///
    /// # 参数
    ///
    /// * `remote_debugging_url` - 远程 Chrome 调试地址，为空时在本地启动浏览器
    /// * `request_timeout` - 单次抓取的超时时间
    pub fn new(remote_debugging_url: Option<String>, request_timeout: Duration) -> Self {
        Self {
            browser: OnceCell::new(),
            remote_debugging_url,
            request_timeout,
        }
    }

    // Launches (or connects to) the browser once; later calls reuse it.
    async fn browser(&self) -> Result<&Browser, FetchError> {
        self.browser
            .get_or_try_init(|| async {
                let (browser, mut handler) = if let Some(url) = &self.remote_debugging_url {
                    info!("Connecting to remote Chrome instance at: {}", url);
                    Browser::connect(url).await.map_err(|e| {
                        FetchError::Browser(format!("Failed to connect to remote Chrome: {}", e))
                    })?
                } else {
                    let config = BrowserConfig::builder()
                        .no_sandbox()
                        .request_timeout(self.request_timeout)
                        .arg("--disable-gpu")
                        .arg("--disable-dev-shm-usage")
                        .build()
                        .map_err(FetchError::Browser)?;

                    Browser::launch(config)
                        .await
                        .map_err(|e| FetchError::Browser(e.to_string()))?
                };

                // Drive browser events until the connection closes
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if event.is_err() {
                            break;
                        }
                    }
                });

                Ok(browser)
            })
            .await
    }

    async fn render(page: &Page, url: &str) -> Result<String, FetchError> {
        page.goto(url)
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        // 页面就绪：body 已可查询
        page.find_element("body")
            .await
            .map_err(|e| FetchError::Browser(format!("Page never became ready: {}", e)))?;

        page.content()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for BrowserEngine {
    /// 执行浏览器渲染抓取
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 渲染后的HTML
    /// * `Err(FetchError)` - 浏览器错误或超时
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let browser = self.browser().await?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        let mut guard = CloseOnDrop::new(page.clone(), close_page);

        let rendered = tokio::time::timeout(self.request_timeout, Self::render(&page, url)).await;

        if let Some(page) = guard.take() {
            close_page(page).await;
        }

        let content = rendered.map_err(|_| FetchError::Timeout)??;
        debug!(
            url,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered page"
        );
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
