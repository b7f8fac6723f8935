// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use scholarrs::engines::traits::{FetchError, PageFetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone)]
enum Scripted {
    Page { content: String, delay: Duration },
    Fail(u16),
}

/// 按地址返回预设内容的抓取器，记录请求和并发峰值
#[derive(Default)]
pub struct MockFetcher {
    routes: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

// 抓取被取消时也要减少并发计数
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, url: impl Into<String>, content: impl Into<String>) -> &Self {
        self.delayed_page(url, content, Duration::ZERO)
    }

    pub fn delayed_page(
        &self,
        url: impl Into<String>,
        content: impl Into<String>,
        delay: Duration,
    ) -> &Self {
        self.routes.lock().unwrap().insert(
            url.into(),
            Scripted::Page {
                content: content.into(),
                delay,
            },
        );
        self
    }

    pub fn failing(&self, url: impl Into<String>, status: u16) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.into(), Scripted::Fail(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// 完整返回了内容的抓取次数
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        let scripted = self.routes.lock().unwrap().get(url).cloned();

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match scripted {
            Some(Scripted::Page { content, delay }) => {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                self.completed.fetch_add(1, Ordering::SeqCst);
                Ok(content)
            }
            Some(Scripted::Fail(status)) => Err(FetchError::Status(status)),
            None => Err(FetchError::Status(404)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
