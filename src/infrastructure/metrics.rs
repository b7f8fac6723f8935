// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 安装Prometheus导出器并注册采集相关的计数器。
/// 地址无效或端口被占用时只记录警告，服务继续运行。
///
/// # 参数
///
/// * `listen_addr` - 导出器监听地址，例如 `0.0.0.0:9000`
pub fn init_metrics(listen_addr: &str) {
    let addr: SocketAddr = match listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", listen_addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(
        "harvest_records_total",
        "Total number of publication records harvested"
    );
    describe_counter!(
        "harvest_failures_total",
        "Total number of detail pages that failed to fetch or extract"
    );
    describe_counter!(
        "harvest_partial_total",
        "Total number of harvests cut short by the time budget"
    );
    describe_counter!(
        "jobs_processed_total",
        "Total number of researcher jobs processed to completion"
    );
    describe_counter!(
        "jobs_dropped_total",
        "Total number of researcher jobs dropped before harvesting"
    );

    info!("Metrics exporter listening on {}", addr);
}
