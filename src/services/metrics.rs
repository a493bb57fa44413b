use std::sync::Arc;

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge_vec, CounterVec, GaugeVec};
use tracing::{info, warn};

use crate::{error::AnnouncementError, services::announcements::AnnouncementService};

lazy_static! {
    pub static ref ANNOUNCEMENT_REQUESTS_COUNTER: CounterVec = register_counter_vec!(
        "announcement_requests_total",
        "Announcement operations by operation and outcome",
        &["operation", "outcome"]
    ).unwrap();

    pub static ref ANNOUNCEMENTS_GAUGE: GaugeVec = register_gauge_vec!(
        "announcements_total",
        "Stored announcements, all or currently visible",
        &["visibility"]
    ).unwrap();
}

/// Count one operation; the outcome label is `ok` or the error code.
pub fn record<T>(operation: &str, result: &Result<T, AnnouncementError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.code(),
    };
    ANNOUNCEMENT_REQUESTS_COUNTER
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Spawn the background gauge collector.
pub fn start(service: Arc<AnnouncementService>, interval_secs: u64) {
    tokio::spawn(async move {
        let period = tokio::time::Duration::from_secs(interval_secs.max(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = collect(&service).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(service: &AnnouncementService) -> anyhow::Result<()> {
    let (all, active) = service.counts().await?;
    ANNOUNCEMENTS_GAUGE.with_label_values(&["all"]).set(all as f64);
    ANNOUNCEMENTS_GAUGE.with_label_values(&["active"]).set(active as f64);
    info!("Metrics: {} announcement(s), {} active", all, active);
    Ok(())
}
