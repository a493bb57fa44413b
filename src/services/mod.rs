pub mod announcements;
pub mod metrics;
