//! Prometheus collectors for the answer pipeline.
//!
//! Registered into the server's registry via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{
    core::Collector, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
};

/// Remote QA queries by final outcome.
pub static QA_QUERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("faqbot_qa_queries_total", "Remote QA queries by outcome"),
        &["outcome"],
    )
    .unwrap()
});

/// Individual HTTP attempts made against the remote endpoint.
pub static QA_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "faqbot_qa_attempts_total",
            "Remote QA HTTP attempts by outcome",
        ),
        &["outcome"],
    )
    .unwrap()
});

/// Wall time of a remote query, retries and waits included.
pub static QA_QUERY_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "faqbot_qa_query_duration_seconds",
            "Remote QA query duration in seconds, including retries",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
    )
    .unwrap()
});

/// Resolved chat messages by answer source.
pub static RESOLUTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "faqbot_resolutions_total",
            "Chat messages resolved, by answer source",
        ),
        &["source"],
    )
    .unwrap()
});

/// Warm-up calls issued (at most one per process).
pub static WARMUP_CALLS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("faqbot_warmup_calls_total", "Remote warm-up calls issued").unwrap()
});

/// All core collectors, for registration.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(QA_QUERIES_TOTAL.clone()),
        Box::new(QA_ATTEMPTS_TOTAL.clone()),
        Box::new(QA_QUERY_DURATION.clone()),
        Box::new(RESOLUTIONS_TOTAL.clone()),
        Box::new(WARMUP_CALLS_TOTAL.clone()),
    ]
}
