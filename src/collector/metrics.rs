//! Metric families exposed by the exporter.

use crate::nodeping::{Check, CheckResult};

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, GaugeVec, IntCounter, Opts, TextEncoder};

/// Prefix of every metric name.
pub const NAMESPACE: &str = "nodeping";

const CHECK_LABELS: &[&str] = &["label", "target", "type"];

/// Identity of a check sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckLabels {
    pub label: String,
    pub target: String,
    pub check_type: String,
}

impl CheckLabels {
    /// Label set for a check and its latest result.
    ///
    /// Target and type come from the result, falling back to the check
    /// definition when the result leaves them empty.
    pub fn new(check: &Check, result: &CheckResult) -> Self {
        let pick = |from_result: &str, from_check: &str| {
            if from_result.is_empty() {
                from_check.to_string()
            } else {
                from_result.to_string()
            }
        };

        Self {
            label: check.label.clone(),
            target: pick(&result.target, &check.parameters.target),
            check_type: pick(&result.check_type, &check.check_type),
        }
    }

    fn values(&self) -> [&str; 3] {
        [
            self.label.as_str(),
            self.target.as_str(),
            self.check_type.as_str(),
        ]
    }
}

/// Per-check gauges: `check_up` and `check_duration_seconds`.
#[derive(Clone)]
pub struct CheckGauges {
    up: GaugeVec,
    duration: GaugeVec,
}

impl CheckGauges {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            up: GaugeVec::new(
                Opts::new("check_up", "Current check status: 1 - for up, 0 - for down")
                    .namespace(NAMESPACE),
                CHECK_LABELS,
            )?,
            duration: GaugeVec::new(
                Opts::new("check_duration_seconds", "Last check duration in seconds")
                    .namespace(NAMESPACE),
                CHECK_LABELS,
            )?,
        })
    }

    /// Overwrite both samples for one label set.
    pub fn publish(&self, labels: &CheckLabels, result: &CheckResult) {
        let values = labels.values();
        let up = if result.success { 1.0 } else { 0.0 };
        self.up.with_label_values(&values).set(up);
        self.duration
            .with_label_values(&values)
            .set(result.duration_ms as f64 / 1000.0);
    }

    /// Drop every label set.
    pub fn reset(&self) {
        self.up.reset();
        self.duration.reset();
    }

    pub fn families(&self) -> Vec<MetricFamily> {
        let mut families = self.up.collect();
        families.extend(self.duration.collect());
        families
    }

    pub fn descs(&self) -> Vec<Desc> {
        self.up
            .desc()
            .into_iter()
            .chain(self.duration.desc())
            .cloned()
            .collect()
    }
}

/// Process-lifetime scrape counters.
#[derive(Clone)]
pub struct ScrapeCounters {
    total: IntCounter,
    failed: IntCounter,
}

impl ScrapeCounters {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            total: IntCounter::with_opts(
                Opts::new("exporter_scrapes_total", "Count of total scrapes").namespace(NAMESPACE),
            )?,
            failed: IntCounter::with_opts(
                Opts::new(
                    "exporter_failed_balance_scrapes_total",
                    "Count of failed balance scrapes",
                )
                .namespace(NAMESPACE),
            )?,
        })
    }

    pub fn record_scrape(&self) {
        self.total.inc();
    }

    pub fn record_failure(&self) {
        self.failed.inc();
    }

    pub fn total(&self) -> u64 {
        self.total.get()
    }

    pub fn failed(&self) -> u64 {
        self.failed.get()
    }

    /// Total first, then failed.
    pub fn families(&self) -> Vec<MetricFamily> {
        let mut families = self.total.collect();
        families.extend(self.failed.collect());
        families
    }

    pub fn descs(&self) -> Vec<Desc> {
        self.total
            .desc()
            .into_iter()
            .chain(self.failed.desc())
            .cloned()
            .collect()
    }
}

/// Render metric families in the Prometheus text exposition format.
pub fn render(families: &[MetricFamily]) -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
