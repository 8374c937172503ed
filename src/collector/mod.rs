//! Scrape orchestration.
//!
//! Every call to [`Exporter::collect`] is one scrape: list the checks, look up
//! the latest result of each one concurrently, publish the samples and finish
//! with the scrape counters.

mod metrics;

pub use metrics::*;

use crate::nodeping::CheckSource;

use prometheus::core::Desc;
use prometheus::proto::MetricFamily;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Turns the state of a [`CheckSource`] into metric families.
pub struct Exporter<S> {
    source: Arc<S>,
    gauges: CheckGauges,
    counters: ScrapeCounters,
    // Serializes scrapes against each other.
    cycle: Mutex<()>,
}

impl<S: CheckSource + 'static> Exporter<S> {
    /// Create an exporter reading from the given source.
    pub fn new(source: S) -> prometheus::Result<Self> {
        Ok(Self {
            source: Arc::new(source),
            gauges: CheckGauges::new()?,
            counters: ScrapeCounters::new()?,
            cycle: Mutex::new(()),
        })
    }

    /// Descriptors of every metric family this exporter can emit.
    pub fn describe(&self) -> Vec<Desc> {
        let mut descs = self.gauges.descs();
        descs.extend(self.counters.descs());
        descs
    }

    /// Run one scrape and return its metric families.
    ///
    /// Check samples come first, in no particular order, followed by the
    /// total and failed scrape counters. A failed check list yields only the
    /// counters. A failed lookup for one check leaves that check out of the
    /// output without affecting the others.
    pub async fn collect(&self) -> Vec<MetricFamily> {
        let _cycle = self.cycle.lock().await;

        self.counters.record_scrape();

        let checks = match self.source.list_checks().await {
            Ok(checks) => checks,
            Err(e) => {
                tracing::warn!("Failed to list checks: {}", e);
                self.counters.record_failure();
                return self.counters.families();
            }
        };

        // Label sets of the previous scrape are not carried over.
        self.gauges.reset();

        let mut lookups = JoinSet::new();
        for (id, check) in checks {
            let source = Arc::clone(&self.source);
            let gauges = self.gauges.clone();
            let counters = self.counters.clone();

            lookups.spawn(async move {
                match source.latest_result(&id).await {
                    Ok(result) => {
                        if !result.success {
                            tracing::debug!(
                                "Check {} is down: {} {}",
                                check.label,
                                result.result,
                                result.message
                            );
                        }
                        gauges.publish(&CheckLabels::new(&check, &result), &result);
                        true
                    }
                    Err(e) => {
                        tracing::warn!("Failed to get result for check {} ({}): {}", check.label, id, e);
                        counters.record_failure();
                        false
                    }
                }
            });
        }

        let mut published = 0usize;
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok(true) => published += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Check lookup task failed: {}", e);
                    self.counters.record_failure();
                }
            }
        }

        tracing::debug!(
            "Scrape finished with {} published checks ({} scrapes, {} failures so far)",
            published,
            self.counters.total(),
            self.counters.failed()
        );

        let mut families = Vec::new();
        if published > 0 {
            families.extend(self.gauges.families());
        }
        families.extend(self.counters.families());
        families
    }
}
