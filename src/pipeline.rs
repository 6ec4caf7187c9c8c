//! The batch pipeline: fetch, reshape, export, notify, strictly in order.

use crate::config::{FailurePolicy, ReportConfig};
use crate::error::RackReportError;
use crate::export::{write_workbook, ReportTables};
use crate::hyperview::catalog::{extract_sensor_pair, SensorTypeIds};
use crate::hyperview::summary::DailySummaryPoint;
use crate::hyperview::HyperviewClient;
use crate::notify;
use crate::report::aggregate::{aggregate, round_records};
use crate::report::flatten::flatten;
use crate::report::records::{extract_rack_name, MetricKind, RackSummaries};
use log::{info, warn};
use std::path::PathBuf;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Where the workbook was written.
    pub output_path: PathBuf,
    /// Racks that contributed records to the report.
    pub racks_reported: usize,
    /// Racks skipped under a `skip` policy.
    pub racks_skipped: usize,
}

/// One report run over one configuration.
///
/// # Examples
///
/// ```no_run
/// # use rackreport::{ApiConfig, RackReportError, ReportConfig, ReportPipeline};
/// # async fn run() -> Result<(), RackReportError> {
/// let config = ReportConfig::builder()
///     .api(
///         ApiConfig::builder()
///             .base_url("https://dcim.example.com".to_string())
///             .client_id("client-id".to_string())
///             .client_secret("client-secret".to_string())
///             .build(),
///     )
///     .racks(vec!["rack-asset-id".to_string()])
///     .build();
///
/// let outcome = ReportPipeline::new(config).run().await?;
/// println!("wrote {}", outcome.output_path.display());
/// # Ok(())
/// # }
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
}

impl ReportPipeline {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Executes the whole run: token exchange, per-rack catalog and summary
    /// fetches in config order, flatten, weekly aggregation, workbook
    /// export, and (when email is configured) notification.
    ///
    /// Every stage consumes the prior stage's full output; fetches are
    /// issued one at a time. Under the default `abort` policies the first
    /// failure ends the run with no partial output.
    pub async fn run(&self) -> Result<ReportOutcome, RackReportError> {
        let client = HyperviewClient::connect(&self.config.api).await?;
        let types = SensorTypeIds {
            humidity: self.config.api.humidity_type_id.clone(),
            temperature: self.config.api.temperature_type_id.clone(),
        };

        let mut summaries = Vec::with_capacity(self.config.racks.len());
        let mut skipped = 0usize;
        for rack_id in &self.config.racks {
            match self.collect_rack(&client, &types, rack_id).await {
                Ok(Some(rack)) => summaries.push(rack),
                Ok(None) => skipped += 1,
                // The skip policy covers HTTP failures only; data-quality
                // and naming-contract violations abort regardless.
                Err(err @ RackReportError::Hyperview(_))
                    if self.config.report.on_rack_error == FailurePolicy::Skip =>
                {
                    warn!("skipping rack {rack_id}: {err}");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            "collected summaries for {} racks ({} skipped)",
            summaries.len(),
            skipped
        );

        let (mut temperature, mut humidity) = flatten(&summaries);
        let temperature_weekly = aggregate(&temperature)?;
        let humidity_weekly = aggregate(&humidity)?;
        round_records(&mut temperature);
        round_records(&mut humidity);

        let tables = ReportTables {
            temperature_daily: temperature,
            temperature_weekly,
            humidity_daily: humidity,
            humidity_weekly,
        };
        let output_path = self.config.report.output_path.clone();
        write_workbook(&output_path, &tables)?;
        info!("wrote workbook to {}", output_path.display());

        if let Some(email) = &self.config.email {
            notify::send_report(email, &output_path).await?;
        }

        Ok(ReportOutcome {
            output_path,
            racks_reported: summaries.len(),
            racks_skipped: skipped,
        })
    }

    /// Fetches one rack's catalog and both summaries.
    ///
    /// `Ok(None)` means the rack was dropped under the missing-sensor skip
    /// policy because no matching sensor supplied a PDU name.
    async fn collect_rack(
        &self,
        client: &HyperviewClient,
        types: &SensorTypeIds,
        rack_id: &str,
    ) -> Result<Option<RackSummaries>, RackReportError> {
        let sensors = client.fetch_sensors(rack_id).await?;
        let pair = extract_sensor_pair(&sensors, types);

        let Some(pdu_name) = pair.pdu_name else {
            return match self.config.report.on_missing_sensor {
                FailurePolicy::Abort => Err(RackReportError::MissingPduName {
                    rack_id: rack_id.to_string(),
                }),
                FailurePolicy::Skip => {
                    warn!("rack {rack_id} has no matching sensors; dropping it");
                    Ok(None)
                }
            };
        };
        let rack = extract_rack_name(&pdu_name)?;

        let humidity = self
            .fetch_metric(client, rack_id, MetricKind::Humidity, pair.humidity_id.as_deref())
            .await?;
        let temperature = self
            .fetch_metric(
                client,
                rack_id,
                MetricKind::Temperature,
                pair.temperature_id.as_deref(),
            )
            .await?;

        Ok(Some(RackSummaries {
            rack,
            temperature,
            humidity,
        }))
    }

    /// Fetches one metric's summary, honoring the missing-sensor policy.
    async fn fetch_metric(
        &self,
        client: &HyperviewClient,
        rack_id: &str,
        kind: MetricKind,
        sensor_id: Option<&str>,
    ) -> Result<Vec<DailySummaryPoint>, RackReportError> {
        match sensor_id {
            Some(sensor_id) => Ok(client.fetch_summary(sensor_id).await?),
            None => match self.config.report.on_missing_sensor {
                FailurePolicy::Abort => Err(RackReportError::MissingSensor {
                    rack_id: rack_id.to_string(),
                    kind,
                }),
                FailurePolicy::Skip => {
                    warn!("rack {rack_id} has no {kind} sensor; skipping that metric");
                    Ok(Vec::new())
                }
            },
        }
    }
}
