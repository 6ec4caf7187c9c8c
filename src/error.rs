use crate::export::ExportError;
use crate::hyperview::HyperviewError;
use crate::notify::NotifyError;
use crate::report::error::ReportError;
use crate::report::records::MetricKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RackReportError {
    #[error(transparent)]
    Hyperview(#[from] HyperviewError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("rack '{rack_id}' has no {kind} sensor")]
    MissingSensor { rack_id: String, kind: MetricKind },

    #[error("rack '{rack_id}' has no matching sensors, so no PDU name")]
    MissingPduName { rack_id: String },
}
