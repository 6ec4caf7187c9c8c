use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("PDU name '{0}' does not contain a hyphen-separated rack segment")]
    PduNameFormat(String),

    #[error("rack name '{0}' is shorter than the two-character row code")]
    RackNameTooShort(String),
}
