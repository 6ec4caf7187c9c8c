//! Emails the finished workbook to the configured recipient.

use crate::config::EmailConfig;
use chrono::{Local, NaiveDate};
use lettre::message::header::{ContentType, ContentTypeErr};
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const BODY_TEXT: &str = "Please find the attached weekly report.";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to read report attachment '{0}'")]
    ReadAttachment(PathBuf, #[source] std::io::Error),

    #[error("invalid mailbox address '{0}'")]
    Address(String, #[source] lettre::address::AddressError),

    #[error("invalid attachment content type")]
    ContentType(#[from] ContentTypeErr),

    #[error("failed to assemble report email")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery via '{host}' failed")]
    Smtp {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}

/// Subject line for a report generated on `date`.
pub fn report_subject(date: NaiveDate) -> String {
    format!("Weekly Data Center Sensor Report - {}", date.format("%Y-%m-%d"))
}

/// Sends the workbook at `workbook_path` as an attachment to the configured
/// recipient, subject stamped with today's date.
pub async fn send_report(config: &EmailConfig, workbook_path: &Path) -> Result<(), NotifyError> {
    let bytes = tokio::fs::read(workbook_path)
        .await
        .map_err(|e| NotifyError::ReadAttachment(workbook_path.to_path_buf(), e))?;
    let filename = workbook_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Rack_Sensor_Data.xlsx".to_string());

    let content_type = ContentType::parse(XLSX_MIME)?;
    let email = Message::builder()
        .from(parse_mailbox(&config.from)?)
        .to(parse_mailbox(&config.recipient)?)
        .subject(report_subject(Local::now().date_naive()))
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(BODY_TEXT.to_string()))
                .singlepart(Attachment::new(filename).body(bytes, content_type)),
        )?;

    let mailer: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .build();

    info!(
        "sending report to {} via {}:{}",
        config.recipient, config.smtp_host, config.smtp_port
    );
    mailer.send(email).await.map_err(|e| NotifyError::Smtp {
        host: config.smtp_host.clone(),
        source: e,
    })?;
    Ok(())
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse()
        .map_err(|e| NotifyError::Address(address.to_string(), e))
}
