//! Report delivery interface
//!
//! Delivery is an external collaborator: transport, retries, and
//! authentication live outside this crate. The core hands over one finished
//! document per run; a delivery failure aborts the run after rendering.

pub mod outbox;

pub use outbox::OutboxMailer;

use crate::error::CostwatchResult;

/// A finished report ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEmail {
    /// Subject line
    pub subject: String,
    /// Sender address
    pub sender: String,
    /// Recipient addresses
    pub recipients: Vec<String>,
    /// The HTML report body
    pub html_body: String,
    /// Fallback body for non-HTML mail clients
    pub text_body: String,
}

/// Accepts a finished report for delivery.
pub trait ReportMailer {
    fn deliver(&self, email: &ReportEmail) -> CostwatchResult<()>;
}
