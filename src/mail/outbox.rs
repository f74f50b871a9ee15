//! Filesystem outbox delivery
//!
//! Writes the rendered report into a directory instead of handing it to a
//! mail relay. Useful for local runs, operator review, and as the delivery
//! target when an external process picks reports up for sending.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{ReportEmail, ReportMailer};
use crate::error::{CostwatchError, CostwatchResult};

/// Delivers reports by writing them to a local directory
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path the HTML body is written to
    pub fn html_path(&self) -> PathBuf {
        self.dir.join("cost-report.html")
    }

    /// Path the plain-text fallback is written to
    pub fn text_path(&self) -> PathBuf {
        self.dir.join("cost-report.txt")
    }
}

impl ReportMailer for OutboxMailer {
    fn deliver(&self, email: &ReportEmail) -> CostwatchResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CostwatchError::Delivery(format!(
                "cannot create outbox {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        std::fs::write(self.html_path(), &email.html_body)
            .map_err(|e| CostwatchError::Delivery(format!("cannot write HTML report: {}", e)))?;
        std::fs::write(self.text_path(), &email.text_body)
            .map_err(|e| CostwatchError::Delivery(format!("cannot write text report: {}", e)))?;

        info!(
            subject = %email.subject,
            recipients = email.recipients.len(),
            outbox = %self.dir.display(),
            "report written to outbox"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn email() -> ReportEmail {
        ReportEmail {
            subject: "Periodic Cost Report".to_string(),
            sender: "reports@example.com".to_string(),
            recipients: vec!["ops@example.com".to_string()],
            html_body: "<h2>report</h2>".to_string(),
            text_body: "plain".to_string(),
        }
    }

    #[test]
    fn test_deliver_writes_both_bodies() {
        let temp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp.path().join("outbox"));

        mailer.deliver(&email()).unwrap();

        let html = std::fs::read_to_string(mailer.html_path()).unwrap();
        let text = std::fs::read_to_string(mailer.text_path()).unwrap();
        assert_eq!(html, "<h2>report</h2>");
        assert_eq!(text, "plain");
    }

    #[test]
    fn test_deliver_overwrites_previous_run() {
        let temp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp.path());

        mailer.deliver(&email()).unwrap();
        let mut second = email();
        second.html_body = "<h2>newer</h2>".to_string();
        mailer.deliver(&second).unwrap();

        let html = std::fs::read_to_string(mailer.html_path()).unwrap();
        assert_eq!(html, "<h2>newer</h2>");
    }
}
