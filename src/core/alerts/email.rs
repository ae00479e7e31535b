//! Email sink: batch every alert of a run into one message.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};

use crate::core::monitor::AlertSink;
use crate::error::{Result, WatchError};

pub const DEFAULT_SERVER: &str = "localhost";
pub const DEFAULT_FROM: &str = "alert@localhost";
pub const DEFAULT_SUBJECT: &str = "System Monitor Alert!";

fn mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| WatchError::config(format!("invalid email address '{}': {}", address, e)))
}

/// Buffers alerts and sends them in a single email when finished.
/// Nothing is sent for a run without alerts.
pub struct EmailSink {
    to: Mailbox,
    from: Mailbox,
    server: String,
    subject: String,
    messages: Vec<String>,
}

impl EmailSink {
    pub fn new(to: &str) -> Result<Self> {
        Ok(Self {
            to: mailbox(to)?,
            from: mailbox(DEFAULT_FROM)?,
            server: DEFAULT_SERVER.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            messages: Vec::new(),
        })
    }

    pub fn with_from(mut self, from: &str) -> Result<Self> {
        self.from = mailbox(from)?;
        Ok(self)
    }

    /// SMTP relay as `host` or `host:port`, reached without TLS or authentication
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn pending(&self) -> &[String] {
        &self.messages
    }

    pub fn body(&self) -> String {
        self.messages.join("\r\n")
    }

    fn compose(&self) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body())
            .map_err(|e| WatchError::email(e.to_string()))
    }

    fn send(&self) -> Result<()> {
        let email = self.compose()?;
        let relay = self
            .server
            .rsplit_once(':')
            .and_then(|(host, port)| port.parse::<u16>().ok().map(|port| (host, port)));
        let builder = match relay {
            Some((host, port)) => SmtpTransport::builder_dangerous(host).port(port),
            None => SmtpTransport::builder_dangerous(self.server.as_str()),
        };
        let mailer = builder.build();
        mailer
            .send(&email)
            .map_err(|e| WatchError::email(format!("sending via {}: {}", self.server, e)))?;
        Ok(())
    }
}

impl AlertSink for EmailSink {
    fn label(&self) -> String {
        format!("email:{}", self.to)
    }

    fn log_alert(&mut self, message: &str, _job_name: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        self.send()?;
        log::info!("Sent {} alert(s) to {}", self.messages.len(), self.to);
        self.messages.clear();
        Ok(())
    }
}
