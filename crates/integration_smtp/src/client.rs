//! SMTP mailer
//!
//! Lightweight async SMTP implementation over tokio and
//! tokio-native-tls. Implicit TLS on port 465, STARTTLS otherwise;
//! AUTH PLAIN only when credentials are configured.

use async_trait::async_trait;
use base64::Engine;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
};
use tokio_native_tls::TlsConnector;
use tracing::{debug, error, instrument, trace};

use application::ports::{AlertMessage, DeliveryError, MailerPort};

use crate::SmtpConfig;

/// SMTP mail transport
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a new mailer with the given configuration
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Builds a TLS connector using the system trust store
    fn build_tls_connector() -> Result<TlsConnector, DeliveryError> {
        let native_connector = native_tls::TlsConnector::builder()
            .min_protocol_version(Some(native_tls::Protocol::Tlsv12))
            .build()
            .map_err(|e| DeliveryError::ConnectionFailed(format!("TLS builder failed: {e}")))?;

        Ok(TlsConnector::from(native_connector))
    }

    /// Builds the message content in RFC 5322 format
    fn build_message_content(&self, message: &AlertMessage, message_id: &str) -> String {
        let date = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S +0000");

        let headers = format!(
            "From: {}\r\n\
             To: {}\r\n\
             Subject: {}\r\n\
             Date: {}\r\n\
             Message-ID: {}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             Content-Transfer-Encoding: 8bit\r\n",
            self.config.from, message.to, message.subject, date, message_id
        );

        format!("{headers}\r\n{}", message.body)
    }

    /// Generates a Message-ID from the sender's domain
    fn message_id(&self) -> String {
        format!(
            "<{}.{}@{}>",
            chrono::Utc::now().timestamp_millis(),
            std::process::id(),
            Self::extract_domain(self.config.from.as_str())
        )
    }

    /// Extracts the domain from an email address
    fn extract_domain(email: &str) -> &str {
        email.split('@').nth(1).unwrap_or("localhost")
    }

    /// Escapes leading dots per the SMTP DATA transparency rule
    fn escape_leading_dots(content: &str) -> String {
        content.replace("\r\n.", "\r\n..")
    }

    /// Sends the message via SMTP
    async fn send_smtp(&self, to: &str, content: &str) -> Result<(), DeliveryError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let stream = TcpStream::connect(&addr).await.map_err(|e| {
            error!(error = %e, "Failed to connect to SMTP server");
            DeliveryError::ConnectionFailed(format!("SMTP connection failed: {e}"))
        })?;

        // Port 465 speaks TLS from the first byte
        if self.config.port == 465 {
            let tls = Self::build_tls_connector()?;
            let tls_stream = tls.connect(&self.config.host, stream).await.map_err(|e| {
                DeliveryError::ConnectionFailed(format!("TLS handshake failed: {e}"))
            })?;

            self.smtp_session(tls_stream, to, content, true).await
        } else {
            self.smtp_starttls_session(stream, to, content).await
        }
    }

    /// Handles an SMTP session that upgrades via STARTTLS
    async fn smtp_starttls_session(
        &self,
        stream: TcpStream,
        to: &str,
        content: &str,
    ) -> Result<(), DeliveryError> {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        // Greeting
        Self::read_response(&mut reader).await?;

        Self::send_command(&mut writer, &format!("EHLO {}", Self::ehlo_hostname())).await?;
        Self::read_response(&mut reader).await?;

        Self::send_command(&mut writer, "STARTTLS").await?;
        Self::read_response(&mut reader).await?;

        let stream = reader.into_inner().unsplit(writer);

        let tls = Self::build_tls_connector()?;
        let tls_stream = tls.connect(&self.config.host, stream).await.map_err(|e| {
            DeliveryError::ConnectionFailed(format!("STARTTLS upgrade failed: {e}"))
        })?;

        self.smtp_session(tls_stream, to, content, false).await
    }

    /// Handles the SMTP dialogue over an established (TLS) stream
    ///
    /// `read_greeting` is set on the implicit-TLS path, where the server
    /// speaks first. After a STARTTLS upgrade the client must EHLO without
    /// waiting for a greeting (RFC 3207).
    async fn smtp_session<S>(
        &self,
        stream: S,
        to: &str,
        content: &str,
        read_greeting: bool,
    ) -> Result<(), DeliveryError>
    where
        S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        if read_greeting {
            Self::read_response(&mut reader).await?;
        }

        Self::send_command(&mut writer, &format!("EHLO {}", Self::ehlo_hostname())).await?;
        Self::read_response(&mut reader).await?;

        // Some relays accept mail without authentication
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            let auth_string = format!("\0{username}\0{password}");
            let auth_b64 = base64::engine::general_purpose::STANDARD.encode(auth_string);

            Self::send_command(&mut writer, &format!("AUTH PLAIN {auth_b64}")).await?;
            let auth_response = Self::read_response(&mut reader).await?;
            if !auth_response.starts_with("235") {
                return Err(DeliveryError::AuthenticationFailed);
            }
        }

        Self::send_command(
            &mut writer,
            &format!("MAIL FROM:<{}>", self.config.from),
        )
        .await?;
        Self::expect_response(&mut reader, "250").await?;

        Self::send_command(&mut writer, &format!("RCPT TO:<{to}>")).await?;
        Self::expect_response(&mut reader, "250").await?;

        Self::send_command(&mut writer, "DATA").await?;
        Self::expect_response(&mut reader, "354").await?;

        let escaped_content = Self::escape_leading_dots(content);
        writer
            .write_all(escaped_content.as_bytes())
            .await
            .map_err(|e| DeliveryError::Rejected(format!("Failed to send content: {e}")))?;

        writer
            .write_all(b"\r\n.\r\n")
            .await
            .map_err(|e| DeliveryError::Rejected(format!("Failed to end DATA: {e}")))?;
        writer.flush().await.ok();

        Self::expect_response(&mut reader, "250").await?;

        Self::send_command(&mut writer, "QUIT").await?;
        // Server may close the connection without answering QUIT

        Ok(())
    }

    fn ehlo_hostname() -> String {
        hostname::get().map_or_else(
            |_| "localhost".to_string(),
            |h| h.to_string_lossy().to_string(),
        )
    }

    /// Sends an SMTP command
    async fn send_command<W>(writer: &mut W, command: &str) -> Result<(), DeliveryError>
    where
        W: tokio::io::AsyncWrite + Unpin,
    {
        trace!(command = %command.split(' ').next().unwrap_or(command), "Sending SMTP command");
        writer
            .write_all(format!("{command}\r\n").as_bytes())
            .await
            .map_err(|e| DeliveryError::Rejected(format!("Failed to send command: {e}")))?;
        writer.flush().await.ok();
        Ok(())
    }

    /// Reads a (possibly multi-line) SMTP response
    async fn read_response<R>(reader: &mut BufReader<R>) -> Result<String, DeliveryError>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let mut response = String::new();
        loop {
            let mut line = String::new();
            let bytes = reader
                .read_line(&mut line)
                .await
                .map_err(|e| DeliveryError::Rejected(format!("Failed to read response: {e}")))?;

            // EOF: the server closed the connection mid-dialogue
            if bytes == 0 {
                return Err(DeliveryError::ConnectionFailed(
                    "connection closed by server".to_string(),
                ));
            }

            trace!(line = %line.trim(), "SMTP response");
            response.push_str(&line);

            // Last line has a space (not a hyphen) after the code
            if line.len() >= 4 && line.chars().nth(3) != Some('-') {
                break;
            }
        }
        Ok(response)
    }

    /// Expects a specific response code
    async fn expect_response<R>(
        reader: &mut BufReader<R>,
        expected_code: &str,
    ) -> Result<(), DeliveryError>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let response = Self::read_response(reader).await?;
        if !response.starts_with(expected_code) {
            return Err(DeliveryError::Rejected(format!(
                "Expected {expected_code}, got: {response}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MailerPort for SmtpMailer {
    #[instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        debug!(subject = %message.subject, "Sending alert email");

        let message_id = self.message_id();
        let content = self.build_message_content(message, &message_id);

        self.send_smtp(message.to.as_str(), &content).await?;

        debug!(message_id = %message_id, "Alert email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::EmailAddress;

    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: None,
            password: None,
            from: EmailAddress::new("alerts@example.com").expect("valid email"),
        })
    }

    fn message() -> AlertMessage {
        AlertMessage::new(
            EmailAddress::new("rider@example.com").expect("valid email"),
            "Wind alert",
            "Good wind ahead.",
        )
    }

    #[test]
    fn message_content_carries_rfc5322_headers() {
        let content = mailer().build_message_content(&message(), "<123.456@example.com>");

        assert!(content.starts_with("From: alerts@example.com\r\n"));
        assert!(content.contains("To: rider@example.com\r\n"));
        assert!(content.contains("Subject: Wind alert\r\n"));
        assert!(content.contains("Message-ID: <123.456@example.com>\r\n"));
        assert!(content.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(content.ends_with("\r\nGood wind ahead."));
    }

    #[test]
    fn headers_and_body_are_separated_by_blank_line() {
        let content = mailer().build_message_content(&message(), "<id@example.com>");
        assert!(content.contains("\r\n\r\nGood wind ahead."));
    }

    #[test]
    fn message_id_uses_sender_domain() {
        let id = mailer().message_id();
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.com>"));
    }

    #[test]
    fn extract_domain_falls_back_to_localhost() {
        assert_eq!(SmtpMailer::extract_domain("user@example.com"), "example.com");
        assert_eq!(SmtpMailer::extract_domain("no-at-sign"), "localhost");
    }

    #[test]
    fn leading_dots_are_escaped() {
        let content = "line one\r\n.hidden command\r\nnormal";
        assert_eq!(
            SmtpMailer::escape_leading_dots(content),
            "line one\r\n..hidden command\r\nnormal"
        );
    }

    #[tokio::test]
    async fn multi_line_response_is_read_to_the_end() {
        let raw = b"250-smtp.example.com\r\n250-SIZE 35882577\r\n250 AUTH PLAIN\r\n";
        let mut reader = BufReader::new(&raw[..]);
        let response = SmtpMailer::read_response(&mut reader).await.expect("response");
        assert!(response.ends_with("250 AUTH PLAIN\r\n"));
        assert_eq!(response.lines().count(), 3);
    }

    #[tokio::test]
    async fn eof_mid_response_is_a_connection_failure() {
        // Continuation line, then the server drops the connection
        let raw = b"250-smtp.example.com\r\n";
        let mut reader = BufReader::new(&raw[..]);
        let err = SmtpMailer::read_response(&mut reader)
            .await
            .expect_err("connection closed");
        assert!(matches!(err, DeliveryError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn eof_before_any_response_is_a_connection_failure() {
        let raw = b"";
        let mut reader = BufReader::new(&raw[..]);
        let err = SmtpMailer::read_response(&mut reader)
            .await
            .expect_err("connection closed");
        assert!(matches!(err, DeliveryError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn unexpected_code_is_rejected() {
        let raw = b"550 mailbox unavailable\r\n";
        let mut reader = BufReader::new(&raw[..]);
        let err = SmtpMailer::expect_response(&mut reader, "250")
            .await
            .expect_err("rejection");
        assert!(matches!(err, DeliveryError::Rejected(_)));
    }
}
