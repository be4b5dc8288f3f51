use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_smtp::authentication::{Credentials, Mechanism};
use async_smtp::{Envelope, SendableEmail, SmtpClient, SmtpTransport};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::io::BufStream;
use tokio::net::TcpStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use uuid::Uuid;

use crate::configuration::Settings;

// One attempt, no retry
pub async fn send_results_email(
    settings: &Settings,
    to: &str,
    subject: &str,
    body: &str,
    attachment: &Path,
) -> anyhow::Result<()> {
    let attachment_bytes = std::fs::read(attachment)
        .with_context(|| format!("reading attachment {}", attachment.display()))?;
    let attachment_name = attachment
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("results.csv");

    let message = build_mime_message(
        &settings.smtp_user,
        to,
        subject,
        body,
        attachment_name,
        &attachment_bytes,
    );
    let envelope = Envelope::new(
        Some(settings.smtp_user.parse().context("sender address")?),
        vec![to.parse().context("recipient address")?],
    )?;
    let email = SendableEmail::new(envelope, message.as_str());

    let stream = open_tls_stream(&settings.smtp_server, settings.smtp_port).await?;
    let mut transport = SmtpTransport::new(SmtpClient::new(), stream)
        .await
        .context("smtp session setup")?;
    transport
        .try_login(
            &Credentials::new(settings.smtp_user.clone(), settings.smtp_password.clone()),
            &[Mechanism::Plain, Mechanism::Login],
        )
        .await
        .context("smtp login")?;
    transport.send(email).await.context("smtp send")?;
    transport.quit().await.context("smtp quit")?;

    Ok(())
}

async fn open_tls_stream(
    server: &str,
    port: u16,
) -> anyhow::Result<BufStream<tokio_rustls::client::TlsStream<TcpStream>>> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(tls_config));
    let server_name = ServerName::try_from(server.to_string()).context("smtp server name")?;

    let tcp = TcpStream::connect((server, port))
        .await
        .with_context(|| format!("connecting to {}:{}", server, port))?;
    let tls = connector
        .connect(server_name, tcp)
        .await
        .context("tls handshake")?;

    Ok(BufStream::new(tls))
}

pub fn build_mime_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    attachment_name: &str,
    attachment: &[u8],
) -> String {
    let boundary = format!("=-{}", Uuid::new_v4().simple());
    let payload = wrap_mime_lines(&STANDARD.encode(attachment));

    format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\n\
         Content-Type: multipart/mixed; boundary=\"{}\"\r\n\r\n\
         --{}\r\nContent-Type: text/plain; charset=\"utf-8\"\r\n\r\n{}\r\n\
         --{}\r\nContent-Type: application/octet-stream\r\n\
         Content-Transfer-Encoding: base64\r\n\
         Content-Disposition: attachment; filename=\"{}\"\r\n\r\n{}\r\n--{}--\r\n",
        from, to, subject, boundary, boundary, body, boundary, attachment_name, payload, boundary
    )
}

// RFC 2045 caps encoded lines at 76 characters
fn wrap_mime_lines(encoded: &str) -> String {
    encoded
        .as_bytes()
        .chunks(76)
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join("\r\n")
}
