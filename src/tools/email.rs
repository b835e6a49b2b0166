//! Email sending over SMTP with STARTTLS.
//!
//! Credentials come from the GMAIL_USER / GMAIL_PASSWORD environment
//! variables (lowercase variants accepted for compatibility with the old
//! .env files); they are never stored in config.

use anyhow::{bail, Context};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;

fn env_either(upper: &str, lower: &str) -> Option<String> {
    std::env::var(upper).or_else(|_| std::env::var(lower)).ok()
}

pub async fn send_email(
    config: &EmailConfig,
    to_email: &str,
    subject: &str,
    body: &str,
    cc_email: Option<&str>,
) -> anyhow::Result<String> {
    let Some(user) = env_either("GMAIL_USER", "gmail_user") else {
        bail!("Gmail credentials not set in environment (GMAIL_USER)");
    };
    let Some(password) = env_either("GMAIL_PASSWORD", "gmail_password") else {
        bail!("Gmail credentials not set in environment (GMAIL_PASSWORD)");
    };

    let mut builder = Message::builder()
        .from(user.parse().context("sender address invalid")?)
        .to(to_email
            .parse()
            .with_context(|| format!("recipient address '{to_email}' invalid"))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN);

    if let Some(cc) = cc_email {
        builder = builder.cc(cc
            .parse()
            .with_context(|| format!("cc address '{cc}' invalid"))?);
    }

    let message = builder
        .body(body.to_string())
        .context("failed to build message")?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
        .context("failed to configure SMTP transport")?
        .port(config.smtp_port)
        .credentials(Credentials::new(user, password))
        .build();

    transport
        .send(message)
        .await
        .context("SMTP send failed")?;

    info!("Email sent to {to_email} (cc: {cc_email:?})");
    Ok(format!("Email sent to {to_email}."))
}
