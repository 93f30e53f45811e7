use crate::configuration::MailSettings;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub inline_logo: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub preview_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to provision a test mailbox: {0}")]
    Provision(#[from] reqwest::Error),
    #[error("invalid email address: {0}")]
    Address(#[from] AddressError),
    #[error("failed to build the message: {0}")]
    Compose(#[from] lettre::error::Error),
    #[error("failed to read the inline attachment: {0}")]
    Attachment(#[from] std::io::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("the SMTP response did not carry a message id")]
    MissingMessageId,
}

#[async_trait::async_trait]
pub trait MailDelivery: Send + Sync {
    async fn deliver(&self, mail: OutgoingMail) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Sends mail through an Ethereal-style test service: every delivery
/// provisions a throwaway SMTP account over HTTP, relays the message through
/// it and reports back a browser link to the captured message.
pub struct EtherealClient {
    http_client: reqwest::Client,
    provision_url: String,
    smtp_host: String,
    smtp_port: u16,
    preview_base_url: String,
    sender: Mailbox,
    timeout: Duration,
}

#[derive(serde::Deserialize, Debug)]
struct ProvisionedAccount {
    user: String,
    pass: Secret<String>,
}

impl EtherealClient {
    pub fn new(settings: MailSettings) -> Result<Self, AddressError> {
        let sender = settings.sender()?;
        let timeout = settings.timeout();
        Ok(Self {
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap(),
            provision_url: settings.provision_url,
            smtp_host: settings.smtp_host,
            smtp_port: settings.smtp_port,
            preview_base_url: settings.preview_base_url,
            sender,
            timeout,
        })
    }

    #[tracing::instrument(name = "Provisioning a test mailbox", skip(self))]
    async fn provision_account(&self) -> Result<ProvisionedAccount, reqwest::Error> {
        self.http_client
            .post(&self.provision_url)
            .json(&serde_json::json!({
                "requestor": "newsletter-signup",
                "version": env!("CARGO_PKG_VERSION"),
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<ProvisionedAccount>()
            .await
    }

    fn preview_url(&self, message_id: &str) -> String {
        format!(
            "{base}/message/{id}",
            base = self.preview_base_url.trim_end_matches('/'),
            id = message_id
        )
    }
}

#[async_trait::async_trait]
impl MailDelivery for EtherealClient {
    #[tracing::instrument(
        name = "Sending a welcome email",
        skip(self, mail),
        fields(mail_to = %mail.to)
    )]
    async fn deliver(&self, mail: OutgoingMail) -> Result<DeliveryReceipt, DeliveryError> {
        let account = self.provision_account().await?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)?
            .port(self.smtp_port)
            .credentials(Credentials::new(
                account.user,
                account.pass.expose_secret().to_owned(),
            ))
            .timeout(Some(self.timeout))
            .build();

        let logo = std::fs::read(&mail.inline_logo)?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject)
            .multipart(
                MultiPart::related()
                    .singlepart(SinglePart::html(mail.html_body))
                    .singlepart(
                        Attachment::new_inline("logo".to_owned())
                            .body(logo, ContentType::parse("image/png").unwrap()),
                    ),
            )?;

        let response = mailer.send(message).await?;
        let response_text = response.message().collect::<Vec<_>>().join(" ");
        let message_id =
            message_id(&response_text).ok_or(DeliveryError::MissingMessageId)?;

        Ok(DeliveryReceipt {
            preview_url: self.preview_url(message_id),
        })
    }
}

// The acceptance line looks like `250 Accepted [STATUS=new MSGID=abc123]`.
fn message_id(response: &str) -> Option<&str> {
    response
        .split_whitespace()
        .find_map(|token| token.strip_prefix("MSGID="))
        .map(|id| id.trim_end_matches(']'))
}
