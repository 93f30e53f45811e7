use newsletter_signup::configuration::get_configuration;
use newsletter_signup::email_client::{
    DeliveryError, DeliveryReceipt, MailDelivery, OutgoingMail,
};
use newsletter_signup::startup::run;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

static TRACING: Lazy<()> = Lazy::new(|| {

    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }

});

pub const STUB_PREVIEW_URL: &str = "https://mail.example.test/message/stub-message-id";

// In-process replacement for the external mail service: records every
// outgoing mail and hands back a fixed preview link.
pub struct StubMailer {
    preview_url: String,
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    failing: bool,
}

#[async_trait::async_trait]
impl MailDelivery for StubMailer {
    async fn deliver(&self, mail: OutgoingMail) -> Result<DeliveryReceipt, DeliveryError> {
        self.sent.lock().unwrap().push(mail);
        if self.failing {
            return Err(DeliveryError::MissingMessageId);
        }
        Ok(DeliveryReceipt {
            preview_url: self.preview_url.clone(),
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub sent_mail: Arc<Mutex<Vec<OutgoingMail>>>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_mailer(false).await
}

pub async fn spawn_app_with_failing_mailer() -> TestApp {
    spawn_app_with_mailer(true).await
}

async fn spawn_app_with_mailer(failing: bool) -> TestApp {
    Lazy::force(&TRACING);
    let config = get_configuration()
        .expect("Failed to read config file");

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr()
        .unwrap()
        .port();

    let sent_mail = Arc::new(Mutex::new(Vec::new()));
    let mailer = Arc::new(StubMailer {
        preview_url: STUB_PREVIEW_URL.to_string(),
        sent: sent_mail.clone(),
        failing,
    });

    let server = run(listener, mailer, config.content)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);
    // We return the application address to the caller!
    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        sent_mail,
    }
}
