use newsletter_signup::configuration::get_configuration;
use newsletter_signup::email_client::{EtherealClient, MailDelivery};
use newsletter_signup::startup::run;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        "newsletter-signup".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let config = get_configuration()
        .expect("Failed to read config file");
    let address = format!(
        "{address}:{port}",
        address = config.application.host,
        port = config.application.port
    );
    let listener = TcpListener::bind(address)?;
    let mailer: Arc<dyn MailDelivery> = Arc::new(
        EtherealClient::new(config.mail)
            .expect("Invalid sender address found in config")
    );

    run(listener, mailer, config.content)?.await
}
