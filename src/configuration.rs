use lettre::address::AddressError;
use lettre::message::Mailbox;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use std::time::Duration;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub mail: MailSettings,
    pub content: ContentSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct MailSettings {
    pub provision_url: String,
    pub smtp_host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub smtp_port: u16,
    pub preview_base_url: String,
    pub sender: String,
    pub timeout_milliseconds: u64,
}

impl MailSettings {
    pub fn sender(&self) -> Result<Mailbox, AddressError> {
        self.sender.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ContentSettings {
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();

    // Read config file
    settings.merge(config::File::with_name("config"))?;

    // Parse config file into Settings struct
    settings.try_into()
}
