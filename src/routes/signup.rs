use crate::configuration::ContentSettings;
use crate::domain::Signup;
use crate::email_client::{MailDelivery, OutgoingMail};
use crate::templates;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use std::fmt::Formatter;

const WELCOME_SUBJECT: &str = "Welcome to the DevDigest newsletter";

#[derive(serde::Deserialize)]
pub struct FormData {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl From<FormData> for Signup {
    fn from(form: FormData) -> Self {
        Signup {
            first_name: form.first_name.unwrap_or_default(),
            last_name: form.last_name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SignupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignupError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignupError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[tracing::instrument(
    name = "Handling a newsletter signup",
    skip(form, mailer, content)
)]
pub async fn signup(
    form: web::Form<FormData>,
    mailer: web::Data<dyn MailDelivery>,
    content: web::Data<ContentSettings>,
) -> Result<HttpResponse, SignupError> {
    let signup = Signup::from(form.0);

    let welcome_body = templates::render_file(
        &content.templates_dir.join("welcome_email.html"),
        &[
            ("first_name", signup.first_name.as_str()),
            ("last_name", signup.last_name.as_str()),
        ],
    )
    .context("Failed to render the welcome email template")?;

    let receipt = mailer
        .deliver(OutgoingMail {
            to: signup.email.clone(),
            subject: WELCOME_SUBJECT.to_owned(),
            html_body: welcome_body,
            inline_logo: content.static_dir.join("image/logo.png"),
        })
        .await
        .context("Failed to send the welcome email")?;

    let confirmation = templates::render_file(
        &content.templates_dir.join("confirmation.html"),
        &[
            ("first_name", signup.first_name.as_str()),
            ("preview_url", receipt.preview_url.as_str()),
        ],
    )
    .context("Failed to render the confirmation page template")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(confirmation))
}
