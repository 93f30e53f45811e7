use std::net::TcpListener;
use std::sync::Arc;

use actix_files::Files;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use crate::configuration::ContentSettings;
use crate::email_client::MailDelivery;
use crate::routes;
use actix_web::web::Data;
use tracing_actix_web::TracingLogger;

pub fn run(
    listener: TcpListener,
    mailer: Arc<dyn MailDelivery>,
    content: ContentSettings,
) -> Result<Server, std::io::Error> {
    let mailer: Data<dyn MailDelivery> = Data::from(mailer);
    let content = Data::new(content);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check::health_check))
            .route("/", web::get().to(routes::home::signup_form))
            .route("/", web::post().to(routes::signup::signup))
            // Anything else falls through to the public assets directory
            .service(Files::new("/", content.static_dir.clone()))
            .app_data(mailer.clone())
            .app_data(content.clone())
    })
        .listen(listener)?
        .run();
    Ok(server)
}
