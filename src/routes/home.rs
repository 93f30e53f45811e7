use crate::configuration::ContentSettings;
use actix_files::NamedFile;
use actix_web::web;

// Served straight from disk so the response stays byte-identical to the file.
pub async fn signup_form(
    content: web::Data<ContentSettings>,
) -> Result<NamedFile, std::io::Error> {
    NamedFile::open_async(content.static_dir.join("index.html")).await
}
