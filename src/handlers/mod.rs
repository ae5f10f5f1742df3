pub mod image_handlers;
pub mod lyrics_handlers;
pub mod post_handlers;
pub mod user_handlers;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use log::error;

/// Plain-text body a route answers with when it fails.
fn failure_body(path: &str) -> &'static str {
    match path {
        "/saveUser" => "Error saving user to the database",
        "/generate-image" => "Error generating image",
        _ => "Server error",
    }
}

/// Unreadable JSON bodies get the route's usual 500, not a serde message.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Invalid JSON body for {} {}: {}", req.method(), req.path(), err);
    let response = HttpResponse::InternalServerError().body(failure_body(req.path()));
    InternalError::from_response(err, response).into()
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.service(lyrics_handlers::get_lyrics)
        .service(user_handlers::save_user)
        .service(post_handlers::create_post)
        .service(post_handlers::list_posts)
        .service(post_handlers::get_post)
        .service(image_handlers::generate_image)
        .service(image_handlers::upload_image)
        .service(image_handlers::serve_upload);
}
