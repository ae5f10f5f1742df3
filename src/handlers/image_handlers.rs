// src/handlers/image_handlers.rs
use std::path::Path;
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use futures::StreamExt;
use log::{error, info, warn};
use tokio::io::AsyncWriteExt;
use crate::dtos::image_dtos::{GenerateImageIn, ImageUrlOut};
use crate::services::image_service;
use crate::AppState;

const UPLOAD_FIELD: &str = "image";

/// POST /generate-image
#[post("/generate-image")]
pub async fn generate_image(
    app_state: web::Data<AppState>,
    body: web::Json<GenerateImageIn>,
) -> HttpResponse {
    let result = image_service::generate_and_store(
        &app_state.openai,
        &app_state.http_client,
        &app_state.assets,
        app_state.image_delivery,
        &body.description,
    )
    .await;

    match result {
        Ok(image_url) => HttpResponse::Ok().json(ImageUrlOut { image_url }),
        Err(e) => {
            error!("Error generating image [{} stage]: {}", e.stage(), e);
            HttpResponse::InternalServerError().body("Error generating image")
        }
    }
}

/// POST /upload-image
/// Stores the multipart field `image` as-is under `uploads/<millis>-<name>`
/// (`<millis>-<n>-<name>` when that name is already taken).
#[post("/upload-image")]
pub async fn upload_image(
    app_state: web::Data<AppState>,
    mut payload: Multipart,
) -> HttpResponse {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!("Unreadable multipart payload: {}", e);
                break;
            }
        };

        let original = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string());
        let is_upload = field.name() == Some(UPLOAD_FIELD);

        let Some(original) = original.filter(|_| is_upload) else {
            // drain fields we do not store
            while let Some(chunk) = field.next().await {
                if chunk.is_err() {
                    break;
                }
            }
            continue;
        };

        let (mut file, file_name, relative) = match app_state.assets.create_upload(Utc::now(), &original).await {
            Ok(created) => created,
            Err(e) => {
                error!("Error creating upload file for {:?}: {}", original, e);
                return HttpResponse::InternalServerError().body("Error saving image");
            }
        };

        let mut written: usize = 0;
        while let Some(chunk) = field.next().await {
            let write = match chunk {
                Ok(bytes) => {
                    written += bytes.len();
                    file.write_all(&bytes).await.map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = write {
                error!("Error storing upload {}: {}", file_name, e);
                drop(file);
                let _ = app_state.assets.remove(&file_name).await;
                return HttpResponse::InternalServerError().body("Error saving image");
            }
        }

        if let Err(e) = file.flush().await {
            error!("Error flushing upload {}: {}", file_name, e);
            return HttpResponse::InternalServerError().body("Error saving image");
        }

        info!("Stored upload {} ({} bytes)", relative, written);
        return HttpResponse::Ok().json(ImageUrlOut { image_url: relative });
    }

    HttpResponse::BadRequest().body("No file uploaded.")
}

/// GET /uploads/{filename}
/// Serves uploaded and generated assets so returned paths resolve.
#[get("/uploads/{filename}")]
pub async fn serve_upload(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let filename = path.into_inner();
    let Some(file_path) = app_state.assets.resolve(&filename) else {
        return HttpResponse::NotFound().body("File not found");
    };

    match tokio::fs::read(&file_path).await {
        Ok(data) => HttpResponse::Ok()
            .content_type(content_type_for(&file_path))
            .body(data),
        Err(_) => HttpResponse::NotFound().body("File not found"),
    }
}

fn content_type_for(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("bmp") => mime::IMAGE_BMP,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
