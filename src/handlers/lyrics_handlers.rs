// src/handlers/lyrics_handlers.rs
use actix_web::{get, web, HttpResponse};
use log::{error, info, warn};
use crate::dtos::lyrics_dtos::{LyricsOut, LyricsQuery};
use crate::AppState;

/// Language the provider returns lyrics in; asking for it skips translation.
const SOURCE_LANG: &str = "en";

fn wants_translation(target_lang: Option<&str>) -> Option<&str> {
    target_lang
        .map(str::trim)
        .filter(|lang| !lang.is_empty() && *lang != SOURCE_LANG)
}

/// GET /lyrics?track=&artist=&targetLang=
#[get("/lyrics")]
pub async fn get_lyrics(
    app_state: web::Data<AppState>,
    query: web::Query<LyricsQuery>,
) -> HttpResponse {
    let query = query.into_inner();

    let lyrics = match app_state.lyrics.fetch_lyrics(&query.track, &query.artist).await {
        Ok(Some(lyrics)) => lyrics,
        Ok(None) => {
            warn!("Lyrics not found for track={:?} artist={:?}", query.track, query.artist);
            return HttpResponse::NotFound().body("Lyrics not found");
        }
        Err(e) => {
            error!("Error fetching lyrics for track={:?} artist={:?}: {}", query.track, query.artist, e);
            return HttpResponse::InternalServerError().body("Error fetching lyrics or translating");
        }
    };

    let Some(target_lang) = wants_translation(query.target_lang.as_deref()) else {
        return HttpResponse::Ok().json(LyricsOut { original: lyrics, translated: None });
    };

    match app_state.openai.translate(&lyrics, target_lang).await {
        Ok(translated) => {
            info!("Translated lyrics of {:?} to {}", query.track, target_lang);
            HttpResponse::Ok().json(LyricsOut { original: lyrics, translated: Some(translated) })
        }
        Err(e) => {
            error!("Error translating lyrics to {}: {}", target_lang, e);
            HttpResponse::InternalServerError().body("Error fetching lyrics or translating")
        }
    }
}
