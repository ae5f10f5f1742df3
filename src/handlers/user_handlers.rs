// src/handlers/user_handlers.rs
use actix_web::{post, web, HttpResponse};
use log::{error, info};
use crate::dtos::user_dtos::SaveUserIn;
use crate::models::user::User;
use crate::AppState;

/// POST /saveUser
/// Insert or fully overwrite the profile keyed by `id`.
#[post("/saveUser")]
pub async fn save_user(
    app_state: web::Data<AppState>,
    body: web::Json<SaveUserIn>,
) -> HttpResponse {
    let user: User = body.into_inner().into();

    match app_state.users.upsert(&user).await {
        Ok(()) => {
            info!("User {} saved", user.id);
            HttpResponse::Ok().body("User saved successfully")
        }
        Err(e) => {
            error!("Error saving user {} to the database: {}", user.id, e);
            HttpResponse::InternalServerError().body("Error saving user to the database")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::test;
    use serde_json::json;
    use crate::handlers::test_support::TestEnv;
    use crate::repositories::memory::{ClosedRepository, MemoryUserRepository};

    fn profile(display_name: &str) -> serde_json::Value {
        json!({
            "id": "spotify-user-1",
            "email": "user@example.com",
            "display_name": display_name,
            "country": "KR",
            "followers": 3,
            "profile_image_url": "https://i.scdn.co/image/abc",
            "product": "free"
        })
    }

    #[actix_web::test]
    async fn saving_twice_keeps_latest_values() {
        let users = Arc::new(MemoryUserRepository::default());
        let mut env = TestEnv::start().await;
        env.state.users = users.clone();
        let app = test::init_service(env.app()).await;

        for name in ["first", "second"] {
            let req = test::TestRequest::post().uri("/saveUser").set_json(profile(name)).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
            assert_eq!(test::read_body(resp).await, "User saved successfully");
        }

        let stored = users.users.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored["spotify-user-1"].display_name.as_deref(), Some("second"));
    }

    #[actix_web::test]
    async fn malformed_profile_is_500_with_plain_text() {
        let users = Arc::new(MemoryUserRepository::default());
        let mut env = TestEnv::start().await;
        env.state.users = users.clone();
        let app = test::init_service(env.app()).await;

        let bodies = [
            json!({"id": 12345}),
            json!({"email": "no-id@example.com"}),
            json!({"id": "u1", "followers": "many"}),
        ];
        for body in bodies {
            let req = test::TestRequest::post().uri("/saveUser").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 500);
            assert_eq!(test::read_body(resp).await, "Error saving user to the database");
        }

        let req = test::TestRequest::post()
            .uri("/saveUser")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 500);
        assert!(users.users.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn database_failure_is_500() {
        let mut env = TestEnv::start().await;
        env.state.users = Arc::new(ClosedRepository);
        let app = test::init_service(env.app()).await;

        let req = test::TestRequest::post().uri("/saveUser").set_json(profile("x")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(test::read_body(resp).await, "Error saving user to the database");
    }
}
