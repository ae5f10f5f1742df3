// src/handlers/post_handlers.rs
use actix_web::{get, post, web, HttpResponse};
use log::{error, info, warn};
use crate::dtos::post_dtos::{CreatePostDTO, CreatePostResponse, PostOut};
use crate::AppState;

/// POST /posts
#[post("/posts")]
pub async fn create_post(
    app_state: web::Data<AppState>,
    body: web::Json<CreatePostDTO>,
) -> HttpResponse {
    match app_state.posts.create(body.into_inner().into()).await {
        Ok(id) => {
            info!("Post {} created", id);
            HttpResponse::Ok().json(CreatePostResponse { success: true, id })
        }
        Err(e) => {
            error!("Error inserting post: {}", e);
            HttpResponse::InternalServerError().body("Server error")
        }
    }
}

/// GET /posts
#[get("/posts")]
pub async fn list_posts(app_state: web::Data<AppState>) -> HttpResponse {
    match app_state.posts.list().await {
        Ok(posts) => {
            let out: Vec<PostOut> = posts.into_iter().map(PostOut::from).collect();
            HttpResponse::Ok().json(out)
        }
        Err(e) => {
            error!("Error fetching posts: {}", e);
            HttpResponse::InternalServerError().body("Server error")
        }
    }
}

/// GET /posts/{id}
#[get("/posts/{id}")]
pub async fn get_post(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let raw_id = path.into_inner();
    // ids are BIGSERIAL, anything else cannot match a row
    let Ok(id) = raw_id.trim().parse::<i64>() else {
        warn!("Post lookup with non-numeric id {:?}", raw_id);
        return HttpResponse::NotFound().body("Post not found");
    };

    match app_state.posts.get(id).await {
        Ok(Some(post)) => HttpResponse::Ok().json(PostOut::from(post)),
        Ok(None) => {
            warn!("Post {} not found", id);
            HttpResponse::NotFound().body("Post not found")
        }
        Err(e) => {
            error!("Error fetching post {}: {}", id, e);
            HttpResponse::InternalServerError().body("Server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::test;
    use serde_json::{json, Value};
    use crate::handlers::test_support::TestEnv;
    use crate::repositories::memory::ClosedRepository;

    #[actix_web::test]
    async fn create_then_get_round_trips_content() {
        let env = TestEnv::start().await;
        let app = test::init_service(env.app()).await;

        let content = json!({
            "lines": [{"text": "first", "at": 1.5}, {"text": "second", "tags": ["a", "b"]}],
            "style": {"font": {"size": 14, "bold": true}, "colors": []},
            "nothing": null
        });
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "My card", "content": content, "backgroundImage": "uploads/1-bg.png"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["success"], true);
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::get().uri(&format!("/posts/{}", id)).to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post["id"], id);
        assert_eq!(post["title"], "My card");
        assert_eq!(post["content"], content);
        assert_eq!(post["backgroundImage"], "uploads/1-bg.png");
    }

    #[actix_web::test]
    async fn list_returns_every_created_post() {
        let env = TestEnv::start().await;
        let app = test::init_service(env.app()).await;

        for i in 0..3 {
            let req = test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({"title": format!("post {}", i), "content": [i, {"n": i}]}))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get().uri("/posts").to_request();
        let posts: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posts.len(), 3);
        for (i, post) in posts.iter().enumerate() {
            assert_eq!(post["content"], json!([i, {"n": i}]));
            assert_eq!(post["backgroundImage"], Value::Null);
        }
    }

    #[actix_web::test]
    async fn missing_post_is_404() {
        let env = TestEnv::start().await;
        let app = test::init_service(env.app()).await;

        for uri in ["/posts/999", "/posts/not-a-number"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 404);
            assert_eq!(test::read_body(resp).await, "Post not found");
        }
    }

    #[actix_web::test]
    async fn malformed_post_is_500_with_plain_text() {
        let env = TestEnv::start().await;
        let app = test::init_service(env.app()).await;

        for body in [json!({"content": {"a": 1}}), json!({"title": 7, "content": []})] {
            let req = test::TestRequest::post().uri("/posts").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 500);
            assert_eq!(test::read_body(resp).await, "Server error");
        }

        let req = test::TestRequest::get().uri("/posts").to_request();
        let posts: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(posts.is_empty());
    }

    #[actix_web::test]
    async fn database_failure_is_500() {
        let mut env = TestEnv::start().await;
        env.state.posts = Arc::new(ClosedRepository);
        let app = test::init_service(env.app()).await;

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "t", "content": {}}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 500);

        let req = test::TestRequest::get().uri("/posts").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 500);

        let req = test::TestRequest::get().uri("/posts/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 500);
    }
}
