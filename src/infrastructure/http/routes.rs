//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /register          POST   注册
//! - /login             POST   登录（返回 Bearer 令牌）
//! - /logout            POST   登出
//! - /user              GET    当前用户公开信息
//! - /change-password   POST   修改密码
//! - /delete-account    POST   注销账号（显式确认）
//! - /novels            GET    全部小说（联结类型，novel_id 升序）
//! - /novels/:novel_id  GET    小说章节（chap_num 升序）
//! - /novel             GET    当前用户的小说
//! - /novel             POST   投稿小说（multipart，含封面）
//! - /addnovel          POST   提交章节
//! - /noveltypes        GET    小说类型参考数据
//! - /favorites         GET    收藏列表  POST 添加收藏
//! - /favorites/:id     GET    收藏探测  DELETE 移除收藏
//! - /comment           POST   发表评论
//! - /comment/:novel_id GET    小说评论
//! - /ping              GET    健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(user_routes())
        .merge(novel_routes())
        .merge(favorite_routes())
        .merge(comment_routes())
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/user", get(handlers::current_user))
        .route("/change-password", post(handlers::change_password))
        .route("/delete-account", post(handlers::delete_account))
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/novels", get(handlers::list_novels))
        .route("/novels/:novel_id", get(handlers::list_chapters))
        .route(
            "/novel",
            get(handlers::list_own_novels).post(handlers::submit_novel),
        )
        .route("/addnovel", post(handlers::submit_chapter))
        .route("/noveltypes", get(handlers::list_novel_types))
}

/// Favorite 路由
fn favorite_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/favorites",
            get(handlers::list_favorites).post(handlers::add_favorite),
        )
        .route(
            "/favorites/:novel_id",
            get(handlers::is_favorite).delete(handlers::remove_favorite),
        )
}

/// Comment 路由
fn comment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/comment", post(handlers::post_comment))
        .route("/comment/:novel_id", get(handlers::list_comments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::infrastructure::adapters::{Argon2PasswordHasher, FileImageStorage};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, DbPool, SqliteCommentRepository,
        SqliteFavoriteRepository, SqliteNovelRepository, SqliteSessionRepository,
        SqliteUserRepository,
    };

    struct TestApp {
        router: Router,
        pool: DbPool,
        uploads: tempfile::TempDir,
    }

    async fn spawn_app() -> TestApp {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let uploads = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileImageStorage::new(uploads.path()).await.unwrap());

        let state = AppState::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool.clone())),
            Arc::new(SqliteNovelRepository::new(pool.clone())),
            Arc::new(SqliteFavoriteRepository::new(pool.clone())),
            Arc::new(SqliteCommentRepository::new(pool.clone())),
            Arc::new(Argon2PasswordHasher::new()),
            storage,
            3600,
        );

        TestApp {
            router: create_routes().with_state(Arc::new(state)),
            pool,
            uploads,
        }
    }

    async fn send_json(
        app: &TestApp,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    const BOUNDARY: &str = "test-boundary";

    fn multipart_novel_body(with_file: bool) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in [
            ("novel_name", "Moonrise"),
            ("novel_type_id", "1"),
            ("novel_penname", "pen"),
        ] {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if with_file {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"novel_img\"; filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n",
                    BOUNDARY
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"fake png bytes\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn submit_novel(app: &TestApp, token: Option<&str>, with_file: bool) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/novel")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(Body::from(multipart_novel_body(with_file)))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn register(app: &TestApp, name: &str, pass: &str, email: &str) -> (StatusCode, Value) {
        send_json(
            app,
            Method::POST,
            "/register",
            None,
            Some(json!({"user_name": name, "user_pass": pass, "user_email": email})),
        )
        .await
    }

    async fn login(app: &TestApp, name: &str, pass: &str) -> (StatusCode, Value) {
        send_json(
            app,
            Method::POST,
            "/login",
            None,
            Some(json!({"user_name": name, "user_pass": pass})),
        )
        .await
    }

    /// 注册 + 登录，返回会话令牌
    async fn login_token(app: &TestApp) -> String {
        register(app, "alice", "pw1", "a@x.com").await;
        let (status, body) = login(app, "alice", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_login_scenario() {
        let app = spawn_app().await;

        // register alice -> 201
        let (status, body) = register(&app, "alice", "pw1", "a@x.com").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["user_name"], "alice");

        // 同名再注册 -> 400
        let (status, body) = register(&app, "alice", "pw9", "other@x.com").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);

        // 正确口令登录 -> 200 并返回令牌
        let (status, body) = login(&app, "alice", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();
        // 公开字段之外（尤其是哈希）不得出现在响应里
        assert!(body["data"]["user"].get("user_pass").is_none());

        // 错误口令 -> 401
        let (status, _) = login(&app, "alice", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // 令牌解析出身份
        let (status, body) = send_json(&app, Method::GET, "/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user_name"], "alice");
        assert_eq!(body["data"]["user_email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_missing_register_fields_are_400() {
        let app = spawn_app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/register",
            None,
            Some(json!({"user_name": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_unknown_user_login_is_404() {
        let app = spawn_app().await;
        let (status, _) = login(&app, "nobody", "pw").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_identity_required_routes_reject_anonymous() {
        let app = spawn_app().await;
        for (method, uri) in [
            (Method::GET, "/user"),
            (Method::GET, "/novel"),
            (Method::GET, "/favorites"),
        ] {
            let (status, _) = send_json(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "route {} must be guarded", uri);
        }
    }

    #[tokio::test]
    async fn test_upload_without_identity_has_no_side_effects() {
        let app = spawn_app().await;

        let (status, _) = submit_novel(&app, None, true).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // 无行、无文件
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM novel")
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_without_file_is_400() {
        let app = spawn_app().await;
        let token = login_token(&app).await;

        let (status, body) = submit_novel(&app, Some(&token), false).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded");

        assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_novel_upload_then_listing_and_chapters() {
        let app = spawn_app().await;
        let token = login_token(&app).await;

        let (status, body) = submit_novel(&app, Some(&token), true).await;
        assert_eq!(status, StatusCode::OK);
        let novel_id = body["data"]["novel_id"].as_i64().unwrap();
        let stored = body["data"]["novel_img"].as_str().unwrap();
        assert!(stored.ends_with(".png"));
        assert!(app.uploads.path().join(stored).exists());

        // 列表联结类型
        let (status, body) = send_json(&app, Method::GET, "/novels", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["novel_name"], "Moonrise");
        assert!(body["data"][0]["novel_type_name"].is_string());

        // 自己的小说
        let (status, body) = send_json(&app, Method::GET, "/novel", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        // 乱序提交章节，读出按 chap_num 升序
        for num in [2, 1] {
            let (status, _) = send_json(
                &app,
                Method::POST,
                "/addnovel",
                None,
                Some(json!({"novel_id": novel_id, "novel_num": num, "chap_write": "text"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send_json(
            &app,
            Method::GET,
            &format!("/novels/{}", novel_id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let nums: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["chap_num"].as_i64().unwrap())
            .collect();
        assert_eq!(nums, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_chapter_submission_missing_fields_are_400() {
        let app = spawn_app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/addnovel",
            None,
            Some(json!({"chap_write": "text"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_chapters_of_unknown_novel_are_404() {
        let app = spawn_app().await;
        let (status, _) = send_json(&app, Method::GET, "/novels/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_favorites_flow() {
        let app = spawn_app().await;
        let token = login_token(&app).await;
        let (_, body) = submit_novel(&app, Some(&token), true).await;
        let novel_id = body["data"]["novel_id"].as_i64().unwrap();

        // 幂等添加：两次都 201，只有一行
        for _ in 0..2 {
            let (status, _) = send_json(
                &app,
                Method::POST,
                "/favorites",
                Some(&token),
                Some(json!({"novel_id": novel_id})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lastet_novel")
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let (status, body) = send_json(
            &app,
            Method::GET,
            &format!("/favorites/{}", novel_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_favorite"], true);

        let (status, body) = send_json(&app, Method::GET, "/favorites", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        // 移除后再移除 -> 404，集合不变
        let (status, _) = send_json(
            &app,
            Method::DELETE,
            &format!("/favorites/{}", novel_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send_json(
            &app,
            Method::DELETE,
            &format!("/favorites/{}", novel_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lastet_novel")
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_comment_flow() {
        let app = spawn_app().await;
        let token = login_token(&app).await;
        let (_, body) = submit_novel(&app, Some(&token), true).await;
        let novel_id = body["data"]["novel_id"].as_i64().unwrap();

        // 匿名发评论 -> 401
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/comment",
            None,
            Some(json!({"novel_id": novel_id, "com_text": "nice"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send_json(
            &app,
            Method::POST,
            "/comment",
            Some(&token),
            Some(json!({"novel_id": novel_id, "com_text": "nice"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send_json(
            &app,
            Method::GET,
            &format!("/comment/{}", novel_id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let comments = body["data"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["com_text"], "nice");
        assert_eq!(comments[0]["user_name"], "alice");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let app = spawn_app().await;
        let token = login_token(&app).await;

        let (status, _) = send_json(&app, Method::POST, "/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send_json(&app, Method::GET, "/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_account_requires_explicit_confirmation() {
        let app = spawn_app().await;
        let token = login_token(&app).await;

        let (status, _) = send_json(
            &app,
            Method::POST,
            "/delete-account",
            Some(&token),
            Some(json!({"confirm": false})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(
            &app,
            Method::POST,
            "/delete-account",
            Some(&token),
            Some(json!({"confirm": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // 用户与其会话都已不在
        let (status, _) = login(&app, "alice", "pw1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send_json(&app, Method::GET, "/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_noveltypes_reference_data() {
        let app = spawn_app().await;
        let (status, body) = send_json(&app, Method::GET, "/noveltypes", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["data"].as_array().unwrap().is_empty());
    }
}
