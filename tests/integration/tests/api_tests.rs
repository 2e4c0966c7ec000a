//! End-to-end API tests
//!
//! Every test boots its own server over a fresh in-memory store, so tests
//! are independent and need no external services. `postgres_smoke` runs the
//! same wiring against PostgreSQL when `DATABASE_URL` is set.

use integration_tests::*;
use remark_core::EntityId;
use reqwest::StatusCode;

async fn register(server: &TestServer, prefix: &str) -> AuthResponse {
    let response = server
        .post("/auth/register", &RegisterRequest::unique(prefix))
        .await
        .expect("register request");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("register response")
}

async fn post_comment(server: &TestServer, token: &str, content: &str) -> CommentResponse {
    let response = server
        .post_auth(
            "/comments",
            token,
            &ContentRequest {
                content: content.to_string(),
            },
        )
        .await
        .expect("comment request");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("comment response")
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_register_login_refresh() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique("flow");

    let response = server.post("/auth/register", &request).await.unwrap();
    let registered: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(registered.user.role, "USER");
    assert_eq!(registered.token_type, "Bearer");

    let response = server
        .post(
            "/auth/login",
            &LoginRequest {
                email: request.email.clone(),
                password: request.password.clone(),
            },
        )
        .await
        .unwrap();
    let logged_in: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let response = server
        .post(
            "/auth/refresh",
            &serde_json::json!({ "refreshToken": logged_in.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.email, request.email);
}

#[tokio::test]
async fn test_register_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/register", &serde_json::json!({ "email": "a@b.test" }))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Email, password, login, and full name are required");

    let mut mismatched = RegisterRequest::unique("mismatch");
    mismatched.password_confirmation = "different123".to_string();
    let response = server.post("/auth/register", &mismatched).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Password and password confirmation do not match");

    let taken = RegisterRequest::unique("taken");
    let response = server.post("/auth/register", &taken).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let response = server.post("/auth/register", &taken).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Email is already taken");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, "wrongpw").await;

    let response = server
        .post(
            "/auth/login",
            &LoginRequest {
                email: user.user.email,
                password: "not-the-password".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/users", "garbage").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_path_id_is_bad_request() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, "badid").await;

    let response = server
        .get_auth("/comments/abc", &user.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_like_toggles_off() {
    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, "liker").await;
    let comment = post_comment(&server, &a.access_token, "first!").await;
    let path = format!("/comments/{}/likes", comment.id);

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let created: ReactionResult = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.message, "Reaction added successfully");
    assert_eq!(created.like.map(|r| r.kind), Some("LIKE".to_string()));

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let removed: ReactionResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.message, "Reaction removed successfully");
    assert!(removed.like.is_none());

    let response = server.get_auth(&path, &a.access_token).await.unwrap();
    let likes: Vec<ReactionWithAuthor> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(likes.is_empty());
}

#[tokio::test]
async fn test_dislike_then_like_flips_single_row() {
    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, "flipper").await;
    let comment = post_comment(&server, &a.access_token, "flip me").await;
    let path = format!("/comments/{}/likes", comment.id);

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::dislike())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let updated: ReactionResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.message, "Reaction updated successfully");
    assert_eq!(updated.like.map(|r| r.kind), Some("LIKE".to_string()));

    let response = server.get_auth(&path, &a.access_token).await.unwrap();
    let likes: Vec<ReactionWithAuthor> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].reaction.kind, "LIKE");
    assert_eq!(likes[0].author.id, a.user.id);

    let response = server
        .get_auth(&format!("/comments/{}", comment.id), &a.access_token)
        .await
        .unwrap();
    let detail: CommentDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.like_count, 1);
    assert_eq!(detail.dislike_count, 0);
}

#[tokio::test]
async fn test_inactive_comment_rejects_reactions() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let author = register(&server, "author").await;
    let fan = register(&server, "fan").await;
    let comment = post_comment(&server, &author.access_token, "soon hidden").await;

    let response = server
        .patch_auth(
            &format!("/comments/{}", comment.id),
            &admin,
            &StatusRequest {
                status: "INACTIVE".to_string(),
            },
        )
        .await
        .unwrap();
    let updated: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "INACTIVE");

    let response = server
        .post_auth(
            &format!("/comments/{}/likes", comment.id),
            &fan.access_token,
            &ReactionRequest::like(),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "Cannot react to an inactive comment");
}

#[tokio::test]
async fn test_invalid_reaction_type() {
    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, "typo").await;
    let comment = post_comment(&server, &a.access_token, "typed").await;

    let response = server
        .post_auth(
            &format!("/comments/{}/likes", comment.id),
            &a.access_token,
            &serde_json::json!({ "type": "LOVE" }),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Type must be either \"LIKE\" or \"DISLIKE\"");
}

#[tokio::test]
async fn test_remove_reaction_requires_matching_kind() {
    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, "remover").await;
    let comment = post_comment(&server, &a.access_token, "keep it").await;
    let path = format!("/comments/{}/likes", comment.id);

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth_json(&path, &a.access_token, &ReactionRequest::dislike())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "DISLIKE not found for the specified comment");

    let response = server
        .delete_auth_json(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let removed: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.message, "LIKE removed successfully");
}

#[tokio::test]
async fn test_concurrent_toggles_keep_one_row() {
    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, "racer").await;
    let comment = post_comment(&server, &a.access_token, "race me").await;
    let url = format!("{}/comments/{}/likes", server.base_url(), comment.id);

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = server.client.clone();
        let url = url.clone();
        let token = a.access_token.clone();
        let body = if i % 2 == 0 {
            ReactionRequest::like()
        } else {
            ReactionRequest::dislike()
        };
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .bearer_auth(token)
                .json(&body)
                .send()
                .await
                .map(|r| r.status())
        }));
    }

    for handle in handles {
        let status = handle.await.unwrap().unwrap();
        assert!(
            [StatusCode::OK, StatusCode::CREATED, StatusCode::CONFLICT].contains(&status),
            "unexpected status {status}"
        );
    }

    let store = server.store.as_ref().expect("in-memory server");
    let rows = store
        .reaction_rows(EntityId::new(comment.id), EntityId::new(a.user.id))
        .await;
    assert!(rows <= 1);
}

// ============================================================================
// Comment lifecycle
// ============================================================================

#[tokio::test]
async fn test_stranger_cannot_change_status() {
    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server, "owner").await;
    let stranger = register(&server, "stranger").await;
    let comment = post_comment(&server, &author.access_token, "mine").await;

    let response = server
        .patch_auth(
            &format!("/comments/{}", comment.id),
            &stranger.access_token,
            &StatusRequest {
                status: "INACTIVE".to_string(),
            },
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "You can only update your own comments or be an admin");

    let response = server
        .get_auth(&format!("/comments/{}", comment.id), &stranger.access_token)
        .await
        .unwrap();
    let detail: CommentDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.status, "ACTIVE");
}

#[tokio::test]
async fn test_author_deletes_comment() {
    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server, "deleter").await;
    let comment = post_comment(&server, &author.access_token, "gone soon").await;
    let path = format!("/comments/{}", comment.id);

    let response = server.delete_auth(&path, &author.access_token).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Comment deleted successfully");

    let response = server.get_auth(&path, &author.access_token).await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Comment not found");
}

// ============================================================================
// User administration
// ============================================================================

#[tokio::test]
async fn test_non_admin_cannot_manage_users() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, "plain").await;

    let response = server
        .post_auth(
            "/users",
            &user.access_token,
            &CreateUserRequest::unique("sneaky", Some("ADMIN")),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "Forbidden: insufficient rights");

    let mut malformed = CreateUserRequest::unique("sneaky", None);
    malformed.email = "not-an-email".to_string();
    let response = server
        .post_auth("/users", &user.access_token, &malformed)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/users/{}", user.user.id),
            &user.access_token,
            &RoleRequest {
                role: "ADMIN".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_creates_and_promotes_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();

    let response = server
        .post_auth("/users", &admin, &CreateUserRequest::unique("staff", None))
        .await
        .unwrap();
    let created: UserMutation = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.message, "User created successfully");
    assert_eq!(created.user.role, "USER");

    let response = server
        .patch_auth(
            &format!("/users/{}", created.user.id),
            &admin,
            &RoleRequest {
                role: "admin".to_string(),
            },
        )
        .await
        .unwrap();
    let promoted: UserMutation = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(promoted.user.role, "ADMIN");

    let response = server
        .patch_auth(
            &format!("/users/{}", created.user.id),
            &admin,
            &RoleRequest {
                role: "ROOT".to_string(),
            },
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(
        message,
        "Invalid role provided. Only USER or ADMIN are allowed."
    );

    let response = server.get_auth("/users", &admin).await.unwrap();
    let users: Vec<UserSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.iter().any(|u| u.email == created.user.email));
}

#[tokio::test]
async fn test_admin_delete_user_cascades() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let doomed = register(&server, "doomed").await;
    let other = register(&server, "other").await;

    let own_comment = post_comment(&server, &doomed.access_token, "mine").await;
    let other_comment = post_comment(&server, &other.access_token, "theirs").await;

    let response = server
        .post_auth(
            &format!("/comments/{}/likes", own_comment.id),
            &other.access_token,
            &ReactionRequest::like(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let response = server
        .post_auth(
            &format!("/comments/{}/likes", other_comment.id),
            &doomed.access_token,
            &ReactionRequest::dislike(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/users/{}", doomed.user.id), &admin)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "User and related data deleted successfully");

    let response = server
        .get_auth(&format!("/users/{}", doomed.user.id), &admin)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "User not found");

    let response = server
        .get_auth(&format!("/comments/{}", own_comment.id), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/comments/{}", other_comment.id), &admin)
        .await
        .unwrap();
    let detail: CommentDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(detail.likes.is_empty());
    assert_eq!(detail.dislike_count, 0);

    // Tokens of a deleted account stop working
    let response = server
        .get_auth(&format!("/comments/{}", other_comment.id), &doomed.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn postgres_smoke() {
    if !check_postgres_env() {
        return;
    }

    let server = TestServer::start_postgres()
        .await
        .expect("Failed to start server");
    let a = register(&server, "pg").await;
    let comment = post_comment(&server, &a.access_token, "stored").await;
    let path = format!("/comments/{}/likes", comment.id);

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&path, &a.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
