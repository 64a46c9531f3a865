//! End-to-end tests through the full router.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use cafe_core::credentials::hash_password;
use cafe_db::{Database, DbConfig};
use cafe_server::{build_router, AppState, ServerConfig, SessionStore};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db: Database,
    coffee: i64,
}

/// "Coffee Beans" at 10 in "Beans", staff user `barista` / `flat-white`.
/// Returns the database and the coffee product id.
async fn seeded_db() -> (Database, i64) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let beans = db.categories().insert("Beans").await.unwrap();
    db.categories().insert("Milk").await.unwrap();
    let coffee = db.products().insert("Coffee Beans", beans, 10).await.unwrap();

    let hash = hash_password("flat-white").unwrap();
    db.users().insert("barista", &hash).await.unwrap();

    (db, coffee)
}

async fn test_app() -> TestApp {
    let (db, coffee) = seeded_db().await;
    TestApp::with_state(AppState::new(db, ServerConfig::default()), coffee)
}

impl TestApp {
    fn with_state(state: AppState, coffee: i64) -> TestApp {
        let db = state.db.clone();
        TestApp {
            app: build_router(state),
            db,
            coffee,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Signs in and returns the `name=value` cookie pair.
    async fn login(&self) -> String {
        let response = self
            .post_form("/login", "name=barista&password=flat-white", None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        set_cookie_pair(&response).expect("login sets a cookie")
    }

    async fn stock(&self) -> i64 {
        self.db
            .products()
            .get_by_id(self.coffee)
            .await
            .unwrap()
            .unwrap()
            .stock_quantity
    }

    async fn log_count(&self) -> i64 {
        self.db.movements().count().await.unwrap()
    }
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Session gate
// =============================================================================

#[tokio::test]
async fn protected_routes_redirect_to_login() {
    let t = test_app().await;
    let id = t.coffee;

    for uri in [
        "/".to_string(),
        "/logs".to_string(),
        format!("/product/{id}"),
        format!("/add_stock/{id}"),
        format!("/remove_stock/{id}"),
    ] {
        let response = t.get(&uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}

#[tokio::test]
async fn unauthenticated_post_writes_nothing() {
    let t = test_app().await;

    let response = t
        .post_form(&format!("/add_stock/{}", t.coffee), "quantity=5", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = t
        .post_form(
            &format!("/remove_stock/{}", t.coffee),
            "quantity=5",
            Some("cafe_session=forged"),
        )
        .await;
    assert_eq!(location(&response), "/login");

    assert_eq!(t.stock().await, 10);
    assert_eq!(t.log_count().await, 0);
}

// =============================================================================
// Login / logout
// =============================================================================

#[tokio::test]
async fn login_sets_session_cookie() {
    let t = test_app().await;

    let response = t
        .post_form("/login", "name=barista&password=flat-white", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(raw.starts_with("cafe_session="));
    assert!(raw.contains("HttpOnly"));

    let cookie = set_cookie_pair(&response).unwrap();
    let response = t.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Signed in as barista"));
    assert!(body.contains("Coffee Beans"));
    assert!(body.contains("Milk"));
}

#[tokio::test]
async fn bad_credentials_are_rejected_generically() {
    let t = test_app().await;

    for body in [
        "name=barista&password=mocha",
        "name=ghost&password=flat-white",
        "name=&password=",
    ] {
        let response = t.post_form("/login", body, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let page = body_text(response).await;
        assert!(page.contains("Invalid username or password"));
    }
}

#[tokio::test]
async fn logout_clears_session() {
    let t = test_app().await;
    let cookie = t.login().await;

    let response = t.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The old token no longer works even if the browser keeps sending it.
    let response = t.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn second_login_discards_previous_token() {
    let t = test_app().await;
    let first = t.login().await;

    // Sign in again from the same browser, which still carries the old cookie.
    let response = t
        .post_form("/login", "name=barista&password=flat-white", Some(&first))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let second = set_cookie_pair(&response).unwrap();
    assert_ne!(first, second);

    let response = t.get("/", Some(&first)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = t.get("/", Some(&second)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn idle_session_expires() {
    let (db, coffee) = seeded_db().await;
    let state = AppState {
        db,
        sessions: SessionStore::new(Some(Duration::from_millis(20))),
        config: Arc::new(ServerConfig::default()),
    };
    let t = TestApp::with_state(state, coffee);
    let cookie = t.login().await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    let response = t.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let t = test_app().await;
    let response = t.get("/logout", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// =============================================================================
// Stock adjustments
// =============================================================================

#[tokio::test]
async fn add_stock_redirects_to_product() {
    let t = test_app().await;
    let cookie = t.login().await;

    let response = t
        .post_form(&format!("/add_stock/{}", t.coffee), "quantity=5", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/product/{}", t.coffee));

    assert_eq!(t.stock().await, 15);
    assert_eq!(t.log_count().await, 1);

    let page = body_text(t.get(&format!("/product/{}", t.coffee), Some(&cookie)).await).await;
    assert!(page.contains(">+5</td>"));
    assert!(page.contains("barista"));
}

#[tokio::test]
async fn stock_forms_render() {
    let t = test_app().await;
    let cookie = t.login().await;

    let page = body_text(t.get(&format!("/add_stock/{}", t.coffee), Some(&cookie)).await).await;
    assert!(page.contains("Stock In: Coffee Beans"));

    let page = body_text(t.get(&format!("/remove_stock/{}", t.coffee), Some(&cookie)).await).await;
    assert!(page.contains("Stock Out: Coffee Beans"));
}

#[tokio::test]
async fn invalid_quantities_write_nothing() {
    let t = test_app().await;
    let cookie = t.login().await;

    for body in ["quantity=0", "quantity=-4", "quantity=abc", "quantity=", "quantity=10001", ""] {
        let response = t
            .post_form(&format!("/remove_stock/{}", t.coffee), body, Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");

        let page = body_text(response).await;
        assert!(page.contains(r#"class="error""#), "{body}");
    }

    assert_eq!(t.stock().await, 10);
    assert_eq!(t.log_count().await, 0);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let t = test_app().await;
    let cookie = t.login().await;
    let missing = t.coffee + 100;

    let response = t.get(&format!("/product/{missing}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = t.get(&format!("/add_stock/{missing}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = t
        .post_form(&format!("/add_stock/{missing}"), "quantity=5", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(t.log_count().await, 0);
}

#[tokio::test]
async fn coffee_beans_walkthrough() {
    let t = test_app().await;
    let cookie = t.login().await;
    let id = t.coffee;

    t.post_form(&format!("/add_stock/{id}"), "quantity=5", Some(&cookie))
        .await;
    assert_eq!(t.stock().await, 15);

    t.post_form(&format!("/remove_stock/{id}"), "quantity=3", Some(&cookie))
        .await;
    assert_eq!(t.stock().await, 12);

    let page = body_text(t.get("/logs", Some(&cookie)).await).await;
    let out = page.find(">-3</td>").expect("stock out listed");
    let inn = page.find(">+5</td>").expect("stock in listed");
    assert!(out < inn, "newest entry first");
}

#[tokio::test]
async fn remove_may_drive_stock_negative() {
    let t = test_app().await;
    let cookie = t.login().await;

    let response = t
        .post_form(&format!("/remove_stock/{}", t.coffee), "quantity=12", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(t.stock().await, -2);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn healthz_reports_database() {
    let t = test_app().await;

    let response = t.get("/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["migrations_applied"], json["migrations_total"]);
    assert!(json["migrations_total"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn healthz_degraded_without_schema() {
    let db = Database::new(DbConfig::in_memory().run_migrations(false))
        .await
        .unwrap();
    let t = TestApp::with_state(AppState::new(db, ServerConfig::default()), 0);

    let response = t.get("/healthz", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], false);
}
