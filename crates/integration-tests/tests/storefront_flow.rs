//! End-to-end storefront flows.
//!
//! Each test drives the real router in-process; see `TestApp`.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use royal_bike_core::BikeId;
use royal_bike_integration_tests::TestApp;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let mut app = TestApp::new();

    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = app.get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let mut app = TestApp::new();

    let resp = app.get("/").await;
    assert!(resp.headers.contains_key("x-request-id"));

    let resp = app.get("/rent-now/not-a-bike").await;
    assert!(resp.headers.contains_key("x-request-id"));
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_register_redirects_to_welcome_and_binds_session() {
    let mut app = TestApp::new();

    let resp = app.register("Ann", "ann@example.com", "pedal-power").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/welcome?name=Ann"));
    assert_eq!(app.users.len().await, 1);

    // The session now carries the name, even without ?name=
    let resp = app.get("/welcome").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Welcome, Ann!"));

    let resp = app.get("/").await;
    assert!(resp.body.contains("Welcome back, Ann"));
}

#[tokio::test]
async fn test_register_failure_redirects_back_to_form() {
    let mut app = TestApp::new();

    let resp = app.register("Ann", "not-an-email", "pedal-power").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/register?error=failed"));
    assert!(app.users.is_empty().await);

    let resp = app.get("/register?error=failed").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("create your account"));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let mut app = TestApp::new();
    app.register("Ann", "ann@example.com", "pedal-power").await;

    let mut other = app.fresh_browser();
    let resp = other.register("Impostor", "ANN@example.com", "whatever").await;

    assert_eq!(resp.location(), Some("/register?error=failed"));
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_login_with_registered_credentials() {
    let mut app = TestApp::new();
    app.register("Ann", "ann@example.com", "pedal-power").await;

    let mut browser = app.fresh_browser();
    let resp = browser
        .post_form(
            "/login",
            &[("email", "ann@example.com"), ("password", "pedal-power")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/welcome?name=Ann"));

    let resp = browser.get("/welcome").await;
    assert!(resp.body.contains("Welcome, Ann!"));
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let mut app = TestApp::new();
    app.register("Ann", "ann@example.com", "pedal-power").await;

    let mut browser = app.fresh_browser();
    let wrong_password = browser
        .post_form("/login", &[("email", "ann@example.com"), ("password", "nope")])
        .await;
    let unknown_email = browser
        .post_form(
            "/login",
            &[("email", "bob@example.com"), ("password", "pedal-power")],
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::SEE_OTHER);
    assert_eq!(wrong_password.location(), Some("/login?error=credentials"));
    assert_eq!(wrong_password.location(), unknown_email.location());

    // Still anonymous
    let resp = browser.get("/welcome").await;
    assert!(!resp.body.contains("Ann"));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_shop_lists_seeded_bikes() {
    let mut app = TestApp::new();
    app.seed_bike("Roadster", 10, 899).await;
    app.seed_bike("Cruiser", 8, 549).await;

    let resp = app.get("/shop").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Roadster"));
    assert!(resp.body.contains("Cruiser"));
    assert!(resp.body.contains("$899.00"));

    for path in ["/rent", "/rent-now"] {
        let resp = app.get(path).await;
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert!(resp.body.contains("Roadster"), "{path}");
        assert!(resp.body.contains("$10.00"), "{path}");
    }
}

#[tokio::test]
async fn test_buy_now_missing_bike_redirects_to_shop() {
    let mut app = TestApp::new();
    app.seed_bike("Roadster", 10, 899).await;

    for id in [BikeId::generate().to_string(), "garbage".to_string()] {
        let resp = app.get(&format!("/buy-now/{id}")).await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
        assert_eq!(resp.location(), Some("/shop"));
    }
}

#[tokio::test]
async fn test_rent_now_missing_bike_is_404() {
    let mut app = TestApp::new();

    for id in [BikeId::generate().to_string(), "garbage".to_string()] {
        let resp = app.get(&format!("/rent-now/{id}")).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.body, "Bike not found");
    }
}

#[tokio::test]
async fn test_missing_bike_is_404_across_flows() {
    let mut app = TestApp::new();
    let missing = BikeId::generate().to_string();

    let resp = app.get(&format!("/checkout/{missing}")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app.get(&format!("/payment?bikeId={missing}")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_form(
            "/process-purchase",
            &[("cardName", "Ann Rider"), ("bikeId", missing.as_str())],
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_form("/rent-payment", &[("bikeId", missing.as_str()), ("days", "2")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Bike not found");
}

#[tokio::test]
async fn test_missing_bike_id_is_400() {
    let mut app = TestApp::new();

    let resp = app.get("/payment").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Bike ID is required");

    let resp = app
        .post_form("/process-purchase", &[("cardName", "Ann Rider")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Bike ID is required");

    let resp = app.post_form("/process-rental", &[("days", "2")]).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Purchase
// ============================================================================

#[tokio::test]
async fn test_purchase_flow() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;
    let id = roadster.id.to_string();

    let resp = app.get(&format!("/buy-now/{id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(&format!("/payment?bikeId={id}")));

    let resp = app.get(&format!("/payment?bikeId={id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("/process-purchase"));

    let resp = app
        .post_form(
            "/process-purchase",
            &[("cardName", "Ann Rider"), ("bikeId", id.as_str())],
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you, Ann Rider!"));
    assert!(resp.body.contains("Roadster"));
    assert!(resp.body.contains("$899.00"));
}

// ============================================================================
// Rental
// ============================================================================

#[tokio::test]
async fn test_end_to_end_register_shop_and_checkout() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;

    let resp = app.register("Ann", "ann@example.com", "pedal-power").await;
    assert_eq!(resp.location(), Some("/welcome?name=Ann"));

    let resp = app.get("/shop").await;
    assert!(resp.body.contains("Roadster"));

    let resp = app
        .post_form(&format!("/rent-now/{}/checkout", roadster.id), &[("days", "3")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<strong id="total-payment">$30.00</strong>"#));
    assert!(resp.body.contains("Renting as Ann"));
}

#[tokio::test]
async fn test_checkout_days_defaults_to_one() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;

    let resp = app.get(&format!("/checkout/{}", roadster.id)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<strong id="total-payment">$10.00</strong>"#));

    let resp = app.get(&format!("/checkout/{}?days=4", roadster.id)).await;
    assert!(resp.body.contains(r#"<strong id="total-payment">$40.00</strong>"#));
}

#[tokio::test]
async fn test_checkout_blank_days_defaults_to_one() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;

    for query in ["?days=", "?days=%20%20"] {
        let resp = app.get(&format!("/checkout/{}{query}", roadster.id)).await;
        assert_eq!(resp.status, StatusCode::OK, "{query}");
        assert!(
            resp.body.contains(r#"<strong id="total-payment">$10.00</strong>"#),
            "{query}"
        );
    }
}

#[tokio::test]
async fn test_invalid_days_are_rejected() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;
    let id = roadster.id.to_string();

    for days in ["abc", "0", "-2", "", "366"] {
        let resp = app
            .post_form(&format!("/rent-now/{id}/checkout"), &[("days", days)])
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "days={days:?}");
        assert!(!resp.body.contains("NaN"));

        let resp = app
            .post_form("/process-rental", &[("bikeId", id.as_str()), ("days", days)])
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "days={days:?}");
    }

    let resp = app.get(&format!("/checkout/{id}?days=abc")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rental_flow_recomputes_total() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;
    let id = roadster.id.to_string();

    // A tampered total is ignored
    let resp = app
        .post_form(
            "/process-rental",
            &[("bikeId", id.as_str()), ("days", "3"), ("totalPrice", "$1.00")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<strong id="total-payment">$30.00</strong>"#));
    assert!(resp.body.contains("/rent-payment"));

    let resp = app
        .post_form(
            "/rent-payment",
            &[("bikeId", id.as_str()), ("days", "3"), ("totalPrice", "$30.00")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("/complete-rent"));
    assert!(resp.body.contains(r#"<strong id="total-payment">$30.00</strong>"#));

    let resp = app
        .post_form(
            "/complete-rent",
            &[
                ("userName", "Ann"),
                ("bikeId", id.as_str()),
                ("numberOfDays", "3"),
                ("totalPayment", "0"),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you, Ann!"));
    assert!(resp.body.contains(r#"<strong id="total-payment">$30.00</strong>"#));
}

#[tokio::test]
async fn test_complete_rent_falls_back_to_session_name() {
    let mut app = TestApp::new();
    let roadster = app.seed_bike("Roadster", 10, 899).await;
    let id = roadster.id.to_string();
    app.register("Ann", "ann@example.com", "pedal-power").await;

    let resp = app
        .post_form(
            "/complete-rent",
            &[("bikeId", id.as_str()), ("numberOfDays", "2")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you, Ann!"));
    assert!(resp.body.contains("$20.00"));
}

// ============================================================================
// Store faults
// ============================================================================

#[tokio::test]
async fn test_store_fault_is_500_without_details() {
    let mut app = TestApp::with_unavailable_stores();
    let id = BikeId::generate().to_string();

    for path in [
        "/shop".to_string(),
        "/rent".to_string(),
        format!("/rent-now/{id}"),
        format!("/checkout/{id}"),
        format!("/payment?bikeId={id}"),
    ] {
        let resp = app.get(&path).await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(resp.body, "Internal server error", "{path}");
        assert!(!resp.body.contains("connection refused"), "{path}");
    }

    let resp = app
        .post_form("/rent-payment", &[("bikeId", id.as_str()), ("days", "2")])
        .await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_store_fault_on_buy_now_is_not_a_redirect() {
    let mut app = TestApp::with_unavailable_stores();

    let resp = app.get(&format!("/buy-now/{}", BikeId::generate())).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.location(), None);
}

#[tokio::test]
async fn test_login_store_fault_redirects_like_bad_credentials() {
    let mut app = TestApp::with_unavailable_stores();

    let resp = app
        .post_form(
            "/login",
            &[("email", "ann@example.com"), ("password", "pedal-power")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login?error=credentials"));

    let resp = app.register("Ann", "ann@example.com", "pedal-power").await;
    assert_eq!(resp.location(), Some("/register?error=failed"));
}

#[tokio::test]
async fn test_readiness_fails_when_store_is_down() {
    let mut app = TestApp::with_unavailable_stores();

    let resp = app.get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);

    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
}
