//! Integration tests for Royal Bike Club.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`
//! against in-memory collections and an in-memory session store, so no
//! database or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p royal-bike-integration-tests
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use rust_decimal::Decimal;
use tower::ServiceExt;

use royal_bike_storefront::{
    db::{Document, DocumentStore, MemoryStore, RepositoryError},
    middleware::session_layer,
    models::{Bike, NewBike, User},
    routes,
    services::Argon2Hasher,
    state::AppState,
};

/// A storefront wired to in-memory collaborators, acting as one browser.
///
/// The session cookie from each response is sent with the next request.
pub struct TestApp {
    router: Router,
    pub users: Arc<MemoryStore<User>>,
    pub bikes: Arc<MemoryStore<Bike>>,
    cookie: Option<String>,
}

/// A collection whose backend is down: every call fails.
pub struct UnavailableStore<T> {
    _collection: PhantomData<fn() -> T>,
}

impl<T> UnavailableStore<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _collection: PhantomData,
        }
    }

    fn error() -> RepositoryError {
        RepositoryError::Unavailable("connection refused".to_string())
    }
}

impl<T> Default for UnavailableStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for UnavailableStore<T> {
    async fn insert(&self, _draft: T::Draft) -> Result<T, RepositoryError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: T::Id) -> Result<Option<T>, RepositoryError> {
        Err(Self::error())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        Err(Self::error())
    }

    async fn find_one(&self, _field: T::Field, _value: &str) -> Result<Option<T>, RepositoryError> {
        Err(Self::error())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(Self::error())
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// An app with empty collections.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(MemoryStore::<User>::new());
        let bikes = Arc::new(MemoryStore::<Bike>::new());
        let router = router(users.clone(), bikes.clone());

        Self {
            router,
            users,
            bikes,
            cookie: None,
        }
    }

    /// An app whose `users` and `bikes` stores fail every call.
    ///
    /// The `users` and `bikes` handles are empty and not wired to the router.
    #[must_use]
    pub fn with_unavailable_stores() -> Self {
        let router = router(
            Arc::new(UnavailableStore::<User>::new()),
            Arc::new(UnavailableStore::<Bike>::new()),
        );

        Self {
            router,
            users: Arc::new(MemoryStore::new()),
            bikes: Arc::new(MemoryStore::new()),
            cookie: None,
        }
    }

    /// A second browser against the same collections, without a session.
    #[must_use]
    pub fn fresh_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            users: self.users.clone(),
            bikes: self.bikes.clone(),
            cookie: None,
        }
    }

    /// Add a bike to the catalog.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory insert fails.
    pub async fn seed_bike(&self, name: &str, rental_price: i64, price: i64) -> Bike {
        self.bikes
            .insert(NewBike {
                name: name.to_string(),
                description: format!("{name} for testing"),
                rental_price: Decimal::from(rental_price),
                price: Decimal::from(price),
                image_url: None,
            })
            .await
            .expect("Failed to seed bike")
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(request, Body::from(body)).await
    }

    /// Register a user through the form and return the response.
    pub async fn register(&mut self, first_name: &str, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/create-user",
            &[
                ("firstName", first_name),
                ("lastName", "Rider"),
                ("email", email),
                ("password", password),
                ("phone", "555-0100"),
                ("age", "31"),
            ],
        )
        .await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let request = request.body(body).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn router(users: Arc<dyn DocumentStore<User>>, bikes: Arc<dyn DocumentStore<Bike>>) -> Router {
    let state = AppState::new(users, bikes, Arc::new(Argon2Hasher::new()));
    routes::app(state).layer(session_layer(tower_sessions::MemoryStore::default(), false))
}
