//! Integration test support for the SwiftMart storefront.
//!
//! Everything runs in-process on ephemeral ports:
//!
//! - [`FakeBackend`] - an axum server speaking the SwiftMart backend API,
//!   with an in-memory catalogue, accounts and carts
//! - [`TestStorefront`] - the real storefront router pointed at a backend
//! - [`unreachable_url`] - a backend URL nothing listens on
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = FakeBackend::start().await;
//! let storefront = TestStorefront::start(&backend.url()).await;
//! let resp = storefront.client().get(storefront.url("/")).send().await?;
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use swiftmart_storefront::config::{BackendConfig, StorefrontConfig};
use swiftmart_storefront::state::AppState;

/// Demo catalogue: id, name, price, image.
pub const CATALOGUE: &[(i32, &str, i64, &str)] = &[
    (1, "Lays", 55, "img1.avif"),
    (2, "Milk", 40, "img2.avif"),
    (3, "Bread", 45, "img3.avif"),
    (4, "Apple", 120, "img4.avif"),
    (5, "Grape", 90, "img5.avif"),
];

/// Account present in every fresh backend.
pub const SHOPPER_EMAIL: &str = "shopper@swiftmart.in";
pub const SHOPPER_PASSWORD: &str = "hunter22";
pub const SHOPPER_ID: i32 = 1;

// =============================================================================
// Fake backend
// =============================================================================

struct Account {
    id: i32,
    email: String,
    password: String,
}

#[derive(Default)]
struct Db {
    products: Vec<(i32, String, i64, String)>,
    accounts: Vec<Account>,
    /// user id -> (product id, quantity), in insertion order
    carts: HashMap<i32, Vec<(i32, u32)>>,
}

#[derive(Default)]
struct Counters {
    mutations: AtomicUsize,
    cart_reads: AtomicUsize,
    fail_cart_reads: AtomicBool,
}

#[derive(Clone)]
struct Backend {
    db: Arc<Mutex<Db>>,
    counters: Arc<Counters>,
}

/// In-process stand-in for the SwiftMart backend.
pub struct FakeBackend {
    addr: SocketAddr,
    backend: Backend,
}

impl FakeBackend {
    /// Start a backend with the demo catalogue and one shopper account.
    pub async fn start() -> Self {
        let this = Self::start_empty().await;
        {
            let mut db = this.backend.db.lock().unwrap();
            db.products = catalogue();
        }
        this
    }

    /// Start a backend with no products (until `/add-products` is called).
    pub async fn start_empty() -> Self {
        let db = Db {
            accounts: vec![Account {
                id: SHOPPER_ID,
                email: SHOPPER_EMAIL.to_string(),
                password: SHOPPER_PASSWORD.to_string(),
            }],
            ..Db::default()
        };
        let backend = Backend {
            db: Arc::new(Mutex::new(db)),
            counters: Arc::new(Counters::default()),
        };

        let app = Router::new()
            .route("/login", post(login))
            .route("/signup", post(signup))
            .route("/products", get(products))
            .route("/add-products", post(add_products))
            .route("/cart/add/{user_id}/{product_id}", post(cart_add))
            .route("/cart/remove/{user_id}/{product_id}", delete(cart_remove))
            .route("/cart/{user_id}", get(cart_get))
            .with_state(backend.clone());

        let addr = serve(app).await;
        Self { addr, backend }
    }

    /// Base URL of this backend.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Backend client configuration for this backend.
    #[must_use]
    pub fn config(&self) -> BackendConfig {
        BackendConfig::from_url(&self.url()).unwrap()
    }

    /// Cart add/remove calls received so far, successful or not.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.backend.counters.mutations.load(Ordering::SeqCst)
    }

    /// `GET /cart/{user_id}` calls received so far.
    #[must_use]
    pub fn cart_reads(&self) -> usize {
        self.backend.counters.cart_reads.load(Ordering::SeqCst)
    }

    /// Make `GET /cart/{user_id}` answer 500 until switched back.
    pub fn fail_cart_reads(&self, failing: bool) {
        self.backend
            .counters
            .fail_cart_reads
            .store(failing, Ordering::SeqCst);
    }

    /// Quantity of a product in a user's cart, straight from the store.
    #[must_use]
    pub fn quantity(&self, user_id: i32, product_id: i32) -> u32 {
        let db = self.backend.db.lock().unwrap();
        db.carts
            .get(&user_id)
            .and_then(|lines| lines.iter().find(|(id, _)| *id == product_id))
            .map_or(0, |(_, quantity)| *quantity)
    }
}

fn catalogue() -> Vec<(i32, String, i64, String)> {
    CATALOGUE
        .iter()
        .map(|(id, name, price, image)| (*id, (*name).to_string(), *price, (*image).to_string()))
        .collect()
}

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

fn field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str)
}

fn missing_field(name: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "loc": ["body", name], "msg": "Field required" }] })),
    )
}

async fn login(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let (Some(email), Some(password)) = (field(&body, "email"), field(&body, "password")) else {
        return missing_field("email");
    };

    let db = b.db.lock().unwrap();
    match db.accounts.iter().find(|a| a.email == email) {
        Some(account) if account.password == password => (
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "token": format!("token-{}", account.id),
                "user_id": account.id,
            })),
        ),
        _ => detail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn signup(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let (Some(_name), Some(email), Some(password)) = (
        field(&body, "name"),
        field(&body, "email"),
        field(&body, "password"),
    ) else {
        return missing_field("name");
    };

    let mut db = b.db.lock().unwrap();
    if db.accounts.iter().any(|a| a.email == email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    let id = db.accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    db.accounts.push(Account {
        id,
        email: email.to_string(),
        password: password.to_string(),
    });
    (
        StatusCode::OK,
        Json(json!({ "message": "User registered successfully" })),
    )
}

async fn products(State(b): State<Backend>) -> Json<Value> {
    let db = b.db.lock().unwrap();
    let products: Vec<Value> = db
        .products
        .iter()
        .map(|(id, name, price, image)| json!({ "id": id, "name": name, "price": price, "image": image }))
        .collect();
    Json(json!({ "products": products }))
}

async fn add_products(State(b): State<Backend>) -> Json<Value> {
    let mut db = b.db.lock().unwrap();
    if db.products.is_empty() {
        db.products = catalogue();
    }
    Json(json!({ "message": "Products added successfully" }))
}

async fn cart_add(
    State(b): State<Backend>,
    Path((user_id, product_id)): Path<(i32, i32)>,
) -> (StatusCode, Json<Value>) {
    b.counters.mutations.fetch_add(1, Ordering::SeqCst);
    let mut db = b.db.lock().unwrap();
    if !db.products.iter().any(|(id, ..)| *id == product_id) {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    }

    let lines = db.carts.entry(user_id).or_default();
    match lines.iter_mut().find(|(id, _)| *id == product_id) {
        Some((_, quantity)) => *quantity += 1,
        None => lines.push((product_id, 1)),
    }
    (StatusCode::OK, Json(json!({ "message": "Item added to cart" })))
}

async fn cart_remove(
    State(b): State<Backend>,
    Path((user_id, product_id)): Path<(i32, i32)>,
) -> (StatusCode, Json<Value>) {
    b.counters.mutations.fetch_add(1, Ordering::SeqCst);
    let mut db = b.db.lock().unwrap();
    let lines = db.carts.entry(user_id).or_default();
    let Some(index) = lines.iter().position(|(id, _)| *id == product_id) else {
        return detail(StatusCode::NOT_FOUND, " Item not found in cart");
    };

    match lines.get_mut(index) {
        Some((_, quantity)) if *quantity > 1 => *quantity -= 1,
        _ => {
            lines.remove(index);
        }
    }
    (StatusCode::OK, Json(json!({ "message": "Item removed from cart" })))
}

async fn cart_get(
    State(b): State<Backend>,
    Path(user_id): Path<i32>,
) -> (StatusCode, Json<Value>) {
    b.counters.cart_reads.fetch_add(1, Ordering::SeqCst);
    if b.counters.fail_cart_reads.load(Ordering::SeqCst) {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    }

    let db = b.db.lock().unwrap();
    let items: Vec<Value> = db
        .carts
        .get(&user_id)
        .into_iter()
        .flatten()
        .filter_map(|(product_id, quantity)| {
            db.products
                .iter()
                .find(|(id, ..)| id == product_id)
                .map(|(_, name, price, image)| {
                    json!({
                        "name": name,
                        "price": price,
                        "image": image,
                        "quantity": quantity,
                        "product_id": product_id,
                    })
                })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "cart": items })))
}

// =============================================================================
// Storefront harness
// =============================================================================

/// The real storefront application served on an ephemeral port.
pub struct TestStorefront {
    addr: SocketAddr,
}

impl TestStorefront {
    /// Serve the storefront against the given backend URL.
    pub async fn start(backend_url: &str) -> Self {
        let backend = BackendConfig::from_url(backend_url).unwrap();
        let state = AppState::new(StorefrontConfig::for_backend(backend));
        let addr = serve(swiftmart_storefront::app(state)).await;
        Self { addr }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A browser-like client: keeps cookies, does not follow redirects.
    #[must_use]
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }
}

/// A backend URL that refuses connections.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
