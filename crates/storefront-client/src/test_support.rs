//! In-process stand-in for the storefront API, used by dispatcher tests.
//!
//! `FakeBackend` implements [`HttpTransport`], records every request it
//! receives and keeps enough server-side state (accounts, catalog, carts,
//! orders) for re-fetches to observe earlier mutations. Individual routes can
//! be forced to fail, and the whole backend can be taken offline.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use storefront_core::{
    CardDetails, CartAddition, CartItem, Category, CheckoutRequest, Credentials, Money, Order,
    OrderItem, OrderStatus, PasswordChange, PaymentMethod, Product, ProductDraft, ProductPatch,
    ProfileUpdate, QuantityUpdate, Registration, User, ADMIN_EMAIL,
};
use storefront_state::{MemoryTokenStore, Store};

use crate::dispatcher::Dispatcher;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

pub(crate) const CUSTOMER_EMAIL: &str = "ana@example.com";
pub(crate) const CUSTOMER_PASSWORD: &str = "secret123";
pub(crate) const ADMIN_PASSWORD: &str = "admin123";

/// A card checkout that passes every client-side rule.
pub(crate) fn card_checkout() -> CheckoutRequest {
    CheckoutRequest {
        shipping_address: "Calle Mayor 1, Madrid".to_string(),
        payment_method: PaymentMethod::CreditCard,
        payment_details: Some(CardDetails {
            cardholder_name: "Ana Lopez".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expiry_date: "12/99".to_string(),
            cvv: "123".to_string(),
        }),
    }
}

struct Account {
    user: User,
    password: String,
    token: String,
}

struct FakeState {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    products: Vec<Product>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
    next_id: i64,
    failures: HashMap<(Method, String), ApiResponse>,
    offline: bool,
    calls: Vec<ApiRequest>,
}

type Reply = Result<ApiResponse, ApiResponse>;

fn parse_id(segment: &str) -> Result<i64, ApiResponse> {
    segment.parse::<i64>().map_err(|_| error(404, "Not found"))
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status, body)
}

fn error(status: u16, message: &str) -> ApiResponse {
    reply(status, json!({ "error": message }))
}

fn to_json(value: &impl serde::Serialize) -> Value {
    serde_json::to_value(value).unwrap()
}

fn user(id: i64, email: &str, first_name: &str) -> User {
    User {
        id,
        email: email.to_string(),
        first_name: Some(first_name.to_string()),
        last_name: None,
        phone: None,
        address: None,
        is_active: Some(true),
        is_admin: false,
        created_at: None,
    }
}

fn product(id: i64, name: &str, description: &str, category_id: i64, cents: i64, stock: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_cents(cents),
        stock,
        image_url: None,
        category_id,
        category: None,
        is_active: true,
        created_at: None,
    }
}

impl FakeState {
    fn seeded() -> Self {
        let category = |id: i64, name: &str| Category {
            id,
            name: name.to_string(),
            description: None,
        };

        FakeState {
            accounts: vec![
                Account {
                    user: user(1, ADMIN_EMAIL, "Admin"),
                    password: ADMIN_PASSWORD.to_string(),
                    token: "tok-1".to_string(),
                },
                Account {
                    user: user(2, CUSTOMER_EMAIL, "Ana"),
                    password: CUSTOMER_PASSWORD.to_string(),
                    token: "tok-2".to_string(),
                },
            ],
            categories: vec![
                category(1, "Blankets"),
                category(2, "Toys"),
                category(3, "Accessories"),
            ],
            products: vec![
                product(1, "Wool Scarf", "Chunky merino knit", 3, 2500, 10),
                product(2, "Amigurumi Bear", "Cotton toy bear", 2, 1850, 5),
                product(3, "Baby Blanket", "Soft granny squares", 1, 4200, 3),
                product(4, "Bunny Rattle", "Cotton rattle", 2, 999, 8),
            ],
            cart: Vec::new(),
            orders: Vec::new(),
            next_id: 100,
            failures: HashMap::new(),
            offline: false,
            calls: Vec::new(),
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn account_index(&self, token: Option<&str>) -> Result<usize, ApiResponse> {
        let token = token.ok_or_else(|| reply(401, json!({"msg": "Missing Authorization Header"})))?;
        self.accounts
            .iter()
            .position(|a| a.token == token)
            .ok_or_else(|| reply(401, json!({"msg": "Invalid token"})))
    }

    fn admin_index(&self, token: Option<&str>) -> Result<usize, ApiResponse> {
        let index = self.account_index(token)?;
        if !self.accounts[index].user.is_admin() {
            return Err(reply(403, json!({"error": "Admin access required"})));
        }
        Ok(index)
    }

    fn product_index(&self, id: i64) -> Result<usize, ApiResponse> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| error(404, "Product not found"))
    }

    fn body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiResponse> {
        let body = request.body.clone().unwrap_or(Value::Null);
        serde_json::from_value(body).map_err(|e| error(400, &e.to_string()))
    }

    fn param(request: &ApiRequest, key: &str) -> Option<String> {
        request
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn handle(&mut self, request: &ApiRequest) -> Reply {
        let token = request.token.as_deref();
        let path = request
            .path
            .strip_prefix("/api/")
            .ok_or_else(|| error(404, "Not found"))?;
        let segments: Vec<&str> = path.split('/').collect();

        match (request.method, segments.as_slice()) {
            // ---------------------------------------------------------------
            // Auth
            // ---------------------------------------------------------------
            (Method::Post, ["login"]) => {
                let credentials: Credentials = Self::body(request)?;
                let account = self
                    .accounts
                    .iter()
                    .find(|a| a.user.email == credentials.email && a.password == credentials.password)
                    .ok_or_else(|| error(401, "Invalid credentials"))?;
                // Login returns a reduced user record
                Ok(reply(
                    200,
                    json!({
                        "token": account.token,
                        "user": {"id": account.user.id, "email": account.user.email, "is_active": true}
                    }),
                ))
            }
            (Method::Post, ["register"]) => {
                let registration: Registration = Self::body(request)?;
                if self.accounts.iter().any(|a| a.user.email == registration.email) {
                    return Err(error(400, "User already exists"));
                }
                let id = self.next_id();
                let mut new_user = user(id, &registration.email, "");
                new_user.first_name = registration.first_name;
                new_user.last_name = registration.last_name;
                new_user.phone = registration.phone;
                new_user.address = registration.address;
                self.accounts.push(Account {
                    user: new_user.clone(),
                    password: registration.password,
                    token: format!("tok-{}", id),
                });
                Ok(reply(201, json!({"message": "User created", "user": to_json(&new_user)})))
            }
            (Method::Get, ["profile"]) => {
                let index = self.account_index(token)?;
                Ok(reply(200, to_json(&self.accounts[index].user)))
            }
            (Method::Put, ["profile"]) => {
                let index = self.account_index(token)?;
                let update: ProfileUpdate = Self::body(request)?;
                let user = &mut self.accounts[index].user;
                if update.first_name.is_some() {
                    user.first_name = update.first_name;
                }
                if update.last_name.is_some() {
                    user.last_name = update.last_name;
                }
                if update.phone.is_some() {
                    user.phone = update.phone;
                }
                if update.address.is_some() {
                    user.address = update.address;
                }
                Ok(reply(200, to_json(&*user)))
            }
            (Method::Put, ["profile", "password"]) => {
                let index = self.account_index(token)?;
                let change: PasswordChange = Self::body(request)?;
                if self.accounts[index].password != change.current_password {
                    return Err(error(400, "Current password is incorrect"));
                }
                self.accounts[index].password = change.new_password;
                Ok(reply(200, json!({"message": "Password updated"})))
            }
            (Method::Delete, ["profile"]) => {
                let index = self.account_index(token)?;
                let account = self.accounts.remove(index);
                self.cart.retain(|i| i.user_id != Some(account.user.id));
                Ok(reply(200, json!({"message": "Account deleted"})))
            }

            // ---------------------------------------------------------------
            // Catalog
            // ---------------------------------------------------------------
            (Method::Get, ["products"]) => {
                let category = Self::param(request, "category_id").and_then(|c| c.parse::<i64>().ok());
                let search = Self::param(request, "search").map(|s| s.to_lowercase());
                let listing: Vec<&Product> = self
                    .products
                    .iter()
                    .filter(|p| category.map_or(true, |c| p.category_id == c))
                    .filter(|p| {
                        search.as_ref().map_or(true, |s| {
                            p.name.to_lowercase().contains(s.as_str())
                                || p.description.to_lowercase().contains(s.as_str())
                        })
                    })
                    .collect();
                Ok(reply(200, to_json(&listing)))
            }
            (Method::Get, ["products", product_id]) => {
                let index = self.product_index(parse_id(product_id)?)?;
                Ok(reply(200, to_json(&self.products[index])))
            }
            (Method::Post, ["products"]) => {
                self.admin_index(token)?;
                let draft: ProductDraft = Self::body(request)?;
                let id = self.next_id();
                let mut created = product(id, &draft.name, &draft.description, draft.category_id, draft.price.cents(), draft.stock);
                created.image_url = draft.image_url;
                created.is_active = draft.is_active;
                self.products.push(created.clone());
                Ok(reply(201, to_json(&created)))
            }
            (Method::Put, ["products", product_id]) => {
                self.admin_index(token)?;
                let index = self.product_index(parse_id(product_id)?)?;
                let patch: ProductPatch = Self::body(request)?;
                let target = &mut self.products[index];
                if let Some(name) = patch.name {
                    target.name = name;
                }
                if let Some(description) = patch.description {
                    target.description = description;
                }
                if let Some(price) = patch.price {
                    target.price = price;
                }
                if let Some(stock) = patch.stock {
                    target.stock = stock;
                }
                if let Some(category_id) = patch.category_id {
                    target.category_id = category_id;
                }
                if patch.image_url.is_some() {
                    target.image_url = patch.image_url;
                }
                if let Some(is_active) = patch.is_active {
                    target.is_active = is_active;
                }
                Ok(reply(200, to_json(&*target)))
            }
            (Method::Delete, ["products", product_id]) => {
                self.admin_index(token)?;
                let index = self.product_index(parse_id(product_id)?)?;
                self.products.remove(index);
                Ok(reply(200, json!({"message": "Product deleted"})))
            }
            (Method::Get, ["categories"]) => Ok(reply(200, to_json(&self.categories))),

            // ---------------------------------------------------------------
            // Cart
            // ---------------------------------------------------------------
            (Method::Get, ["cart"]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let items: Vec<CartItem> = self
                    .cart
                    .iter()
                    .filter(|i| i.user_id == Some(user_id))
                    .cloned()
                    .map(|mut i| {
                        i.product = self.products.iter().find(|p| p.id == i.product_id).cloned();
                        i
                    })
                    .collect();
                Ok(reply(200, to_json(&items)))
            }
            (Method::Post, ["cart"]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let addition: CartAddition = Self::body(request)?;
                self.product_index(addition.product_id)?;
                let existing = self
                    .cart
                    .iter()
                    .position(|i| i.user_id == Some(user_id) && i.product_id == addition.product_id);
                if let Some(index) = existing {
                    self.cart[index].quantity += addition.quantity;
                } else {
                    let id = self.next_id();
                    self.cart.push(CartItem {
                        id,
                        user_id: Some(user_id),
                        product_id: addition.product_id,
                        quantity: addition.quantity,
                        product: None,
                        created_at: None,
                    });
                }
                Ok(reply(201, json!({"message": "Added to cart"})))
            }
            (Method::Put, ["cart", item_id]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let item_id = parse_id(item_id)?;
                let update: QuantityUpdate = Self::body(request)?;
                let line = self
                    .cart
                    .iter_mut()
                    .find(|i| i.id == item_id && i.user_id == Some(user_id))
                    .ok_or_else(|| error(404, "Cart item not found"))?;
                line.quantity = update.quantity;
                Ok(reply(200, json!({"message": "Cart updated"})))
            }
            (Method::Delete, ["cart", item_id]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let item_id = parse_id(item_id)?;
                let before = self.cart.len();
                self.cart
                    .retain(|i| !(i.id == item_id && i.user_id == Some(user_id)));
                if self.cart.len() == before {
                    return Err(error(404, "Cart item not found"));
                }
                Ok(reply(200, json!({"message": "Removed from cart"})))
            }

            // ---------------------------------------------------------------
            // Orders
            // ---------------------------------------------------------------
            (Method::Get, ["orders"]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let mut orders: Vec<&Order> =
                    self.orders.iter().filter(|o| o.user_id == user_id).collect();
                orders.sort_by(|a, b| b.id.cmp(&a.id));
                Ok(reply(200, to_json(&orders)))
            }
            (Method::Get, ["orders", order_id]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let order_id = parse_id(order_id)?;
                self.orders
                    .iter()
                    .find(|o| o.id == order_id && o.user_id == user_id)
                    .map(|o| reply(200, to_json(o)))
                    .ok_or_else(|| error(404, "Order not found"))
            }
            (Method::Post, ["checkout"]) => {
                let user_id = self.accounts[self.account_index(token)?].user.id;
                let checkout: CheckoutRequest = Self::body(request)?;
                let lines: Vec<CartItem> = self
                    .cart
                    .iter()
                    .filter(|i| i.user_id == Some(user_id))
                    .cloned()
                    .collect();
                if lines.is_empty() {
                    return Err(error(400, "Cart is empty"));
                }

                let order_id = self.next_id();
                let mut items = Vec::new();
                let mut total = Money::zero();
                for line in &lines {
                    let index = self.product_index(line.product_id)?;
                    let price = self.products[index].price;
                    self.products[index].stock -= line.quantity;
                    total += price * line.quantity;
                    let item_id = self.next_id();
                    items.push(OrderItem {
                        id: item_id,
                        order_id,
                        product_id: line.product_id,
                        quantity: line.quantity,
                        price,
                        product: None,
                    });
                }

                let order = Order {
                    id: order_id,
                    user_id,
                    total_amount: total,
                    status: OrderStatus::Paid,
                    payment_method: Some(checkout.payment_method),
                    shipping_address: checkout.shipping_address,
                    created_at: None,
                    order_items: items,
                };
                self.orders.push(order.clone());
                self.cart.retain(|i| i.user_id != Some(user_id));

                Ok(reply(
                    201,
                    json!({
                        "order": to_json(&order),
                        "payment": {"status": "approved", "transaction_id": format!("txn-{}", order_id)}
                    }),
                ))
            }

            // ---------------------------------------------------------------
            // Admin
            // ---------------------------------------------------------------
            (Method::Get, ["admin", "users"]) => {
                self.admin_index(token)?;
                let users: Vec<&User> = self.accounts.iter().map(|a| &a.user).collect();
                Ok(reply(200, to_json(&users)))
            }

            _ => Err(error(404, "Not found")),
        }
    }
}

/// Stateful fake of the storefront API.
#[derive(Clone)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        FakeBackend {
            state: Arc::new(Mutex::new(FakeState::seeded())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A dispatcher over this backend, optionally starting with a stored token.
    pub(crate) fn dispatcher(&self, token: Option<String>) -> Dispatcher {
        self.dispatcher_with_storage(token).0
    }

    /// Like [`FakeBackend::dispatcher`], also returning the token storage.
    pub(crate) fn dispatcher_with_storage(
        &self,
        token: Option<String>,
    ) -> (Dispatcher, Arc<MemoryTokenStore>) {
        let storage = Arc::new(match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        });
        let store = Store::open(storage.clone());
        (Dispatcher::new(store, Arc::new(self.clone())), storage)
    }

    pub(crate) fn customer_token(&self) -> String {
        "tok-2".to_string()
    }

    pub(crate) fn admin_token(&self) -> String {
        "tok-1".to_string()
    }

    /// Makes `method path` answer with `status` and `body` from now on.
    pub(crate) fn fail_route(&self, method: Method, path: &str, status: u16, body: Value) {
        self.lock()
            .failures
            .insert((method, path.to_string()), reply(status, body));
    }

    /// While offline every request fails without a response.
    pub(crate) fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.lock().calls.clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub(crate) fn last_call(&self) -> Option<ApiRequest> {
        self.lock().calls.last().cloned()
    }
}

#[async_trait]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let mut state = self.lock();
        state.calls.push(request.clone());

        if state.offline {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        if let Some(forced) = state
            .failures
            .get(&(request.method, request.path.clone()))
        {
            return Ok(forced.clone());
        }

        Ok(match state.handle(&request) {
            Ok(response) | Err(response) => response,
        })
    }
}
