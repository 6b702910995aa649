//! In-memory admin panel that keeps state between requests
//!
//! Where [`MockPanel`](super::MockPanel) answers from canned replies,
//! [`FakePanel`] behaves like a small server: logging in opens a session,
//! created records can be read back, and the uniqueness rules of the real
//! panel apply (one review per product and reviewer address, one discount
//! per code, one staff account per email). Whole runs can be tested against
//! it to catch checks that interfere with each other.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use super::{ApiRequest, ApiResponse, PanelApi};
use crate::config::Config;
use crate::error::Result;

const SESSION_COOKIE: &str = "admin_token=fake-session; Path=/; HttpOnly";
const CUSTOMER_EMAIL: &str = "customer@test.com";

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse::from_parts(
        StatusCode::from_u16(status).unwrap(),
        Some("application/json".to_string()),
        Vec::new(),
        body.to_string(),
    )
}

fn not_found(what: &str) -> ApiResponse {
    reply(404, json!({"success": false, "error": format!("{} not found", what)}))
}

fn text(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or_default().to_string()
}

struct Review {
    id: String,
    handle: String,
    email: String,
    status: String,
    voters: Vec<String>,
}

impl Review {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "productHandle": self.handle,
            "customerEmail": self.email,
            "status": self.status,
            "helpfulCount": self.voters.len(),
        })
    }
}

struct Order {
    id: String,
    status: String,
    tags: Vec<String>,
    notes: usize,
    assigned_to: Option<String>,
}

impl Order {
    fn to_json(&self) -> Value {
        json!({
            "orderId": self.id,
            "customer": {"name": "Test Customer", "email": CUSTOMER_EMAIL},
            "items": [{"productId": "p-1", "quantity": 1, "price": 1999}],
            "totalAmount": 1999,
            "status": self.status,
            "tags": self.tags,
            "notes": self.notes,
            "assignedTo": self.assigned_to,
        })
    }

    fn apply(&mut self, body: &Value) -> ApiResponse {
        match body["action"].as_str() {
            Some("update_status") => self.status = text(body, "status"),
            Some("add_note") => self.notes += 1,
            Some("add_tag") => self.tags.push(text(body, "tag")),
            Some("remove_tag") => {
                let tag = text(body, "tag");
                self.tags.retain(|t| *t != tag);
            }
            Some("assign") => self.assigned_to = Some(text(body, "assignedTo")),
            _ => return reply(400, json!({"success": false, "error": "Invalid action"})),
        }
        reply(200, json!({"success": true, "order": self.to_json()}))
    }
}

/// Server-side records
struct Store {
    email: String,
    password: String,
    product: String,
    logged_in: bool,
    next_id: u32,
    order: Order,
    staff: Vec<(String, String)>,
    reviews: Vec<Review>,
    discounts: Vec<(String, String)>,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn has_review(&self, handle: &str, email: &str) -> bool {
        self.reviews.iter().any(|r| r.handle == handle && r.email == email)
    }

    fn add_review(&mut self, handle: &str, email: &str, status: &str) -> &Review {
        let id = self.next_id("rev");
        self.reviews.push(Review {
            id,
            handle: handle.to_string(),
            email: email.to_lowercase(),
            status: status.to_string(),
            voters: Vec::new(),
        });
        &self.reviews[self.reviews.len() - 1]
    }

    fn login(&mut self, body: &Value) -> ApiResponse {
        if !text(body, "email").eq_ignore_ascii_case(&self.email) || text(body, "password") != self.password {
            return reply(401, json!({"success": false, "message": "Invalid credentials"}));
        }

        self.logged_in = true;
        let body = json!({"success": true, "user": self.user()});
        ApiResponse::from_parts(
            StatusCode::OK,
            Some("application/json".to_string()),
            vec![SESSION_COOKIE.to_string()],
            body.to_string(),
        )
    }

    fn user(&self) -> Value {
        json!({"email": self.email, "name": "Store Owner", "role": "owner"})
    }

    fn invite(&mut self, body: &Value) -> ApiResponse {
        let email = text(body, "email");
        if self.staff.iter().any(|(e, _)| *e == email) {
            return reply(400, json!({"success": false, "message": "Email already registered"}));
        }

        self.staff.push((email.clone(), text(body, "role")));
        reply(
            201,
            json!({"success": true, "staff": {"email": email, "tempPassword": "Temp-4821"}}),
        )
    }

    fn list_reviews(&self, query: &[(String, String)]) -> ApiResponse {
        let search = query
            .iter()
            .find(|(k, _)| k == "search")
            .map(|(_, v)| v.to_lowercase());
        let data: Vec<Value> = self
            .reviews
            .iter()
            .filter(|r| search.as_ref().is_none_or(|s| r.email.contains(s.as_str())))
            .map(Review::to_json)
            .collect();
        reply(
            200,
            json!({
                "success": true,
                "pagination": {"page": 1, "total": data.len()},
                "stats": {"total": self.reviews.len()},
                "data": data,
            }),
        )
    }

    fn create_review(&mut self, body: &Value) -> ApiResponse {
        let handle = text(body, "productHandle");
        if handle != self.product {
            return not_found("Product");
        }

        let status = body["status"].as_str().unwrap_or("pending").to_string();
        let review = self.add_review(&handle, &text(body, "customerEmail"), &status);
        reply(201, json!({"success": true, "data": review.to_json()}))
    }

    fn update_review(&mut self, id: &str, body: &Value) -> ApiResponse {
        let Some(review) = self.reviews.iter_mut().find(|r| r.id == id) else {
            return not_found("Review");
        };
        if let Some(status) = body["status"].as_str() {
            review.status = status.to_string();
        }
        reply(200, json!({"success": true, "data": review.to_json()}))
    }

    fn bulk(&mut self, body: &Value) -> ApiResponse {
        let ids: Vec<&str> = body["reviewIds"]
            .as_array()
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let mut approved = 0;
        for review in self.reviews.iter_mut().filter(|r| ids.contains(&r.id.as_str())) {
            review.status = "approved".to_string();
            approved += 1;
        }
        reply(
            200,
            json!({"success": true, "message": format!("{} review(s) approved", approved)}),
        )
    }

    fn import(&mut self, body: &Value) -> ApiResponse {
        let rows = body["reviews"].as_array().cloned().unwrap_or_default();
        let (mut imported, mut skipped) = (0, 0);
        for row in &rows {
            let handle = text(row, "product_handle");
            let email = text(row, "email").to_lowercase();
            if handle != self.product || self.has_review(&handle, &email) {
                skipped += 1;
                continue;
            }
            self.add_review(&handle, &email, "approved");
            imported += 1;
        }
        reply(
            200,
            json!({"success": true, "imported": imported, "skipped": skipped, "errors": []}),
        )
    }

    fn submit(&mut self, body: &Value) -> ApiResponse {
        let handle = text(body, "productHandle");
        if handle != self.product {
            return not_found("Product");
        }
        let email = text(body, "customerEmail").to_lowercase();
        if self.has_review(&handle, &email) {
            return reply(
                400,
                json!({"success": false, "error": "You have already submitted a review for this product"}),
            );
        }

        let review = self.add_review(&handle, &email, "pending");
        reply(
            200,
            json!({"success": true, "data": {"_id": review.id, "status": review.status}}),
        )
    }

    fn helpful(&mut self, body: &Value) -> ApiResponse {
        let id = text(body, "reviewId");
        let voter = text(body, "voterId");
        let Some(review) = self.reviews.iter_mut().find(|r| r.id == id) else {
            return not_found("Review");
        };
        if review.voters.contains(&voter) {
            return reply(
                400,
                json!({"success": false, "error": "You have already marked this review as helpful"}),
            );
        }
        review.voters.push(voter);
        reply(200, json!({"success": true, "helpfulCount": review.voters.len()}))
    }

    fn product_reviews(&self, handle: &str) -> ApiResponse {
        let data: Vec<Value> = self
            .reviews
            .iter()
            .filter(|r| r.handle == handle && r.status == "approved")
            .map(Review::to_json)
            .collect();
        reply(
            200,
            json!({"success": true, "stats": {"totalReviews": data.len()}, "data": data}),
        )
    }

    fn delete_review(&mut self, id: &str) -> ApiResponse {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != id);
        if self.reviews.len() == before {
            return not_found("Review");
        }
        reply(200, json!({"success": true, "message": "Review deleted successfully"}))
    }

    fn list_discounts(&self) -> ApiResponse {
        let discounts: Vec<Value> = self
            .discounts
            .iter()
            .map(|(id, code)| json!({"_id": id, "code": code}))
            .collect();
        reply(200, json!({"success": true, "discounts": discounts}))
    }

    fn create_discount(&mut self, body: &Value) -> ApiResponse {
        let code = text(body, "code");
        if self.discounts.iter().any(|(_, c)| *c == code) {
            return reply(400, json!({"success": false, "message": "Discount code already exists"}));
        }

        let id = self.next_id("disc");
        self.discounts.push((id.clone(), code.clone()));
        reply(201, json!({"success": true, "discount": {"_id": id, "code": code}}))
    }

    fn update_discount(&self, id: &str) -> ApiResponse {
        if !self.discounts.iter().any(|(d, _)| d == id) {
            return not_found("Discount");
        }
        reply(200, json!({"success": true}))
    }

    fn delete_discount(&mut self, id: &str) -> ApiResponse {
        let before = self.discounts.len();
        self.discounts.retain(|(d, _)| d != id);
        if self.discounts.len() == before {
            return not_found("Discount");
        }
        reply(200, json!({"success": true}))
    }

    fn products(&self) -> ApiResponse {
        reply(
            200,
            json!({"success": true, "products": [
                {"handle": self.product, "variants": [{"sku": "WPC-1KG", "inventoryQty": 12}]},
                {"handle": "creatine-monohydrate", "variants": [{"sku": "CM-250", "inventoryQty": 0}]}
            ]}),
        )
    }

    fn sample_csv() -> ApiResponse {
        ApiResponse::from_parts(
            StatusCode::OK,
            Some("text/csv; charset=utf-8".to_string()),
            Vec::new(),
            "product_handle,customer_name,email,rating,title,content\n".to_string(),
        )
    }
}

/// Stateful in-memory admin panel, seeded from a [`Config`]: the admin
/// login comes from its credentials, the order and review product from its
/// fixtures.
pub struct FakePanel {
    store: Mutex<Store>,
}

impl FakePanel {
    pub fn new(config: &Config) -> Self {
        let fixtures = &config.fixtures;
        Self {
            store: Mutex::new(Store {
                email: config.credentials.email.clone(),
                password: config.credentials.password.clone(),
                product: fixtures.review_product.clone(),
                logged_in: false,
                next_id: 0,
                order: Order {
                    id: fixtures.order_id.clone(),
                    status: "pending".to_string(),
                    tags: Vec::new(),
                    notes: 0,
                    assigned_to: None,
                },
                staff: vec![(config.credentials.email.clone(), "owner".to_string())],
                reviews: Vec::new(),
                discounts: Vec::new(),
            }),
        }
    }

    /// Reviews currently stored
    pub fn review_count(&self) -> usize {
        self.store.lock().unwrap().reviews.len()
    }

    /// Discounts currently stored
    pub fn discount_count(&self) -> usize {
        self.store.lock().unwrap().discounts.len()
    }
}

#[async_trait]
impl PanelApi for FakePanel {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut store = self.store.lock().unwrap();
        let body = request.body.clone().unwrap_or(Value::Null);
        let path: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();

        let open = matches!(
            path.as_slice(),
            ["api", "admin", "auth", "setup" | "login" | "logout"]
        ) || !matches!(path.as_slice(), ["api", "admin", ..]);
        if !open && !store.logged_in {
            return Ok(reply(401, json!({"success": false, "error": "Unauthorized"})));
        }

        let resp = match (request.method.as_str(), path.as_slice()) {
            ("GET", ["api", "admin", "auth", "setup"]) => {
                reply(200, json!({"success": true, "needsSetup": false}))
            }
            ("POST", ["api", "admin", "auth", "login"]) => store.login(&body),
            ("GET", ["api", "admin", "auth", "me"]) => {
                reply(200, json!({"success": true, "user": store.user()}))
            }
            ("POST", ["api", "admin", "auth", "logout"]) => {
                store.logged_in = false;
                reply(200, json!({"success": true, "message": "Logged out successfully"}))
            }

            ("GET", ["api", "admin", "orders"]) => reply(
                200,
                json!({"orders": [store.order.to_json()], "pagination": {"total": 1}}),
            ),
            (_, ["api", "admin", "orders", id, ..]) if *id != store.order.id => not_found("Order"),
            ("GET", ["api", "admin", "orders", _]) => reply(200, store.order.to_json()),
            ("PATCH", ["api", "admin", "orders", _]) => store.order.apply(&body),
            ("POST", ["api", "admin", "orders", id, "invoice"]) => reply(
                200,
                json!({"success": true, "invoice": {"invoiceNumber": format!("INV-{}", id)}}),
            ),
            ("POST", ["api", "admin", "orders", _, "email"]) => reply(
                200,
                json!({"success": true, "email": {"recipient": CUSTOMER_EMAIL}}),
            ),

            ("GET", ["api", "admin", "staff"]) => {
                let staff: Vec<Value> = store
                    .staff
                    .iter()
                    .map(|(email, role)| json!({"email": email, "role": role}))
                    .collect();
                reply(200, json!({"success": true, "staff": staff}))
            }
            ("POST", ["api", "admin", "staff"]) => store.invite(&body),

            ("GET", ["api", "admin", "reviews"]) => store.list_reviews(&request.query),
            ("POST", ["api", "admin", "reviews"]) => store.create_review(&body),
            ("GET", ["api", "admin", "reviews", "sample-csv"]) => Store::sample_csv(),
            ("POST", ["api", "admin", "reviews", "bulk"]) => store.bulk(&body),
            ("POST", ["api", "admin", "reviews", "import"]) => store.import(&body),
            ("PUT", ["api", "admin", "reviews", id]) => store.update_review(id, &body),
            ("DELETE", ["api", "admin", "reviews", id]) => store.delete_review(id),
            ("POST", ["api", "reviews", "submit"]) => store.submit(&body),
            ("POST", ["api", "reviews", "helpful"]) => store.helpful(&body),
            ("GET", ["api", "product-reviews", handle]) => store.product_reviews(handle),

            ("GET", ["api", "discounts"]) => store.list_discounts(),
            ("POST", ["api", "discounts"]) => store.create_discount(&body),
            ("PUT", ["api", "discounts", id]) => store.update_discount(id),
            ("DELETE", ["api", "discounts", id]) => store.delete_discount(id),

            ("GET", ["api", "products"]) => store.products(),
            ("POST", ["api", "promoCode", "check"]) => reply(
                404,
                json!({"success": false, "message": "Promo code not found"}),
            ),

            _ => not_found("Route"),
        };
        Ok(resp)
    }

    fn base_url(&self) -> &str {
        "http://fake.invalid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_admin_routes_need_a_session() {
        let fake = FakePanel::new(&Config::default());
        assert_eq!(fake.get("/api/admin/auth/me").await.unwrap().code(), 401);

        let creds = Config::default().credentials;
        let login = fake
            .post(
                "/api/admin/auth/login",
                json!({"email": creds.email, "password": creds.password}),
            )
            .await
            .unwrap();
        assert!(login.sets_cookie("admin_token"));
        assert_eq!(fake.get("/api/admin/auth/me").await.unwrap().code(), 200);

        fake.post("/api/admin/auth/logout", json!({})).await.unwrap();
        assert_eq!(fake.get("/api/admin/auth/me").await.unwrap().code(), 401);
    }

    #[tokio::test]
    async fn test_one_review_per_product_and_reviewer() {
        let fake = FakePanel::new(&Config::default());
        let body = json!({
            "productHandle": "whey-protein-chocolate",
            "customerName": "Jo",
            "customerEmail": "Jo@Test.com",
        });

        assert_eq!(fake.post("/api/reviews/submit", body.clone()).await.unwrap().code(), 200);
        let again = fake.post("/api/reviews/submit", body).await.unwrap();
        assert_eq!(again.code(), 400);
        assert!(again.message().unwrap().contains("already submitted"));
        assert_eq!(fake.review_count(), 1);
    }
}
