//! Order workflow checks
//!
//! All of these work on the seeded fixture order. The PATCH endpoint
//! multiplexes several mutations through an `action` field.

use serde_json::{Value, json};

use super::{CheckContext, api_failure, rejected, require_json};
use crate::client::{ApiRequest, ApiResponse};
use crate::error::Result;
use crate::probe::Verdict;

const ORDERS: &str = "/api/admin/orders";

/// Fields every order document must carry
const REQUIRED_ORDER_FIELDS: [&str; 5] = ["orderId", "customer", "items", "totalAmount", "status"];

fn order_path(ctx: &CheckContext<'_>) -> String {
    format!("{}/{}", ORDERS, ctx.fixtures.order_id)
}

fn contains_order(data: &Value, order_id: &str) -> bool {
    data["orders"]
        .as_array()
        .is_some_and(|orders| orders.iter().any(|o| o["orderId"] == order_id))
}

/// Admin order endpoints answer 404 for an unknown order id
fn order_rejected(resp: &ApiResponse, order_id: &str) -> Verdict {
    if resp.code() == 404 {
        Verdict::fail(format!("Order {} not found", order_id))
    } else {
        rejected(resp, "orders.edit")
    }
}

pub async fn list(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.get(ORDERS).await?;
    if resp.code() != 200 {
        return Ok(rejected(&resp, "orders.view"));
    }

    let data = require_json(&resp)?;
    let Some(orders) = data["orders"].as_array() else {
        return Ok(Verdict::fail("Invalid response format: missing 'orders'").with_payload(data));
    };

    let order_id = &ctx.fixtures.order_id;
    if contains_order(data, order_id) {
        return Ok(Verdict::pass(format!(
            "Successfully retrieved {} orders, test order {} found",
            orders.len(),
            order_id
        )));
    }

    // The first page may not include the fixture; fall back to search
    let search = ctx
        .api
        .send(ApiRequest::get(ORDERS).query("search", order_id))
        .await?;
    if search.code() == 200 && contains_order(search.body(), order_id) {
        return Ok(Verdict::pass(format!(
            "Orders API working, test order {} found via search",
            order_id
        )));
    }

    Ok(Verdict::fail(format!(
        "Test order {} not found in {} orders",
        order_id,
        orders.len()
    )))
}

pub async fn single(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let order_id = &ctx.fixtures.order_id;
    let resp = ctx.api.get(&order_path(ctx)).await?;
    match resp.code() {
        200 => {}
        404 => {
            return Ok(Verdict::fail(format!(
                "Order {} not found in database",
                order_id
            )));
        }
        _ => return Ok(rejected(&resp, "orders.view")),
    }

    let data = require_json(&resp)?;
    let missing: Vec<&str> = REQUIRED_ORDER_FIELDS
        .iter()
        .copied()
        .filter(|f| data.get(f).is_none())
        .collect();
    if !missing.is_empty() {
        return Ok(
            Verdict::fail(format!("Missing required fields: {}", missing.join(", ")))
                .with_payload(data),
        );
    }

    let customer = &data["customer"];
    let name = match customer["name"].as_str() {
        Some(name) => name.to_string(),
        None => format!(
            "{} {}",
            customer["firstName"].as_str().unwrap_or_default(),
            customer["lastName"].as_str().unwrap_or_default()
        )
        .trim()
        .to_string(),
    };

    Ok(Verdict::pass(format!(
        "Order details retrieved successfully: Customer {}, Total ₹{}",
        name,
        amount(&data["totalAmount"])
    )))
}

/// Order totals arrive as numbers or numeric strings
fn amount(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => "unknown".to_string(),
    }
}

/// Send one PATCH action against the fixture order
async fn patch(ctx: &CheckContext<'_>, body: Value) -> Result<ApiResponse> {
    ctx.api
        .send(ApiRequest::patch(order_path(ctx)).json(body))
        .await
}

pub async fn update_status(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "action": "update_status",
        "status": "processing",
        "user": ctx.fixtures.operator,
    });
    let resp = patch(ctx, body).await?;
    if resp.code() != 200 {
        return Ok(order_rejected(&resp, &ctx.fixtures.order_id));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    let status = data["order"]["status"].as_str().unwrap_or_default();
    if status != "processing" {
        return Ok(Verdict::fail(format!(
            "Status not updated correctly: expected 'processing', got '{}'",
            status
        ))
        .with_payload(data));
    }

    Ok(Verdict::pass("Order status updated successfully to 'processing'"))
}

/// PATCH actions whose only contract is `success: true`
async fn simple_action(ctx: &CheckContext<'_>, body: Value, done: String) -> Result<Verdict> {
    let resp = patch(ctx, body).await?;
    if resp.code() != 200 {
        return Ok(order_rejected(&resp, &ctx.fixtures.order_id));
    }

    require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    Ok(Verdict::pass(done))
}

pub async fn add_note(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "action": "add_note",
        "content": "Test note added via API testing",
        "author": ctx.fixtures.operator,
        "isInternal": true,
    });
    simple_action(ctx, body, "Note added successfully to order".to_string()).await
}

pub async fn add_tag(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({"action": "add_tag", "tag": "test-tag"});
    simple_action(ctx, body, "Tag 'test-tag' added successfully to order".to_string()).await
}

pub async fn remove_tag(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({"action": "remove_tag", "tag": "test-tag"});
    simple_action(
        ctx,
        body,
        "Tag 'test-tag' removed successfully from order".to_string(),
    )
    .await
}

pub async fn assign(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "action": "assign",
        "assignedTo": ctx.fixtures.operator,
        "user": "Admin",
    });
    let done = format!("Order assigned successfully to '{}'", ctx.fixtures.operator);
    simple_action(ctx, body, done).await
}

pub async fn generate_invoice(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let path = format!("{}/invoice", order_path(ctx));
    let resp = ctx
        .api
        .post(&path, json!({"user": ctx.fixtures.operator}))
        .await?;
    if resp.code() != 200 {
        return Ok(order_rejected(&resp, &ctx.fixtures.order_id));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    match data["invoice"]["invoiceNumber"].as_str() {
        Some(number) if !number.is_empty() => Ok(Verdict::pass(format!(
            "Invoice generated successfully: {}",
            number
        ))),
        _ => Ok(
            Verdict::fail("Invoice generated but no invoice number returned").with_payload(data),
        ),
    }
}

pub async fn send_email(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let path = format!("{}/email", order_path(ctx));
    let body = json!({
        "type": "custom",
        "subject": "Test Email Subject",
        "customMessage": "This is a test email message sent via API testing",
        "user": ctx.fixtures.operator,
    });
    let resp = ctx.api.post(&path, body).await?;
    if resp.code() != 200 {
        return Ok(order_rejected(&resp, &ctx.fixtures.order_id));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    Ok(Verdict::pass(format!(
        "Email sent successfully to {}",
        data["email"]["recipient"].as_str().unwrap_or("unknown recipient")
    )))
}
