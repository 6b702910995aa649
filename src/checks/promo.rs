//! Promo code validation check

use serde_json::json;

use super::{CheckContext, require_json, unexpected};
use crate::error::Result;
use crate::probe::Verdict;

const PROMO_CHECK: &str = "/api/promoCode/check";

/// A valid code and a rejected one are both correct behaviour here: the
/// check only asserts that the endpoint answers with one of the documented
/// statuses.
pub async fn validate(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "code": ctx.fixtures.promo_code,
        "cartItems": [{"productId": "test", "quantity": 1, "price": 600}],
    });
    let resp = ctx.api.post(PROMO_CHECK, body).await?;

    match resp.code() {
        200 => {
            let data = require_json(&resp)?;
            if resp.success() {
                Ok(Verdict::pass(format!(
                    "Promo code validation successful: {}",
                    resp.message().unwrap_or("Valid code")
                )))
            } else {
                Ok(Verdict::fail(format!(
                    "Unexpected response: {}",
                    resp.message().unwrap_or("Unknown error")
                ))
                .with_payload(data))
            }
        }
        400 | 404 | 410 => Ok(Verdict::pass(format!(
            "Promo code validation working (code not found/invalid): {}",
            resp.message().unwrap_or("Code validation working")
        ))),
        _ => Ok(unexpected(&resp)),
    }
}
