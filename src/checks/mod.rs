//! Check implementations, one module per admin panel area
//!
//! Every check sends its request(s), branches on the status code against
//! the codes that endpoint is allowed to return, and folds what it saw into
//! a single [`Verdict`]. Transport failures propagate with `?` and are
//! turned into failed verdicts by the runner.

use serde_json::Value;

use crate::client::{ApiResponse, PanelApi};
use crate::config::{Credentials, Fixtures};
use crate::error::{ApiError, Result};
use crate::probe::{Check, RunState, Verdict};

pub mod auth;
pub mod discounts;
pub mod orders;
pub mod products;
pub mod promo;
pub mod reviews;
pub mod staff;

/// What a check gets to work with
pub struct CheckContext<'a> {
    pub api: &'a dyn PanelApi,
    pub credentials: &'a Credentials,
    pub fixtures: &'a Fixtures,
    pub state: &'a mut RunState,
}

/// Run one check
pub async fn execute(check: Check, ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    match check {
        Check::SetupStatus => auth::setup_status(ctx).await,
        Check::Login => auth::login(ctx).await,
        Check::CurrentUser => auth::current_user(ctx).await,
        Check::Logout => auth::logout(ctx).await,
        Check::OrderList => orders::list(ctx).await,
        Check::SingleOrder => orders::single(ctx).await,
        Check::OrderUpdateStatus => orders::update_status(ctx).await,
        Check::OrderAddNote => orders::add_note(ctx).await,
        Check::OrderAddTag => orders::add_tag(ctx).await,
        Check::OrderRemoveTag => orders::remove_tag(ctx).await,
        Check::OrderAssign => orders::assign(ctx).await,
        Check::InvoiceGeneration => orders::generate_invoice(ctx).await,
        Check::EmailSending => orders::send_email(ctx).await,
        Check::StaffList => staff::list(ctx).await,
        Check::StaffInvite => staff::invite(ctx).await,
        Check::ReviewList => reviews::list(ctx).await,
        Check::ReviewCreate => reviews::create(ctx).await,
        Check::ReviewUpdate => reviews::update(ctx).await,
        Check::ReviewSampleCsv => reviews::sample_csv(ctx).await,
        Check::ReviewBulkApprove => reviews::bulk_approve(ctx).await,
        Check::ReviewImport => reviews::import(ctx).await,
        Check::ReviewSubmit => reviews::submit(ctx).await,
        Check::ReviewHelpful => reviews::helpful(ctx).await,
        Check::ProductReviews => reviews::product_reviews(ctx).await,
        Check::ReviewDelete => reviews::delete(ctx).await,
        Check::DiscountList => discounts::list(ctx).await,
        Check::DiscountCreate => discounts::create(ctx).await,
        Check::DiscountUpdate => discounts::update(ctx).await,
        Check::DiscountDelete => discounts::delete(ctx).await,
        Check::ProductList => products::list(ctx).await,
        Check::PromoCodeValidation => promo::validate(ctx).await,
    }
}

/// JSON body of a response whose status promised one
pub(crate) fn require_json(resp: &ApiResponse) -> Result<&Value> {
    resp.json.as_ref().ok_or_else(|| {
        ApiError::InvalidResponse(format!(
            "HTTP {} with non-JSON body: {}",
            resp.code(),
            resp.excerpt()
        ))
        .into()
    })
}

/// `success: false` on an otherwise accepted status
pub(crate) fn api_failure(resp: &ApiResponse) -> Verdict {
    Verdict::fail(format!(
        "API returned success=false: {}",
        resp.message().unwrap_or("Unknown error")
    ))
    .with_payload(resp.body())
}

/// A status outside the accepted set
pub(crate) fn unexpected(resp: &ApiResponse) -> Verdict {
    Verdict::fail(format!("HTTP {}: {}", resp.code(), resp.detail())).with_payload(resp.body())
}

/// A status outside the accepted set on an admin endpoint guarded by `permission`
pub(crate) fn rejected(resp: &ApiResponse, permission: &str) -> Verdict {
    match resp.code() {
        401 => Verdict::fail("Authentication failed - session cookie not accepted"),
        403 => Verdict::fail(format!(
            "Permission denied - user lacks {} permission",
            permission
        )),
        _ => unexpected(resp),
    }
}

/// String id stored under `key` (`_id` by default on this API)
pub(crate) fn id_of(value: &Value, key: &str) -> Option<String> {
    match &value[key] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
