//! Staff management checks

use serde_json::json;

use super::{CheckContext, api_failure, rejected, require_json};
use crate::error::Result;
use crate::probe::Verdict;

const STAFF: &str = "/api/admin/staff";

pub async fn list(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.get(STAFF).await?;
    if resp.code() != 200 {
        return Ok(rejected(&resp, "staff.view"));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    let staff = data["staff"].as_array().map(Vec::as_slice).unwrap_or_default();
    let owner_found = staff.iter().any(|s| s["role"] == "owner");
    if staff.is_empty() || !owner_found {
        return Ok(Verdict::fail(format!(
            "Staff list incomplete: {} members, owner found: {}",
            staff.len(),
            owner_found
        ))
        .with_payload(data));
    }

    Ok(Verdict::pass(format!(
        "Staff list retrieved successfully: {} members (owner found)",
        staff.len()
    )))
}

/// Invite a staff member; re-running against the same server finds the
/// address already registered, which is tolerated
pub async fn invite(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "email": ctx.fixtures.staff_email,
        "name": "Test Staff",
        "role": "staff",
    });
    let resp = ctx.api.post(STAFF, body).await?;

    match resp.code() {
        201 => {
            let data = require_json(&resp)?;
            if !resp.success() {
                return Ok(api_failure(&resp));
            }
            let staff = &data["staff"];
            if staff["tempPassword"].as_str().is_some_and(|p| !p.is_empty()) {
                Ok(Verdict::pass(format!(
                    "Staff invited successfully: {} with temp password",
                    staff["email"].as_str().unwrap_or(&ctx.fixtures.staff_email)
                )))
            } else {
                Ok(Verdict::fail("Staff invite missing temporary password").with_payload(data))
            }
        }
        400 if resp.message().is_some_and(|m| m.contains("already registered")) => {
            Ok(Verdict::tolerated(
                "Staff invite working (email already registered)",
            ))
        }
        400 => Ok(Verdict::fail(format!("Bad request: {}", resp.detail())).with_payload(resp.body())),
        _ => Ok(rejected(&resp, "staff.invite")),
    }
}
