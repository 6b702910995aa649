//! Admin authentication checks

use serde_json::json;

use super::{CheckContext, api_failure, require_json, unexpected};
use crate::error::Result;
use crate::probe::Verdict;

const SETUP: &str = "/api/admin/auth/setup";
const LOGIN: &str = "/api/admin/auth/login";
const ME: &str = "/api/admin/auth/me";
const LOGOUT: &str = "/api/admin/auth/logout";

/// Name prefix of the admin session cookie
pub const SESSION_COOKIE: &str = "admin_token";

/// An owner already exists, so the panel must not ask for first-run setup
pub async fn setup_status(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.get(SETUP).await?;
    if resp.code() != 200 {
        return Ok(unexpected(&resp));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    // A missing flag is read as "needs setup"
    if data["needsSetup"].as_bool().unwrap_or(true) {
        return Ok(Verdict::fail(
            "Setup status incorrect: needsSetup should be false since admin exists",
        )
        .with_payload(data));
    }

    Ok(Verdict::pass(
        "Setup status correct: Admin already exists (needsSetup: false)",
    ))
}

pub async fn login(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let body = json!({
        "email": ctx.credentials.email,
        "password": ctx.credentials.password,
    });

    let resp = ctx.api.post(LOGIN, body).await?;
    if resp.code() != 200 {
        return Ok(unexpected(&resp));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(Verdict::fail(format!(
            "Login failed: {}",
            resp.message().unwrap_or("Unknown error")
        ))
        .with_payload(data));
    }

    let user = data["user"].clone();
    let message = format!(
        "Login successful for {} (Role: {}) - Cookie set: {}",
        user["email"].as_str().unwrap_or("unknown"),
        user["role"].as_str().unwrap_or("unknown"),
        resp.sets_cookie(SESSION_COOKIE)
    );
    ctx.state.login(user);

    Ok(Verdict::pass(message))
}

/// The session cookie identifies the configured admin
pub async fn current_user(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.get(ME).await?;
    match resp.code() {
        200 => {}
        401 => {
            return Ok(Verdict::fail(
                "Authentication failed - cookie not working properly",
            ));
        }
        _ => return Ok(unexpected(&resp)),
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    let user = &data["user"];
    let expected = &ctx.credentials.email;
    let actual = user["email"].as_str().unwrap_or_default();
    if !actual.eq_ignore_ascii_case(expected) {
        return Ok(Verdict::fail(format!(
            "User email mismatch: expected {}, got {}",
            expected, actual
        ))
        .with_payload(data));
    }

    Ok(Verdict::pass(format!(
        "User info retrieved successfully: {} ({})",
        user["name"].as_str().unwrap_or("Unknown"),
        user["role"].as_str().unwrap_or("unknown")
    )))
}

/// Logging out must actually end the session, which is confirmed by
/// probing `/me` again rather than trusting the logout body
pub async fn logout(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.post(LOGOUT, json!({})).await?;
    if resp.code() != 200 {
        return Ok(unexpected(&resp));
    }

    require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    ctx.state.logout();

    let me = ctx.api.get(ME).await?;
    if me.code() == 401 {
        Ok(Verdict::pass("Logout successful - cookie cleared properly"))
    } else {
        Ok(Verdict::fail(format!(
            "Logout incomplete - protected endpoint still answered HTTP {}",
            me.code()
        ))
        .with_payload(me.body()))
    }
}
