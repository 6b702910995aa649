//! Product catalogue check

use serde_json::Value;

use super::{CheckContext, api_failure, require_json, unexpected};
use crate::error::Result;
use crate::probe::Verdict;

const PRODUCTS: &str = "/api/products";

/// Products inspected for inventory data
const SAMPLE_SIZE: usize = 5;

/// Issues quoted in the failure message
const MAX_ISSUES: usize = 3;

pub async fn list(ctx: &mut CheckContext<'_>) -> Result<Verdict> {
    let resp = ctx.api.get(PRODUCTS).await?;
    if resp.code() != 200 {
        return Ok(unexpected(&resp));
    }

    let data = require_json(&resp)?;
    if !resp.success() {
        return Ok(api_failure(&resp));
    }

    let products = data["products"].as_array().map(Vec::as_slice).unwrap_or_default();
    let issues = inventory_issues(products);
    if !issues.is_empty() {
        let quoted: Vec<_> = issues.into_iter().take(MAX_ISSUES).collect();
        return Ok(Verdict::fail(format!(
            "Products missing inventory data: {}",
            quoted.join("; ")
        )));
    }

    Ok(Verdict::pass(format!(
        "Successfully retrieved {} products with proper inventory data",
        products.len()
    )))
}

/// Every sampled product needs variants, and every variant an `inventoryQty`
fn inventory_issues(products: &[Value]) -> Vec<String> {
    let mut issues = Vec::new();
    for (i, product) in products.iter().take(SAMPLE_SIZE).enumerate() {
        let variants = product["variants"].as_array().map(Vec::as_slice).unwrap_or_default();
        if variants.is_empty() {
            issues.push(format!("Product {} has no variants", i + 1));
            continue;
        }
        for (j, variant) in variants.iter().enumerate() {
            if variant.get("inventoryQty").is_none() {
                issues.push(format!(
                    "Product {}, Variant {} missing inventoryQty",
                    i + 1,
                    j + 1
                ));
            }
        }
    }
    issues
}
