//! Run context threaded between checks

use serde_json::Value;

use super::catalog::Prerequisite;

/// State that earlier checks leave behind for later ones
#[derive(Debug, Clone)]
pub struct RunState {
    /// Suffix that keeps records created by this run apart from earlier runs
    pub run_tag: String,
    /// Set by a successful login, cleared by logout
    pub authenticated: bool,
    /// `user` object returned by login
    pub admin_user: Option<Value>,
    /// Discount created (or found) by the create check
    pub discount_id: Option<String>,
    /// Review created by the admin review create check
    pub review_id: Option<String>,
    /// Review posted through the storefront submit check
    pub submitted_review_id: Option<String>,
    /// Reviewer address of a review the import check added
    pub imported_review_email: Option<String>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            run_tag: chrono::Utc::now().timestamp_millis().to_string(),
            authenticated: false,
            admin_user: None,
            discount_id: None,
            review_id: None,
            submitted_review_id: None,
            imported_review_email: None,
        }
    }

    /// Whether the state carries what `prereq` needs
    pub fn satisfies(&self, prereq: Prerequisite) -> bool {
        match prereq {
            Prerequisite::Auth => self.authenticated,
            Prerequisite::Discount => self.discount_id.is_some(),
            Prerequisite::Review => self.review_id.is_some(),
        }
    }

    /// First prerequisite in `prereqs` that is not met
    pub fn first_missing(&self, prereqs: &[Prerequisite]) -> Option<Prerequisite> {
        prereqs.iter().copied().find(|p| !self.satisfies(*p))
    }

    pub fn login(&mut self, user: Value) {
        self.authenticated = true;
        self.admin_user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(email) = self.admin_user.as_ref().and_then(|u| u["email"].as_str()) {
            log::debug!("Session for {} ended", email);
        }
        self.authenticated = false;
        self.admin_user = None;
    }

    /// Records the run created but did not delete
    pub fn leftovers(&self) -> Vec<String> {
        let mut left = Vec::new();
        if let Some(ref id) = self.discount_id {
            left.push(format!("discount {}", id));
        }
        if let Some(ref id) = self.review_id {
            left.push(format!("review {}", id));
        }
        if let Some(ref id) = self.submitted_review_id {
            left.push(format!("submitted review {}", id));
        }
        if let Some(ref email) = self.imported_review_email {
            left.push(format!("imported review from {}", email));
        }
        left
    }
}
