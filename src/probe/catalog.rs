//! The fixed, ordered check catalogue

use clap::ValueEnum;
use serde::Serialize;

/// Admin panel area a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Auth,
    Staff,
    Orders,
    Reviews,
    Discounts,
    Products,
    Promo,
}

impl std::fmt::Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suite::Auth => "auth",
            Suite::Staff => "staff",
            Suite::Orders => "orders",
            Suite::Reviews => "reviews",
            Suite::Discounts => "discounts",
            Suite::Products => "products",
            Suite::Promo => "promo",
        };
        write!(f, "{}", name)
    }
}

/// State a check needs from an earlier check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prerequisite {
    /// A logged-in admin session
    Auth,
    /// A discount id stored by the create check
    Discount,
    /// A review id stored by the review create check
    Review,
}

impl Prerequisite {
    /// Failure message recorded when the prerequisite is absent
    pub fn missing_message(&self, check: &str) -> String {
        match self {
            Prerequisite::Auth => format!("Cannot test {} - not authenticated", check),
            Prerequisite::Discount => format!("No discount ID available for {}", check),
            Prerequisite::Review => format!("No review ID available for {}", check),
        }
    }
}

impl std::fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Prerequisite::Auth => "auth",
            Prerequisite::Discount => "discount",
            Prerequisite::Review => "review",
        };
        write!(f, "{}", name)
    }
}

/// Every check the probe knows, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    SetupStatus,
    Login,
    CurrentUser,
    OrderList,
    SingleOrder,
    OrderUpdateStatus,
    OrderAddNote,
    OrderAddTag,
    OrderRemoveTag,
    OrderAssign,
    InvoiceGeneration,
    EmailSending,
    StaffList,
    StaffInvite,
    ReviewList,
    ReviewCreate,
    ReviewUpdate,
    ReviewSampleCsv,
    ReviewBulkApprove,
    ReviewImport,
    ReviewSubmit,
    ReviewHelpful,
    ProductReviews,
    ReviewDelete,
    Logout,
    DiscountList,
    DiscountCreate,
    DiscountUpdate,
    DiscountDelete,
    ProductList,
    PromoCodeValidation,
}

use Prerequisite::{Auth, Discount, Review};

impl Check {
    /// The default sequence
    pub const ALL: [Check; 31] = [
        Check::SetupStatus,
        Check::Login,
        Check::CurrentUser,
        Check::OrderList,
        Check::SingleOrder,
        Check::OrderUpdateStatus,
        Check::OrderAddNote,
        Check::OrderAddTag,
        Check::OrderRemoveTag,
        Check::OrderAssign,
        Check::InvoiceGeneration,
        Check::EmailSending,
        Check::StaffList,
        Check::StaffInvite,
        Check::ReviewList,
        Check::ReviewCreate,
        Check::ReviewUpdate,
        Check::ReviewSampleCsv,
        Check::ReviewBulkApprove,
        Check::ReviewImport,
        Check::ReviewSubmit,
        Check::ReviewHelpful,
        Check::ProductReviews,
        Check::ReviewDelete,
        Check::Logout,
        Check::DiscountList,
        Check::DiscountCreate,
        Check::DiscountUpdate,
        Check::DiscountDelete,
        Check::ProductList,
        Check::PromoCodeValidation,
    ];

    /// Human-readable check name
    pub fn name(&self) -> &'static str {
        match self {
            Check::SetupStatus => "Admin Setup Status",
            Check::Login => "Admin Login",
            Check::CurrentUser => "Admin Current User",
            Check::OrderList => "Order List API",
            Check::SingleOrder => "Single Order API",
            Check::OrderUpdateStatus => "Order Update Status",
            Check::OrderAddNote => "Order Add Note",
            Check::OrderAddTag => "Order Add Tag",
            Check::OrderRemoveTag => "Order Remove Tag",
            Check::OrderAssign => "Order Assignment",
            Check::InvoiceGeneration => "Invoice Generation",
            Check::EmailSending => "Email Sending",
            Check::StaffList => "Admin Staff List",
            Check::StaffInvite => "Admin Staff Invite",
            Check::ReviewList => "Reviews List",
            Check::ReviewCreate => "Review Create",
            Check::ReviewUpdate => "Review Update",
            Check::ReviewSampleCsv => "Reviews Sample CSV",
            Check::ReviewBulkApprove => "Reviews Bulk Approve",
            Check::ReviewImport => "Reviews Import",
            Check::ReviewSubmit => "Review Submit",
            Check::ReviewHelpful => "Review Helpful Vote",
            Check::ProductReviews => "Product Reviews",
            Check::ReviewDelete => "Review Delete",
            Check::Logout => "Admin Logout",
            Check::DiscountList => "Discounts API - GET",
            Check::DiscountCreate => "Discounts API - POST",
            Check::DiscountUpdate => "Discounts API - PUT",
            Check::DiscountDelete => "Discounts API - DELETE",
            Check::ProductList => "Products API - GET",
            Check::PromoCodeValidation => "PromoCode Validation",
        }
    }

    /// Method and route template the check exercises
    pub fn endpoint(&self) -> &'static str {
        match self {
            Check::SetupStatus => "GET /api/admin/auth/setup",
            Check::Login => "POST /api/admin/auth/login",
            Check::CurrentUser => "GET /api/admin/auth/me",
            Check::OrderList => "GET /api/admin/orders",
            Check::SingleOrder => "GET /api/admin/orders/{id}",
            Check::OrderUpdateStatus => "PATCH /api/admin/orders/{id} (update_status)",
            Check::OrderAddNote => "PATCH /api/admin/orders/{id} (add_note)",
            Check::OrderAddTag => "PATCH /api/admin/orders/{id} (add_tag)",
            Check::OrderRemoveTag => "PATCH /api/admin/orders/{id} (remove_tag)",
            Check::OrderAssign => "PATCH /api/admin/orders/{id} (assign)",
            Check::InvoiceGeneration => "POST /api/admin/orders/{id}/invoice",
            Check::EmailSending => "POST /api/admin/orders/{id}/email",
            Check::StaffList => "GET /api/admin/staff",
            Check::StaffInvite => "POST /api/admin/staff",
            Check::ReviewList => "GET /api/admin/reviews",
            Check::ReviewCreate => "POST /api/admin/reviews",
            Check::ReviewUpdate => "PUT /api/admin/reviews/{id}",
            Check::ReviewSampleCsv => "GET /api/admin/reviews/sample-csv",
            Check::ReviewBulkApprove => "POST /api/admin/reviews/bulk",
            Check::ReviewImport => "POST /api/admin/reviews/import",
            Check::ReviewSubmit => "POST /api/reviews/submit",
            Check::ReviewHelpful => "POST /api/reviews/helpful",
            Check::ProductReviews => "GET /api/product-reviews/{handle}",
            Check::ReviewDelete => "DELETE /api/admin/reviews/{id}",
            Check::Logout => "POST /api/admin/auth/logout",
            Check::DiscountList => "GET /api/discounts",
            Check::DiscountCreate => "POST /api/discounts",
            Check::DiscountUpdate => "PUT /api/discounts/{id}",
            Check::DiscountDelete => "DELETE /api/discounts/{id}",
            Check::ProductList => "GET /api/products",
            Check::PromoCodeValidation => "POST /api/promoCode/check",
        }
    }

    pub fn suite(&self) -> Suite {
        match self {
            Check::SetupStatus | Check::Login | Check::CurrentUser | Check::Logout => Suite::Auth,
            Check::OrderList
            | Check::SingleOrder
            | Check::OrderUpdateStatus
            | Check::OrderAddNote
            | Check::OrderAddTag
            | Check::OrderRemoveTag
            | Check::OrderAssign
            | Check::InvoiceGeneration
            | Check::EmailSending => Suite::Orders,
            Check::StaffList | Check::StaffInvite => Suite::Staff,
            Check::ReviewList
            | Check::ReviewCreate
            | Check::ReviewUpdate
            | Check::ReviewSampleCsv
            | Check::ReviewBulkApprove
            | Check::ReviewImport
            | Check::ReviewSubmit
            | Check::ReviewHelpful
            | Check::ProductReviews
            | Check::ReviewDelete => Suite::Reviews,
            Check::DiscountList
            | Check::DiscountCreate
            | Check::DiscountUpdate
            | Check::DiscountDelete => Suite::Discounts,
            Check::ProductList => Suite::Products,
            Check::PromoCodeValidation => Suite::Promo,
        }
    }

    /// Prerequisites checked, in order, before the check may send anything
    pub fn requires(&self) -> &'static [Prerequisite] {
        match self {
            Check::SetupStatus
            | Check::Login
            | Check::Logout
            | Check::DiscountList
            | Check::DiscountCreate
            | Check::ProductList
            | Check::PromoCodeValidation
            | Check::ReviewSubmit
            | Check::ProductReviews => &[],
            Check::DiscountUpdate | Check::DiscountDelete => &[Discount],
            Check::ReviewHelpful => &[Review],
            Check::ReviewUpdate | Check::ReviewBulkApprove | Check::ReviewDelete => {
                &[Auth, Review]
            }
            Check::CurrentUser
            | Check::OrderList
            | Check::SingleOrder
            | Check::OrderUpdateStatus
            | Check::OrderAddNote
            | Check::OrderAddTag
            | Check::OrderRemoveTag
            | Check::OrderAssign
            | Check::InvoiceGeneration
            | Check::EmailSending
            | Check::StaffList
            | Check::StaffInvite
            | Check::ReviewList
            | Check::ReviewCreate
            | Check::ReviewSampleCsv
            | Check::ReviewImport => &[Auth],
        }
    }

    /// The default sequence narrowed to `suites`, order preserved.
    ///
    /// An empty filter selects everything.
    pub fn sequence(suites: &[Suite]) -> Vec<Check> {
        Check::ALL
            .iter()
            .copied()
            .filter(|c| suites.is_empty() || suites.contains(&c.suite()))
            .collect()
    }
}
