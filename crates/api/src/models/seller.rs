//! Seller registration types.

use flexilearn_core::Email;

/// A seller application about to be inserted into `sellers`.
///
/// Field order matches the table's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeller {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub company_name: String,
    pub business_type: String,
    pub seller_category: String,
    /// Subscription plan picked during sign-up, if any.
    pub selected_plan: Option<String>,
    pub website: Option<String>,
    /// Always `true` once validation has passed.
    pub terms_agreed: bool,
}
