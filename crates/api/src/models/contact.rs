//! Contact form submission.

use flexilearn_core::Email;

/// A contact message about to be appended to `contact_messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}
