//! Seller repository.

use async_trait::async_trait;

use flexilearn_core::{Email, SellerId};

use super::{PgStore, RepositoryError, insert_error};
use crate::models::NewSeller;

/// Storage operations on `sellers`.
#[async_trait]
pub trait SellerStore: Send + Sync {
    /// Whether any seller row carries this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn seller_email_exists(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Insert a seller application and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the table enforces unique emails
    /// and this one is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert_seller(&self, seller: &NewSeller) -> Result<SellerId, RepositoryError>;
}

#[async_trait]
impl SellerStore for PgStore {
    async fn seller_email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sellers WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    async fn insert_seller(&self, seller: &NewSeller) -> Result<SellerId, RepositoryError> {
        sqlx::query_scalar::<_, SellerId>(
            r"
            INSERT INTO sellers (first_name, last_name, email, phone, company_name,
                                 business_type, seller_category, selected_plan, website,
                                 terms_agreed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            ",
        )
        .bind(&seller.first_name)
        .bind(&seller.last_name)
        .bind(&seller.email)
        .bind(&seller.phone)
        .bind(&seller.company_name)
        .bind(&seller.business_type)
        .bind(&seller.seller_category)
        .bind(seller.selected_plan.as_deref())
        .bind(seller.website.as_deref())
        .bind(seller.terms_agreed)
        .fetch_one(self.pool())
        .await
        .map_err(|e| insert_error(e, "seller email"))
    }
}
