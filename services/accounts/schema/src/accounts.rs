use sea_orm::entity::prelude::*;

/// Account record: unique identity, one-way password hash, and the
/// verification/reset token state driven by the lifecycle service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Lowercase wire value: "user" or "admin".
    pub role: String,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verification_token_expires: Option<chrono::DateTime<chrono::Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
