use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr,
};
use uuid::Uuid;

use gatehouse_accounts_schema::accounts;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, AccountRole};
use crate::error::AccountsServiceError;

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_identity(
        &self,
        username_or_email: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(
                Condition::any()
                    .add(accounts::Column::Username.eq(username_or_email))
                    .add(accounts::Column::Email.eq(username_or_email)),
            )
            .one(&self.db)
            .await
            .context("find account by identity")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::VerificationToken.eq(token))
            .one(&self.db)
            .await
            .context("find account by verification token")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::ResetPasswordToken.eq(token))
            .filter(accounts::Column::ResetPasswordExpires.gte(now))
            .one(&self.db)
            .await
            .context("find account by reset token")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &Account) -> Result<(), AccountsServiceError> {
        let result = accounts::ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_str().to_owned()),
            is_verified: Set(account.is_verified),
            verification_token: Set(account.verification_token.clone()),
            verification_token_expires: Set(account.verification_token_expires),
            reset_password_token: Set(account.reset_password_token.clone()),
            reset_password_expires: Set(account.reset_password_expires),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Concurrent registrations race at the unique index; the loser
            // lands here.
            Err(ref e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountsServiceError::DuplicateIdentity)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create account").into()),
        }
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            is_verified: Set(true),
            verification_token: Set(None),
            verification_token_expires: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark account verified")?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            reset_password_token: Set(Some(token.to_owned())),
            reset_password_expires: Set(Some(expires)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set reset token")?;
        Ok(())
    }

    async fn replace_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            reset_password_token: Set(None),
            reset_password_expires: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("replace password")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        // Unknown role values cannot appear through this service's writes.
        role: AccountRole::from_str_opt(&model.role).unwrap_or_default(),
        is_verified: model.is_verified,
        verification_token: model.verification_token,
        verification_token_expires: model.verification_token_expires,
        reset_password_token: model.reset_password_token,
        reset_password_expires: model.reset_password_expires,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
