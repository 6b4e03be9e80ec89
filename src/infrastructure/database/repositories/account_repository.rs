//! SeaORM implementation of AccountRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::account::{Account, AccountRepository, CreateAccountDto, UpdateProfileDto};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> DomainResult<account::Model> {
        account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Account", id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: account::Model) -> Account {
    Account {
        id: m.id,
        username: m.username,
        email: m.email,
        password_hash: m.password_hash,
        is_paid: m.is_paid,
        billing_customer_id: m.billing_customer_id,
        checkout_session_id: m.checkout_session_id,
        is_staff: m.is_staff,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
        last_login_at: m.last_login_at,
    }
}

fn write_err(e: DbErr) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::Conflict("A user with that username already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── AccountRepository impl ──────────────────────────────────────

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(&self, dto: CreateAccountDto) -> DomainResult<Account> {
        debug!("Creating account: {}", dto.username);

        let now = Utc::now();
        let model = account::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            is_paid: Set(false),
            billing_customer_id: Set(None),
            checkout_session_id: Set(None),
            is_staff: Set(dto.is_staff),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(write_err)?;

        Ok(model_to_domain(model))
    }

    async fn count(&self) -> DomainResult<u64> {
        account::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update_profile(&self, id: i32, dto: UpdateProfileDto) -> DomainResult<Option<Account>> {
        let Some(existing) = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: account::ActiveModel = existing.into();
        active.username = Set(dto.username);
        active.email = Set(dto.email);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn record_login(&self, id: i32) -> DomainResult<()> {
        let mut active: account::ActiveModel = self.load(id).await?.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_checkout_session(&self, id: i32, session_id: Option<&str>) -> DomainResult<()> {
        debug!("Account {} checkout session -> {:?}", id, session_id);

        let mut active: account::ActiveModel = self.load(id).await?.into();
        active.checkout_session_id = Set(session_id.map(str::to_string));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn mark_paid(&self, id: i32, customer_id: &str) -> DomainResult<()> {
        debug!("Marking account {} as paid (customer {})", id, customer_id);

        let mut active: account::ActiveModel = self.load(id).await?.into();
        active.is_paid = Set(true);
        active.billing_customer_id = Set(Some(customer_id.to_string()));
        active.checkout_session_id = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MembershipState;
    use crate::infrastructure::database::test_support::setup_db;

    fn dto(username: &str) -> CreateAccountDto {
        CreateAccountDto {
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash: "hash".into(),
            is_staff: false,
        }
    }

    #[tokio::test]
    async fn new_accounts_start_unpaid() {
        let repo = SeaOrmAccountRepository::new(setup_db().await);
        let account = repo.create(dto("hanako")).await.unwrap();

        assert!(!account.is_paid);
        assert_eq!(account.membership_state(), MembershipState::Unpaid);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = SeaOrmAccountRepository::new(setup_db().await);
        repo.create(dto("hanako")).await.unwrap();

        let err = repo.create(dto("hanako")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn renaming_onto_taken_username_is_a_conflict() {
        let repo = SeaOrmAccountRepository::new(setup_db().await);
        repo.create(dto("hanako")).await.unwrap();
        let taro = repo.create(dto("taro")).await.unwrap();

        let err = repo
            .update_profile(
                taro.id,
                UpdateProfileDto {
                    username: "hanako".into(),
                    email: "taro@example.com".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn checkout_then_mark_paid() {
        let repo = SeaOrmAccountRepository::new(setup_db().await);
        let account = repo.create(dto("hanako")).await.unwrap();

        repo.set_checkout_session(account.id, Some("cs_test_1")).await.unwrap();
        let pending = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(pending.membership_state(), MembershipState::CheckoutPending);

        repo.mark_paid(account.id, "cus_123").await.unwrap();
        let paid = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert!(paid.is_paid);
        assert_eq!(paid.billing_customer_id.as_deref(), Some("cus_123"));
        assert!(paid.checkout_session_id.is_none());
    }

    #[tokio::test]
    async fn mark_paid_on_missing_account_is_not_found() {
        let repo = SeaOrmAccountRepository::new(setup_db().await);
        let err = repo.mark_paid(404, "cus_1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
