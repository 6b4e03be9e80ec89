//! Account service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service; the
//! requester's account id is always passed in explicitly.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::revocation::TokenRevocations;
use super::rules::{check_email, check_password, check_username, to_domain};
use crate::domain::{
    Account, CreateAccountDto, DomainError, DomainResult, Favorite, RepositoryProvider,
    Reservation, Review, UpdateProfileDto,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account: Account,
}

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// A my-page row annotated with the name of its restaurant.
#[derive(Debug, Clone)]
pub struct NamedItem<T> {
    pub item: T,
    pub restaurant_name: String,
}

#[derive(Debug, Clone)]
pub struct MyPage {
    pub account: Account,
    pub reservations: Vec<NamedItem<Reservation>>,
    pub reviews: Vec<NamedItem<Review>>,
    pub favorites: Vec<NamedItem<Favorite>>,
}

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    revocations: TokenRevocations,
}

impl AccountService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        revocations: TokenRevocations,
    ) -> Self {
        Self {
            repos,
            jwt_config,
            revocations,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new, unpaid member account.
    pub async fn signup(&self, input: SignupInput) -> DomainResult<Account> {
        check_username(&input.username).map_err(|e| to_domain("username", e))?;
        check_email(&input.email).map_err(|e| to_domain("email", e))?;
        check_password(&input.password).map_err(|e| to_domain("password", e))?;
        if input.password != input.password_confirmation {
            return Err(DomainError::Validation(
                "password_confirmation: the two password fields didn't match".into(),
            ));
        }

        if self.repos.accounts().find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Conflict(
                "A user with that username already exists".into(),
            ));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let account = self
            .repos
            .accounts()
            .create(CreateAccountDto {
                username: input.username,
                email: input.email,
                password_hash,
                is_staff: false,
            })
            .await?;

        info!(account_id = account.id, username = %account.username, "New account registered");
        Ok(account)
    }

    /// Create the initial staff account when the store has no accounts yet.
    pub async fn ensure_default_staff(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<Account>> {
        if self.repos.accounts().count().await? > 0 {
            return Ok(None);
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;
        let account = self
            .repos
            .accounts()
            .create(CreateAccountDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                is_staff: true,
            })
            .await?;
        Ok(Some(account))
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email + password and issue a token.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let accounts = self.repos.accounts();
        let account = match accounts.find_by_username(username_or_email).await? {
            Some(account) => Some(account),
            None => accounts.find_by_email(username_or_email).await?,
        };

        let Some(account) = account else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !account.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &account.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        accounts.record_login(account.id).await?;

        let claims = TokenClaims::new(account.id, &account.username, account.role(), &self.jwt_config);
        let token = create_token(&claims, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(account_id = account.id, "Account logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            account,
        })
    }

    /// Decode a bearer token, rejecting expired and revoked ones.
    pub fn authenticate(&self, token: &str) -> DomainResult<TokenClaims> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid authentication token".into()))?;
        if claims.is_expired() {
            return Err(DomainError::Unauthorized("Token has expired".into()));
        }
        if self.revocations.is_revoked(&claims.jti) {
            return Err(DomainError::Unauthorized("Token has been revoked".into()));
        }
        Ok(claims)
    }

    /// Revoke the presented token.
    pub fn logout(&self, jti: &str, expires_at: i64) {
        self.revocations.revoke(jti, expires_at);
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn profile(&self, account_id: i32) -> DomainResult<Account> {
        self.repos
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account", account_id))
    }

    /// Update the requester's own username and email.
    pub async fn update_profile(
        &self,
        account_id: i32,
        username: String,
        email: String,
    ) -> DomainResult<Account> {
        check_username(&username).map_err(|e| to_domain("username", e))?;
        check_email(&email).map_err(|e| to_domain("email", e))?;

        if let Some(other) = self.repos.accounts().find_by_username(&username).await? {
            if other.id != account_id {
                return Err(DomainError::Conflict(
                    "A user with that username already exists".into(),
                ));
            }
        }

        self.repos
            .accounts()
            .update_profile(account_id, UpdateProfileDto { username, email })
            .await?
            .ok_or_else(|| DomainError::not_found("Account", account_id))
    }

    // ── My page ─────────────────────────────────────────────────

    /// Reservations, reviews and favorites of the requester.
    pub async fn my_page(&self, account_id: i32) -> DomainResult<MyPage> {
        let account = self.profile(account_id).await?;

        let reservations = self.repos.reservations().list_for_account(account_id).await?;
        let reviews = self.repos.reviews().list_for_account(account_id).await?;
        let favorites = self.repos.favorites().list_for_account(account_id).await?;

        let mut ids: Vec<i32> = reservations
            .iter()
            .map(|r| r.restaurant_id)
            .chain(reviews.iter().map(|r| r.restaurant_id))
            .chain(favorites.iter().map(|f| f.restaurant_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let names: HashMap<i32, String> = self
            .repos
            .restaurants()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        let name_of = |id: i32| names.get(&id).cloned().unwrap_or_default();

        Ok(MyPage {
            account,
            reservations: reservations
                .into_iter()
                .map(|r| NamedItem {
                    restaurant_name: name_of(r.restaurant_id),
                    item: r,
                })
                .collect(),
            reviews: reviews
                .into_iter()
                .map(|r| NamedItem {
                    restaurant_name: name_of(r.restaurant_id),
                    item: r,
                })
                .collect(),
            favorites: favorites
                .into_iter()
                .map(|f| NamedItem {
                    restaurant_name: name_of(f.restaurant_id),
                    item: f,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{paid_member, repos_with_shop};
    use crate::domain::NewReservation;
    use chrono::{Duration, Utc};

    fn service(repos: Arc<dyn RepositoryProvider>) -> AccountService {
        AccountService::new(
            repos,
            JwtConfig {
                secret: "test-secret".into(),
                ..Default::default()
            },
            TokenRevocations::new(),
        )
    }

    fn signup(username: &str) -> SignupInput {
        SignupInput {
            username: username.into(),
            email: format!("{}@example.com", username),
            password: "s3cret-pass".into(),
            password_confirmation: "s3cret-pass".into(),
        }
    }

    #[tokio::test]
    async fn signup_creates_unpaid_account() {
        let (repos, _) = repos_with_shop().await;
        let account = service(repos).signup(signup("hanako")).await.unwrap();
        assert!(!account.is_paid);
        assert!(!account.is_staff);
        assert_ne!(account.password_hash, "s3cret-pass");
    }

    #[tokio::test]
    async fn signup_rejects_bad_input() {
        let (repos, _) = repos_with_shop().await;
        let svc = service(repos);

        let mut mismatch = signup("taro");
        mismatch.password_confirmation = "different-pass".into();
        assert!(matches!(svc.signup(mismatch).await, Err(DomainError::Validation(_))));

        let mut numeric = signup("taro");
        numeric.password = "12345678".into();
        numeric.password_confirmation = "12345678".into();
        assert!(matches!(svc.signup(numeric).await, Err(DomainError::Validation(_))));

        svc.signup(signup("taro")).await.unwrap();
        assert!(matches!(svc.signup(signup("taro")).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn login_by_username_or_email_and_logout_revokes() {
        let (repos, _) = repos_with_shop().await;
        let svc = service(repos);
        svc.signup(signup("hanako")).await.unwrap();

        let by_name = svc.login("hanako", "s3cret-pass").await.unwrap();
        let by_email = svc.login("hanako@example.com", "s3cret-pass").await.unwrap();
        assert_eq!(by_name.account.id, by_email.account.id);
        assert_ne!(by_name.token, by_email.token);

        let claims = svc.authenticate(&by_name.token).unwrap();
        svc.logout(&claims.jti, claims.exp);
        assert!(matches!(
            svc.authenticate(&by_name.token),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(svc.authenticate(&by_email.token).is_ok());

        assert!(matches!(
            svc.login("hanako", "wrong-pass").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn profile_edit_only_conflicts_with_other_accounts() {
        let (repos, _) = repos_with_shop().await;
        let svc = service(repos);
        let hanako = svc.signup(signup("hanako")).await.unwrap();
        svc.signup(signup("taro")).await.unwrap();

        let same = svc
            .update_profile(hanako.id, "hanako".into(), "new@example.com".into())
            .await
            .unwrap();
        assert_eq!(same.email, "new@example.com");

        let err = svc
            .update_profile(hanako.id, "taro".into(), "new@example.com".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn my_page_lists_requester_items_with_restaurant_names() {
        let (repos, shop) = repos_with_shop().await;
        let member = paid_member(&repos).await;
        let svc = service(repos.clone());

        let now = Utc::now();
        for days in [1, 5, 3] {
            repos
                .reservations()
                .create(NewReservation {
                    restaurant_id: shop,
                    account_id: member.id,
                    reservation_date: now + Duration::days(days),
                    number_of_people: 2,
                })
                .await
                .unwrap();
        }
        repos.favorites().toggle(member.id, shop).await.unwrap();

        let page = svc.my_page(member.id).await.unwrap();
        let dates: Vec<_> = page.reservations.iter().map(|r| r.item.reservation_date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(page.reservations[0].restaurant_name, "Yabaton");
        assert_eq!(page.favorites.len(), 1);
        assert!(page.reviews.is_empty());
    }
}
