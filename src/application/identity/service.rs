//! Identity service — application-layer orchestration
//!
//! All account-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::application::session::SessionContext;
use crate::domain::{Admin, DomainError, DomainResult, Guest, RepositoryProvider, Role};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

/// Public view of an account
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub role: Role,
    /// Guests only
    pub email: Option<String>,
    /// Admins only; the hotel they own, if any
    pub hotel_id: Option<i32>,
}

impl Profile {
    fn from_guest(guest: Guest) -> Self {
        Self {
            id: guest.id,
            name: guest.name,
            role: Role::Guest,
            email: Some(guest.email),
            hotel_id: None,
        }
    }

    fn from_admin(admin: Admin, hotel_id: Option<i32>) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            role: Role::Admin,
            email: None,
            hotel_id,
        }
    }
}

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub profile: Profile,
}

/// Identity service — signup, login and "who am I" for guests and admins.
pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Guests ──────────────────────────────────────────────────

    /// Register a new guest account.
    pub async fn signup_guest(&self, name: &str, email: &str, password: &str) -> DomainResult<Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }
        let email = email.trim();
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        check_password(password)?;

        if self.repos.guests().find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let hash = self.hash(password)?;
        let guest = self.repos.guests().create(name, email, &hash).await?;

        info!(guest_id = guest.id, email = %guest.email, "New guest registered");
        Ok(Profile::from_guest(guest))
    }

    /// Authenticate a guest by email + password and return a JWT.
    pub async fn login_guest(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(guest) = self.repos.guests().find_by_email(email).await? else {
            return Err(invalid_credentials());
        };
        if !verify_password(password, &guest.password_hash).unwrap_or(false) {
            return Err(invalid_credentials());
        }

        let token = self.issue(guest.id, &guest.name, Role::Guest)?;
        info!(guest_id = guest.id, "Guest logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            profile: Profile::from_guest(guest),
        })
    }

    // ── Admins ──────────────────────────────────────────────────

    /// Register a new hotel admin. The confirmation must repeat the password.
    pub async fn signup_admin(
        &self,
        name: &str,
        password: &str,
        password_confirmation: &str,
    ) -> DomainResult<Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }
        check_password(password)?;
        if password != password_confirmation {
            return Err(DomainError::Validation("Passwords do not match".into()));
        }

        if self.repos.admins().find_by_name(name).await?.is_some() {
            return Err(DomainError::Conflict("Admin name already taken".into()));
        }

        let hash = self.hash(password)?;
        let admin = self.repos.admins().create(name, &hash).await?;

        info!(admin_id = admin.id, name = %admin.name, "New admin registered");
        Ok(Profile::from_admin(admin, None))
    }

    /// Authenticate an admin by name + password and return a JWT.
    pub async fn login_admin(&self, name: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(admin) = self.repos.admins().find_by_name(name.trim()).await? else {
            return Err(invalid_credentials());
        };
        if !verify_password(password, &admin.password_hash).unwrap_or(false) {
            return Err(invalid_credentials());
        }

        let token = self.issue(admin.id, &admin.name, Role::Admin)?;
        let hotel_id = self.repos.hotels().find_by_admin(admin.id).await?.map(|h| h.id);
        info!(admin_id = admin.id, "Admin logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            profile: Profile::from_admin(admin, hotel_id),
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Profile of the current principal.
    pub async fn me(&self, session: &SessionContext) -> DomainResult<Profile> {
        match session.role {
            Role::Guest => {
                let guest = self
                    .repos
                    .guests()
                    .find_by_id(session.account_id)
                    .await?
                    .ok_or_else(|| DomainError::Unauthorized("Account no longer exists".into()))?;
                Ok(Profile::from_guest(guest))
            }
            Role::Admin => {
                let admin = self
                    .repos
                    .admins()
                    .find_by_id(session.account_id)
                    .await?
                    .ok_or_else(|| DomainError::Unauthorized("Account no longer exists".into()))?;
                let hotel_id = self.repos.hotels().find_by_admin(admin.id).await?.map(|h| h.id);
                Ok(Profile::from_admin(admin, hotel_id))
            }
        }
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }

    fn issue(&self, account_id: i32, name: &str, role: Role) -> DomainResult<String> {
        create_token(account_id, name, role, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))
    }
}

fn check_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized("Invalid credentials".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HotelDraft;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> IdentityService {
        IdentityService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig {
                secret: "test-secret".into(),
                expiration_hours: 1,
                issuer: "hotel-booking".into(),
            },
            4,
        )
    }

    #[tokio::test]
    async fn guest_signup_and_login() {
        let svc = service();
        let profile = svc
            .signup_guest("Ana", "Ana@Example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(profile.email.as_deref(), Some("ana@example.com"));

        let auth = svc.login_guest("ana@example.com", "correct horse").await.unwrap();
        let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.role(), Some(Role::Guest));
        assert_eq!(claims.account_id(), Some(profile.id));

        assert!(matches!(
            svc.login_guest("ana@example.com", "wrong password").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn guest_signup_rejects_duplicates_and_short_passwords() {
        let svc = service();
        svc.signup_guest("Ana", "ana@example.com", "password1").await.unwrap();

        assert!(matches!(
            svc.signup_guest("Other", "ANA@example.com", "password2").await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            svc.signup_guest("Bo", "bo@example.com", "short").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn admin_signup_requires_matching_confirmation() {
        let svc = service();
        assert!(matches!(
            svc.signup_admin("boss", "password1", "password2").await,
            Err(DomainError::Validation(_))
        ));

        svc.signup_admin("boss", "password1", "password1").await.unwrap();
        assert!(matches!(
            svc.signup_admin("boss", "password1", "password1").await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn me_reports_owned_hotel_for_admins() {
        let svc = service();
        let admin = svc.signup_admin("boss", "password1", "password1").await.unwrap();
        let session = SessionContext::admin(admin.id, "boss");
        assert_eq!(svc.me(&session).await.unwrap().hotel_id, None);

        let hotel = svc
            .repos
            .hotels()
            .create(
                admin.id,
                HotelDraft {
                    name: "Harbor Inn".into(),
                    email: "inn@harbor.test".into(),
                    phone: "555".into(),
                    city: "Bergen".into(),
                    country: "Norway".into(),
                    address: "Quay 2".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(svc.me(&session).await.unwrap().hotel_id, Some(hotel.id));

        let auth = svc.login_admin("boss", "password1").await.unwrap();
        assert_eq!(auth.profile.hotel_id, Some(hotel.id));
    }

    #[tokio::test]
    async fn me_for_unknown_account_is_unauthorized() {
        let svc = service();
        let ghost = SessionContext::guest(99, "ghost");
        assert!(matches!(svc.me(&ghost).await, Err(DomainError::Unauthorized(_))));
    }
}
