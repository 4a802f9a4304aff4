//! Registration, login, token refresh, and bearer authentication.

use std::sync::Arc;

use habitquest_domain::User;

use crate::infrastructure::auth::{
    hash_password, verify_password, JwtService, Password, TokenPair,
};
use crate::infrastructure::ports::{ClockPort, UserRepo};

use super::UseCaseError;

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct AuthOps {
    users: Arc<dyn UserRepo>,
    jwt: Arc<JwtService>,
    clock: Arc<dyn ClockPort>,
}

impl AuthOps {
    pub fn new(users: Arc<dyn UserRepo>, jwt: Arc<JwtService>, clock: Arc<dyn ClockPort>) -> Self {
        Self { users, jwt, clock }
    }

    /// Register a new account and hand back its first token pair.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<TokenPair, UseCaseError> {
        if password != confirm_password {
            return Err(UseCaseError::InvalidInput(
                "Passwords do not match".to_string(),
            ));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(UseCaseError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        if self.users.get_by_email(email).await?.is_some() {
            return Err(UseCaseError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&Password::new(password))?;
        let user = User::new(email, password_hash, self.clock.now());
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "Registered new user");

        Ok(self.jwt.generate_token_pair(user.id, &user.email)?)
    }

    /// Exchange credentials for a token pair.
    ///
    /// Unknown email and wrong password produce the same message so the
    /// endpoint cannot be used to probe for accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, UseCaseError> {
        let invalid =
            || UseCaseError::Unauthorized("Incorrect email or password".to_string());

        let user = self.users.get_by_email(email).await?.ok_or_else(invalid)?;

        if !verify_password(&Password::new(password), &user.password_hash)? {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(UseCaseError::Forbidden(
                "User account is disabled".to_string(),
            ));
        }

        Ok(self.jwt.generate_token_pair(user.id, &user.email)?)
    }

    /// Exchange a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UseCaseError> {
        let claims = self.jwt.validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .get(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                UseCaseError::Unauthorized("User not found or inactive".to_string())
            })?;

        Ok(self.jwt.generate_token_pair(user.id, &user.email)?)
    }

    /// Resolve a bearer access token to its active user.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, UseCaseError> {
        let claims = self.jwt.validate_access_token(access_token)?;
        let user_id = claims.user_id()?;

        let user = self.users.get(user_id).await?.ok_or_else(|| {
            UseCaseError::Unauthorized("Could not validate credentials".to_string())
        })?;

        if !user.is_active {
            return Err(UseCaseError::Forbidden(
                "User account is disabled".to_string(),
            ));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infrastructure::ports::{MockClockPort, MockUserRepo};

    fn jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("unit-test-secret"))
    }

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);
        clock
    }

    fn stored_user(email: &str, password: &str) -> User {
        let hash = hash_password(&Password::new(password)).expect("hash password");
        User::new(email, hash, Utc::now())
    }

    #[tokio::test]
    async fn register_rejects_mismatched_confirmation() {
        let ops = AuthOps::new(Arc::new(MockUserRepo::new()), jwt(), Arc::new(clock()));
        let err = ops
            .register("a@example.com", "password123", "password124")
            .await
            .expect_err("mismatch must fail");
        assert!(matches!(err, UseCaseError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn register_rejects_short_passwords() {
        let ops = AuthOps::new(Arc::new(MockUserRepo::new()), jwt(), Arc::new(clock()));
        let err = ops
            .register("a@example.com", "short", "short")
            .await
            .expect_err("short password must fail");
        assert!(matches!(err, UseCaseError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_by_email()
            .with(eq("a@example.com"))
            .returning(|_| Ok(Some(stored_user("a@example.com", "password123"))));

        let ops = AuthOps::new(Arc::new(users), jwt(), Arc::new(clock()));
        let err = ops
            .register("a@example.com", "password123", "password123")
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, UseCaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_creates_user_and_issues_tokens() {
        let mut users = MockUserRepo::new();
        users.expect_get_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|_| Ok(()));

        let ops = AuthOps::new(Arc::new(users), jwt(), Arc::new(clock()));
        let pair = ops
            .register("a@example.com", "password123", "password123")
            .await
            .expect("registration succeeds");
        assert_eq!(pair.token_type, "bearer");
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email_alike() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_by_email()
            .with(eq("a@example.com"))
            .returning(|_| Ok(Some(stored_user("a@example.com", "password123"))));
        users
            .expect_get_by_email()
            .with(eq("b@example.com"))
            .returning(|_| Ok(None));

        let ops = AuthOps::new(Arc::new(users), jwt(), Arc::new(clock()));

        let wrong_password = ops
            .login("a@example.com", "nope-nope")
            .await
            .expect_err("wrong password");
        let unknown_email = ops
            .login("b@example.com", "password123")
            .await
            .expect_err("unknown email");

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_rejects_disabled_accounts() {
        let mut users = MockUserRepo::new();
        users.expect_get_by_email().returning(|_| {
            let mut user = stored_user("a@example.com", "password123");
            user.is_active = false;
            Ok(Some(user))
        });

        let ops = AuthOps::new(Arc::new(users), jwt(), Arc::new(clock()));
        let err = ops
            .login("a@example.com", "password123")
            .await
            .expect_err("disabled account");
        assert!(matches!(err, UseCaseError::Forbidden(_)));
    }

    #[tokio::test]
    async fn refresh_rejects_access_tokens() {
        let jwt = jwt();
        let user = stored_user("a@example.com", "password123");
        let pair = jwt
            .generate_token_pair(user.id, &user.email)
            .expect("token pair");

        let ops = AuthOps::new(Arc::new(MockUserRepo::new()), jwt, Arc::new(clock()));
        let err = ops
            .refresh(&pair.access_token)
            .await
            .expect_err("access token must not refresh");
        assert!(matches!(err, UseCaseError::Auth(_)));
    }

    #[tokio::test]
    async fn refresh_issues_new_pair_for_active_user() {
        let jwt = jwt();
        let user = stored_user("a@example.com", "password123");
        let pair = jwt
            .generate_token_pair(user.id, &user.email)
            .expect("token pair");

        let user_id = user.id;
        let mut users = MockUserRepo::new();
        users
            .expect_get()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));

        let ops = AuthOps::new(Arc::new(users), jwt, Arc::new(clock()));
        let refreshed = ops
            .refresh(&pair.refresh_token)
            .await
            .expect("refresh succeeds");
        assert!(!refreshed.access_token.is_empty());
    }

    #[tokio::test]
    async fn authenticate_resolves_the_token_owner() {
        let jwt = jwt();
        let user = stored_user("a@example.com", "password123");
        let pair = jwt
            .generate_token_pair(user.id, &user.email)
            .expect("token pair");

        let expected_id = user.id;
        let mut users = MockUserRepo::new();
        users
            .expect_get()
            .with(eq(expected_id))
            .returning(move |_| Ok(Some(user.clone())));

        let ops = AuthOps::new(Arc::new(users), jwt, Arc::new(clock()));
        let resolved = ops
            .authenticate(&pair.access_token)
            .await
            .expect("authentication succeeds");
        assert_eq!(resolved.id, expected_id);
    }
}
