use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, RegisterRequest, User, UserStatus, normalize_email};
use crate::repository::UserRepository;

/// Statuses an administrator may assign through the review workflow
const ASSIGNABLE_STATUSES: [UserStatus; 2] = [UserStatus::Accepted, UserStatus::Rejected];

/// Service layer for account registration and review
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

// Shares the repository; `R` itself need not be `Clone`
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account in `pending` state
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        input.validate().map_err(first_field_error)?;

        let hrms_id = input.hrms_id.trim().to_string();
        if hrms_id.is_empty() {
            return Err(UserError::Validation {
                field: "hrms_id",
                message: "This field may not be blank.".to_string(),
            });
        }

        let password_hash = self.hash_password(&input.password)?;

        self.repository
            .create(NewUser {
                hrms_id,
                email: input.email.as_deref().map(normalize_email),
                phone_number: input.phone_no,
                password_hash,
                status: UserStatus::Pending,
                is_staff: false,
                is_superuser: false,
            })
            .await
    }

    /// Verify user credentials (for login).
    ///
    /// Approval status is not checked: pending and rejected accounts can
    /// still obtain tokens.
    pub async fn verify_credentials(&self, hrms_id: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_hrms_id(hrms_id)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_by_hrms_id(&self, hrms_id: &str) -> UserResult<User> {
        self.repository
            .get_by_hrms_id(hrms_id)
            .await?
            .ok_or_else(|| UserError::NotFound(hrms_id.to_string()))
    }

    /// List accounts in registration order; `filter` restricts to one status
    pub async fn list_users(&self, filter: Option<&str>) -> UserResult<Vec<User>> {
        let status = match filter.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_status("filter", raw)?),
        };

        self.repository.list(status).await
    }

    /// Overwrite an account's status. Any transition between accepted and
    /// rejected is allowed; `pending` cannot be assigned.
    pub async fn set_status(&self, hrms_id: &str, status: &str) -> UserResult<User> {
        let status = parse_status("status", status.trim())?;
        if !ASSIGNABLE_STATUSES.contains(&status) {
            return Err(UserError::InvalidChoice {
                field: "status",
                value: status.to_string(),
            });
        }

        self.repository
            .update_status(hrms_id, status)
            .await?
            .ok_or_else(|| UserError::NotFound(hrms_id.to_string()))
    }

    /// Create an accepted staff superuser unless the HRMS ID is already taken
    pub async fn ensure_superuser(
        &self,
        hrms_id: &str,
        email: Option<&str>,
        password: &str,
    ) -> UserResult<User> {
        if let Some(existing) = self.repository.get_by_hrms_id(hrms_id).await? {
            tracing::debug!(hrms_id = %hrms_id, "Superuser already present");
            return Ok(existing);
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .repository
            .create(NewUser {
                hrms_id: hrms_id.to_string(),
                email: email.map(normalize_email),
                phone_number: None,
                password_hash,
                status: UserStatus::Accepted,
                is_staff: true,
                is_superuser: true,
            })
            .await?;

        tracing::info!(hrms_id = %hrms_id, "Bootstrapped superuser");
        Ok(user)
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

fn parse_status(field: &'static str, raw: &str) -> UserResult<UserStatus> {
    raw.parse().map_err(|_| UserError::InvalidChoice {
        field,
        value: raw.to_string(),
    })
}

fn first_field_error(errors: ValidationErrors) -> UserError {
    let (field, message) = errors
        .field_errors()
        .into_iter()
        .next()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid value.".to_string());
            (field.to_string(), message)
        })
        .unwrap_or_else(|| ("non_field_errors".to_string(), errors.to_string()));

    let field = match field.as_str() {
        "hrms_id" => "hrms_id",
        "password" => "password",
        "email" => "email",
        "phone_no" => "phone_no",
        _ => "non_field_errors",
    };

    UserError::Validation { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn register_request(hrms_id: &str, email: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            hrms_id: hrms_id.to_string(),
            password: "pw".to_string(),
            email: email.map(str::to_string),
            phone_no: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_pending_user_with_hashed_password() {
        let service = UserService::new(InMemoryUserRepository::new());

        let user = service.register(register_request("E100", None)).await.unwrap();

        assert_eq!(user.status, UserStatus::Pending);
        assert!(!user.is_staff);
        assert_ne!(user.password_hash, "pw");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_twice_yields_one_duplicate() {
        let service = UserService::new(InMemoryUserRepository::new());

        let first = service.register(register_request("E100", None)).await;
        let second = service.register(register_request("E100", None)).await;

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(UserError::Duplicate { field: "hrms_id", .. })
        ));
    }

    #[tokio::test]
    async fn test_register_normalizes_email_domain() {
        let service = UserService::new(InMemoryUserRepository::new());

        let user = service
            .register(register_request("E1", Some("Jane@Example.COM")))
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("Jane@example.com"));

        let dup = service
            .register(register_request("E2", Some("Jane@EXAMPLE.com")))
            .await;
        assert!(matches!(dup, Err(UserError::Duplicate { field: "email", .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_whitespace_hrms_id() {
        let service = UserService::new(InMemoryUserRepository::new());

        let result = service.register(register_request("   ", None)).await;
        assert!(matches!(
            result,
            Err(UserError::Validation { field: "hrms_id", .. })
        ));
    }

    #[tokio::test]
    async fn test_pending_user_can_log_in() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("E100", None)).await.unwrap();

        let user = service.verify_credentials("E100", "pw").await.unwrap();
        assert_eq!(user.status, UserStatus::Pending);
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password_or_unknown_user() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("E100", None)).await.unwrap();

        assert!(matches!(
            service.verify_credentials("E100", "nope").await,
            Err(UserError::InvalidCredentials)
        ));
        assert!(matches!(
            service.verify_credentials("E404", "pw").await,
            Err(UserError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_set_status_is_idempotent() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("E100", None)).await.unwrap();

        let once = service.set_status("E100", "accepted").await.unwrap();
        let twice = service.set_status("E100", "accepted").await.unwrap();

        assert_eq!(once.status, UserStatus::Accepted);
        assert_eq!(twice.status, once.status);
        assert_eq!(twice.id, once.id);
    }

    #[tokio::test]
    async fn test_set_status_allows_any_transition_between_outcomes() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_request("E100", None)).await.unwrap();

        service.set_status("E100", "accepted").await.unwrap();
        let user = service.set_status("E100", "rejected").await.unwrap();
        assert_eq!(user.status, UserStatus::Rejected);
        let user = service.set_status("E100", "accepted").await.unwrap();
        assert_eq!(user.status, UserStatus::Accepted);
    }

    #[tokio::test]
    async fn test_set_status_rejects_invalid_choice_before_storage() {
        // No expectations: any repository call would panic
        let service = UserService::new(MockUserRepository::new());

        for raw in ["approved", "pending", ""] {
            let result = service.set_status("E100", raw).await;
            assert!(
                matches!(result, Err(UserError::InvalidChoice { field: "status", .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_set_status_unknown_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_status()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.set_status("E404", "accepted").await;

        assert!(matches!(result, Err(UserError::NotFound(id)) if id == "E404"));
    }

    #[tokio::test]
    async fn test_list_users_filter() {
        let service = UserService::new(InMemoryUserRepository::new());
        for id in ["E1", "E2", "E3"] {
            service.register(register_request(id, None)).await.unwrap();
        }
        service.set_status("E2", "rejected").await.unwrap();

        let all = service.list_users(None).await.unwrap();
        let pending = service.list_users(Some("pending")).await.unwrap();
        let rejected = service.list_users(Some("rejected")).await.unwrap();

        assert_eq!(all.len(), 3);
        let pending_ids: Vec<_> = pending.iter().map(|u| u.hrms_id.as_str()).collect();
        assert_eq!(pending_ids, vec!["E1", "E3"]);
        assert_eq!(rejected.len(), 1);
        assert!(service.list_users(Some("")).await.unwrap().len() == 3);
    }

    #[tokio::test]
    async fn test_list_users_unknown_filter() {
        let service = UserService::new(MockUserRepository::new());
        let result = service.list_users(Some("everyone")).await;
        assert!(matches!(
            result,
            Err(UserError::InvalidChoice { field: "filter", .. })
        ));
    }

    #[tokio::test]
    async fn test_ensure_superuser_is_idempotent() {
        let service = UserService::new(InMemoryUserRepository::new());

        let first = service
            .ensure_superuser("ADMIN", Some("admin@corp.example"), "secret")
            .await
            .unwrap();
        let second = service.ensure_superuser("ADMIN", None, "other").await.unwrap();

        assert!(first.is_staff && first.is_superuser);
        assert_eq!(first.status, UserStatus::Accepted);
        assert_eq!(first.id, second.id);
        assert!(service.verify_credentials("ADMIN", "secret").await.is_ok());
    }
}
