use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserStatus};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Duplicate` when the HRMS ID,
    /// email or phone number is already taken.
    async fn create(&self, input: NewUser) -> UserResult<User>;

    async fn get_by_hrms_id(&self, hrms_id: &str) -> UserResult<Option<User>>;

    /// All users in registration order, optionally restricted to one status
    async fn list(&self, status: Option<UserStatus>) -> UserResult<Vec<User>>;

    /// Overwrite the status; `None` when no such account exists
    async fn update_status(&self, hrms_id: &str, status: UserStatus) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    // Insertion order doubles as registration order
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        for existing in users.iter() {
            if existing.hrms_id == input.hrms_id {
                return Err(UserError::Duplicate {
                    field: "hrms_id",
                    value: input.hrms_id,
                });
            }
            if input.email.is_some() && existing.email == input.email {
                return Err(UserError::Duplicate {
                    field: "email",
                    value: input.email.unwrap_or_default(),
                });
            }
            if input.phone_number.is_some() && existing.phone_number == input.phone_number {
                return Err(UserError::Duplicate {
                    field: "phone_no",
                    value: input.phone_number.unwrap_or_default(),
                });
            }
        }

        let user = User::new(input);
        users.push(user.clone());

        tracing::info!(hrms_id = %user.hrms_id, "Created user");
        Ok(user)
    }

    async fn get_by_hrms_id(&self, hrms_id: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.hrms_id == hrms_id).cloned())
    }

    async fn list(&self, status: Option<UserStatus>) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| status.is_none_or(|s| u.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(&self, hrms_id: &str, status: UserStatus) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.hrms_id == hrms_id) else {
            return Ok(None);
        };

        user.status = status;
        tracing::info!(hrms_id = %hrms_id, status = %status, "Updated user status");
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(hrms_id: &str, email: Option<&str>) -> NewUser {
        NewUser {
            hrms_id: hrms_id.to_string(),
            email: email.map(str::to_string),
            phone_number: None,
            password_hash: "hash".to_string(),
            status: UserStatus::Pending,
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(new_user("E100", None)).await.unwrap();
        assert_eq!(user.status, UserStatus::Pending);

        let fetched = repo.get_by_hrms_id("E100").await.unwrap();
        assert_eq!(fetched.unwrap().id, user.id);
        assert!(repo.get_by_hrms_id("E999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_hrms_id_error() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("E100", None)).await.unwrap();

        let result = repo.create(new_user("E100", None)).await;
        assert!(matches!(
            result,
            Err(UserError::Duplicate { field: "hrms_id", .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_phone_reported_under_request_field() {
        let repo = InMemoryUserRepository::new();
        let mut first = new_user("E1", None);
        first.phone_number = Some("555-0100".to_string());
        repo.create(first).await.unwrap();

        let mut second = new_user("E2", None);
        second.phone_number = Some("555-0100".to_string());
        let result = repo.create(second).await;

        assert!(matches!(
            result,
            Err(UserError::Duplicate { field: "phone_no", .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_error_ignores_absent_emails() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("E1", None)).await.unwrap();
        repo.create(new_user("E2", None)).await.unwrap();
        repo.create(new_user("E3", Some("a@b.com"))).await.unwrap();

        let result = repo.create(new_user("E4", Some("a@b.com"))).await;
        assert!(matches!(
            result,
            Err(UserError::Duplicate { field: "email", .. })
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_keeps_registration_order() {
        let repo = InMemoryUserRepository::new();
        for id in ["E1", "E2", "E3", "E4"] {
            repo.create(new_user(id, None)).await.unwrap();
        }
        repo.update_status("E2", UserStatus::Accepted).await.unwrap();

        let all: Vec<_> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.hrms_id)
            .collect();
        assert_eq!(all, vec!["E1", "E2", "E3", "E4"]);

        let pending: Vec<_> = repo
            .list(Some(UserStatus::Pending))
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.hrms_id)
            .collect();
        assert_eq!(pending, vec!["E1", "E3", "E4"]);
    }

    #[tokio::test]
    async fn test_update_status_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update_status("nobody", UserStatus::Accepted).await.unwrap();
        assert!(result.is_none());
    }
}
