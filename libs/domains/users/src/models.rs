use axum_helpers::{ROLE_ADMIN, ROLE_USER};
use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Approval state of a registered account
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    /// Waiting for an administrator to review the registration
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// User account, keyed by HRMS ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub hrms_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: UserStatus,
    /// Grants access to the admin review endpoints
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            hrms_id: input.hrms_id,
            email: input.email,
            phone_number: input.phone_number,
            password_hash: input.password_hash,
            status: input.status,
            is_staff: input.is_staff,
            is_superuser: input.is_superuser,
            date_joined: Utc::now(),
        }
    }

    /// Role claims embedded in issued tokens
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec![ROLE_USER.to_string()];
        if self.is_staff || self.is_superuser {
            roles.push(ROLE_ADMIN.to_string());
        }
        roles
    }
}

/// Account ready to be persisted; the password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub hrms_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub status: UserStatus,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// User response (without password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub hrms_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: UserStatus,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            hrms_id: user.hrms_id,
            email: user.email,
            phone_number: user.phone_number,
            status: user.status,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
        }
    }
}

/// Treats `""` and whitespace-only strings as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Self-service registration payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub hrms_id: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[serde(default, alias = "phone_number", deserialize_with = "blank_as_none")]
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub phone_no: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub hrms_id: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// Access/refresh pair returned by login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Identity echoed back by `/hello`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
    pub hrms_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub token: String,
}

/// Status is kept as a raw string so unknown values surface as a field error
/// instead of a JSON rejection.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub hrms_id: String,
    #[schema(example = "accepted")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RegistrationsQuery {
    /// One of `pending`, `accepted`, `rejected`; omit for all users
    pub filter: Option<String>,
}

/// Lower-cases the domain part of an email address.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(is_staff: bool) -> User {
        User::new(NewUser {
            hrms_id: "E100".to_string(),
            email: None,
            phone_number: None,
            password_hash: "hash".to_string(),
            status: UserStatus::Pending,
            is_staff,
            is_superuser: false,
        })
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("Jane.Doe@Example.COM"), "Jane.Doe@example.com");
        assert_eq!(normalize_email("  a@B.org "), "a@b.org");
    }

    #[test]
    fn test_roles_include_admin_for_staff() {
        assert_eq!(new_user(false).roles(), vec!["user"]);
        assert_eq!(new_user(true).roles(), vec!["user", "admin"]);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(new_user(false)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_register_request_blank_optionals_are_none() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"hrms_id": "E1", "password": "pw", "email": "", "phone_no": "  "}"#,
        )
        .unwrap();
        assert!(req.email.is_none());
        assert!(req.phone_no.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_accepts_phone_number_alias() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"hrms_id": "E1", "password": "pw", "phone_number": "555-0100"}"#,
        )
        .unwrap();
        assert_eq!(req.phone_no.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"hrms_id": "E1", "password": "pw", "email": "nope"}"#)
                .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_status_parses_from_lowercase() {
        assert_eq!("accepted".parse::<UserStatus>().unwrap(), UserStatus::Accepted);
        assert!("approved".parse::<UserStatus>().is_err());
        assert_eq!(UserStatus::Rejected.to_string(), "rejected");
    }
}
