use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered account with its session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub email: String,
    /// Empty when the user is logged out.
    pub token: String,
    pub name: String,
    pub surname: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a logged-out user with generated ID and timestamps.
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            password: new_user.password,
            email: new_user.email,
            token: String::new(),
            name: String::new(),
            surname: String::new(),
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    /// Public projection of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            surname: self.surname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Data required to register a user. `password` is already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Public profile fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

/// Partial update of a stored user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub token: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub avatar: Option<String>,
}

impl UserUpdate {
    /// Update that clears the session token.
    pub fn clear_token() -> Self {
        Self {
            token: Some(String::new()),
            ..Default::default()
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Apply the present fields to `user`, bumping `updated_at`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(token) = &self.token {
            user.token = token.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            user.surname = surname.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = avatar.clone();
        }
        user.updated_at = Utc::now();
    }
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub avatar: Option<String>,
}

impl UserProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.avatar.is_none()
    }
}

impl From<UserProfileUpdate> for UserUpdate {
    fn from(update: UserProfileUpdate) -> Self {
        Self {
            token: None,
            name: update.name,
            surname: update.surname,
            avatar: update.avatar,
        }
    }
}
