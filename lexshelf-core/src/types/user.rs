//! Signed-in user profile

use serde::{Deserialize, Serialize};

/// A user as issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Avatar image URL
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            address: None,
            avatar: None,
        }
    }
}

/// Editable profile fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Apply the update, rejecting blank required fields
    pub fn apply(self, user: &mut User) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name must not be empty".to_string());
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(format!("'{}' is not an email address", email));
            }
        }

        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            user.email = email.trim().to_string();
        }
        // Optional fields are cleared by an empty string
        if let Some(phone) = self.phone {
            user.phone = non_empty(phone);
        }
        if let Some(address) = self.address {
            user.address = non_empty(address);
        }
        if let Some(avatar) = self.avatar {
            user.avatar = non_empty(avatar);
        }
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
