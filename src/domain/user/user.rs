use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{UserError, UserResult};

/// A single entry in the user directory
///
/// # Invariants
/// - `id` is unique within the directory and never changes
/// - `created_at` is stamped once, at insertion
/// - `name`, `email`, `city` and `role` are non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a stored record from validated input and the identity the
    /// store assigned to it
    pub fn new(id: impl Into<String>, fields: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            email: fields.email,
            city: fields.city,
            role: fields.role,
            created_at,
        }
    }

    /// Overwrites every field supplied in `changes`, leaving the rest untouched
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(city) = changes.city {
            self.city = city;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
    }
}

/// Validated input for creating a user
///
/// Only presence is checked. Emails are not format-validated and roles are an
/// open set ("developer", "designer", "manager", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    city: String,
    role: String,
}

impl NewUser {
    /// Creates the input for a new user
    ///
    /// # Returns
    /// * `Ok(NewUser)` - If every field is present
    /// * `Err(UserError::MissingFields)` - If any field is empty
    ///
    /// # Example
    /// ```
    /// use user_directory_api::domain::user::NewUser;
    ///
    /// assert!(NewUser::new("Amit", "amit@example.com", "Bangalore", "developer").is_ok());
    /// assert!(NewUser::new("", "amit@example.com", "Bangalore", "developer").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        city: impl Into<String>,
        role: impl Into<String>,
    ) -> UserResult<Self> {
        let new_user = Self {
            name: name.into(),
            email: email.into(),
            city: city.into(),
            role: role.into(),
        };

        let fields = [
            &new_user.name,
            &new_user.email,
            &new_user.city,
            &new_user.role,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(UserError::MissingFields);
        }

        Ok(new_user)
    }

    /// Returns the name the user will be created with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address the user will be created with
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the city the user will be created with
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the role the user will be created with
    pub fn role(&self) -> &str {
        &self.role
    }
}

/// Partial update of a user
///
/// An empty string counts as "not supplied", so a field can never be
/// cleared through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    name: Option<String>,
    email: Option<String>,
    city: Option<String>,
    role: Option<String>,
}

impl UserChanges {
    /// Creates a change set, dropping empty values
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        city: Option<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            name: supplied(name),
            email: supplied(email),
            city: supplied(city),
            role: supplied(role),
        }
    }

    /// Sets the new name; an empty value leaves the field unchanged
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = supplied(Some(name.into()));
        self
    }

    /// Sets the new email address; an empty value leaves the field unchanged
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = supplied(Some(email.into()));
        self
    }

    /// Sets the new city; an empty value leaves the field unchanged
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = supplied(Some(city.into()));
        self
    }

    /// Sets the new role; an empty value leaves the field unchanged
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = supplied(Some(role.into()));
        self
    }

    /// True when no field would be overwritten
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.city.is_none() && self.role.is_none()
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
