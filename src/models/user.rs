use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked person. `id` is `None` until the record is first persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

impl User {
    pub fn new(first_name: String, last_name: String, birthdate: NaiveDate, email: String) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            birthdate,
            email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

impl From<CreateUser> for User {
    fn from(request: CreateUser) -> Self {
        User::new(
            request.first_name,
            request.last_name,
            request.birthdate,
            request.email,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

impl UpdateUser {
    /// Merges the new field values onto the id of the record being replaced.
    pub fn into_user(self, id: i64) -> User {
        User {
            id: Some(id),
            first_name: self.first_name,
            last_name: self.last_name,
            birthdate: self.birthdate,
            email: self.email,
        }
    }
}
