//! Data models shared by the store and the HTTP handlers

use serde::{Deserialize, Serialize};

/// User record as persisted by the credential store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A note owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

/// Body of `POST /notes`.
///
/// Only `name` is read; any owner field a client sends is dropped on the floor.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub login: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}
