//! User types

use super::UserId;
use serde::{Deserialize, Serialize};

/// A registered user (public shape; the password hash never leaves storage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
}

/// Data for registering a new user
///
/// `password_hash` must already be hashed; storage never sees plaintext.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
}
