//! User entity - Staff accounts allowed to manage events.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name
    #[sea_orm(unique)]
    pub username: String,
    /// Gmail address, also accepted as login
    #[sea_orm(unique)]
    pub email: String,
    /// Optional ten-digit phone number
    #[sea_orm(unique)]
    pub phone: Option<String>,
    /// Salted password digest, see `core::password`
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name
    pub full_name: Option<String>,
    /// When the account was created
    pub created_at: DateTime,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
