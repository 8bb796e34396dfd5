//! `users` table.

use sea_orm::{QueryFilter, Select, Set};
use sea_orm::entity::prelude::*;

use quill_core::domain::User;

/// An account row. `username` carries a unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Exact, case-sensitive lookup of a login name.
    pub fn find_by_username(username: &str) -> Select<Entity> {
        Self::find().filter(Column::Username.eq(username))
    }
}

impl From<Model> for User {
    fn from(row: Model) -> Self {
        let Model {
            id,
            username,
            password_hash,
            created_at,
            updated_at,
        } = row;

        User {
            id,
            username,
            password_hash,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            password_hash,
            created_at,
            updated_at,
        } = user;

        ActiveModel {
            id: Set(id),
            username: Set(username),
            password_hash: Set(password_hash),
            created_at: Set(created_at.into()),
            updated_at: Set(updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    #[test]
    fn test_username_lookup_is_an_exact_match() {
        let sql = Entity::find_by_username("alice")
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.starts_with("SELECT"), "{sql}");
        assert!(sql.contains(r#"FROM "users""#), "{sql}");
        assert!(sql.ends_with(r#"WHERE "users"."username" = 'alice'"#), "{sql}");
    }
}
