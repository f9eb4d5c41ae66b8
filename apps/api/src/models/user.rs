use sqlx::FromRow;

/// One row per role held; a single row with a NULL role when the user holds none.
#[derive(Debug, Clone, FromRow)]
pub struct UserRoleRow {
    pub role_name: Option<String>,
}
