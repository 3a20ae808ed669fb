use anyhow::Context;
use async_trait::async_trait;
use sqlx::MySqlPool;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::users::repo_types::{NewUser, User, UserChanges};

/// One method per statement against `tbl_users`.
///
/// `update` and `delete` return the affected-row count, which is the only
/// existence signal for writes: callers treat `0` as "no such user".
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Current store time; doubles as a connectivity check.
    async fn now(&self) -> anyhow::Result<OffsetDateTime>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Inserts a row and returns the store-assigned id.
    async fn insert(&self, user: &NewUser) -> anyhow::Result<i64>;
    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64>;
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct MySqlUserStore {
    db: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn now(&self) -> anyhow::Result<OffsetDateTime> {
        let now = sqlx::query_scalar::<_, PrimitiveDateTime>("SELECT UTC_TIMESTAMP() AS now")
            .fetch_one(&self.db)
            .await
            .context("select store time")?;
        Ok(now.assume_utc())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, fullname, lastname
            FROM tbl_users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, fullname, lastname
            FROM tbl_users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user")?;
        Ok(user)
    }

    async fn insert(&self, user: &NewUser) -> anyhow::Result<i64> {
        let res = sqlx::query(
            r#"
            INSERT INTO tbl_users (firstname, fullname, lastname, password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.firstname)
        .bind(user.fullname.as_deref()) // None → NULL
        .bind(&user.lastname)
        .bind(&user.password_hash)
        .execute(&self.db)
        .await
        .context("insert user")?;
        i64::try_from(res.last_insert_id()).context("generated id out of range")
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64> {
        // The driver negotiates CLIENT_FOUND_ROWS, so rows_affected counts matched rows.
        let query = match &changes.password_hash {
            Some(hash) => sqlx::query(
                r#"
                UPDATE tbl_users
                SET firstname = COALESCE(?, firstname),
                    fullname = COALESCE(?, fullname),
                    lastname = COALESCE(?, lastname),
                    password = ?
                WHERE id = ?
                "#,
            )
            .bind(changes.firstname.as_deref())
            .bind(changes.fullname.as_deref())
            .bind(changes.lastname.as_deref())
            .bind(hash.as_str())
            .bind(id),
            None => sqlx::query(
                r#"
                UPDATE tbl_users
                SET firstname = COALESCE(?, firstname),
                    fullname = COALESCE(?, fullname),
                    lastname = COALESCE(?, lastname)
                WHERE id = ?
                "#,
            )
            .bind(changes.firstname.as_deref())
            .bind(changes.fullname.as_deref())
            .bind(changes.lastname.as_deref())
            .bind(id),
        };
        let res = query.execute(&self.db).await.context("update user")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM tbl_users WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected())
    }
}
