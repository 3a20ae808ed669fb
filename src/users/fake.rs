use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};

#[derive(Debug, Clone)]
struct Row {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// In-memory `tbl_users` with the same matched-row semantics as the MySQL store.
#[derive(Default)]
pub struct InMemoryUserStore {
    table: Mutex<Table>,
    failing: bool,
}

impl InMemoryUserStore {
    /// A store whose every statement fails, like an unreachable database.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    pub fn password_hash(&self, id: i64) -> Option<String> {
        self.table
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .map(|r| r.password_hash.clone())
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn now(&self) -> anyhow::Result<OffsetDateTime> {
        self.check()?;
        Ok(OffsetDateTime::now_utc())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        self.check()?;
        let table = self.table.lock().unwrap();
        Ok(table.rows.values().map(|r| r.user.clone()).collect())
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<User>> {
        self.check()?;
        let table = self.table.lock().unwrap();
        Ok(table.rows.get(&id).map(|r| r.user.clone()))
    }

    async fn insert(&self, user: &NewUser) -> anyhow::Result<i64> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            Row {
                user: User {
                    id,
                    firstname: user.firstname.clone(),
                    fullname: user.fullname.clone(),
                    lastname: user.lastname.clone(),
                },
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> anyhow::Result<u64> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(v) = &changes.firstname {
            row.user.firstname = v.clone();
        }
        if let Some(v) = &changes.fullname {
            row.user.fullname = Some(v.clone());
        }
        if let Some(v) = &changes.lastname {
            row.user.lastname = v.clone();
        }
        if let Some(v) = &changes.password_hash {
            row.password_hash = v.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }
}
