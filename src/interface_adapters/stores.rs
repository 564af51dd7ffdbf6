use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{User, UserStore};

// In-memory account store; contents live as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>, String> {
        Ok(self.users.lock().await.clone())
    }

    async fn create_user(&self, name: String) -> Result<User, String> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
        };
        self.users.lock().await.push(user.clone());
        Ok(user)
    }
}

// PostgreSQL-backed account store.
#[derive(Clone)]
pub struct PostgresUserStore {
    pub db: PgPool,
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn list_users(&self) -> Result<Vec<User>, String> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT id, name
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| User { id, name })
            .collect())
    }

    async fn create_user(&self, name: String) -> Result<User, String> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .execute(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(user)
    }
}
