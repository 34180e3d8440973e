use crate::error::ServiceResult;
use crate::models::{Role, User};

use super::DatabaseConnection;

impl DatabaseConnection {
    pub async fn get_user_by_email(&mut self, email: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nome, email, senha, role FROM usuarios WHERE email = $1
        "#,
        )
        .bind(email)
        .fetch_optional(&mut *self.connection)
        .await?;

        Ok(user)
    }

    pub async fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &Role,
    ) -> ServiceResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuarios (nome, email, senha, role) VALUES ($1, $2, $3, $4)
            RETURNING id, nome, email, senha, role
        "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&mut *self.connection)
        .await?;

        Ok(user)
    }

    pub async fn update_user(
        &mut self,
        id: i32,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &Role,
    ) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuarios SET nome = $1, email = $2, senha = $3, role = $4 WHERE id = $5
            RETURNING id, nome, email, senha, role
        "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&mut *self.connection)
        .await?;

        Ok(user)
    }
}
