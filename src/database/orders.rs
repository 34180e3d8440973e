use crate::error::ServiceResult;
use crate::models::{Order, OrderType};

use super::DatabaseConnection;

impl DatabaseConnection {
    /// Newest orders first.
    pub async fn get_all_orders(&mut self) -> ServiceResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, mesa, itens, total, tipo, status FROM pedidos ORDER BY id DESC
        "#,
        )
        .fetch_all(&mut *self.connection)
        .await?;

        Ok(orders)
    }

    pub async fn create_order(
        &mut self,
        table: Option<&str>,
        items: &serde_json::Value,
        total: f64,
        order_type: OrderType,
    ) -> ServiceResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO pedidos (mesa, itens, total, tipo) VALUES ($1, $2, $3, $4)
            RETURNING id, mesa, itens, total, tipo, status
        "#,
        )
        .bind(table)
        .bind(items)
        .bind(total)
        .bind(order_type.as_str())
        .fetch_one(&mut *self.connection)
        .await?;

        Ok(order)
    }

    pub async fn update_order_status(
        &mut self,
        id: i32,
        status: &str,
    ) -> ServiceResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE pedidos SET status = $1 WHERE id = $2
            RETURNING id, mesa, itens, total, tipo, status
        "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&mut *self.connection)
        .await?;

        Ok(order)
    }
}
