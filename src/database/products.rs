use crate::error::ServiceResult;
use crate::models::Product;

use super::DatabaseConnection;

impl DatabaseConnection {
    pub async fn get_all_products(&mut self) -> ServiceResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, nome, preco, descricao, imagem FROM produtos ORDER BY nome
        "#,
        )
        .fetch_all(&mut *self.connection)
        .await?;

        Ok(products)
    }

    /// Inserts the product if its id is `0`, otherwise updates the existing row.
    ///
    /// Returns `None` if there is no product with the given id.
    pub async fn store_product(&mut self, product: Product) -> ServiceResult<Option<Product>> {
        let Product {
            id,
            name,
            price,
            description,
            image,
        } = product;

        let product = if id == 0 {
            let product = sqlx::query_as::<_, Product>(
                r#"
                INSERT INTO produtos (nome, preco, descricao, imagem) VALUES ($1, $2, $3, $4)
                RETURNING id, nome, preco, descricao, imagem
            "#,
            )
            .bind(name)
            .bind(price)
            .bind(description)
            .bind(image)
            .fetch_one(&mut *self.connection)
            .await?;

            Some(product)
        } else {
            sqlx::query_as::<_, Product>(
                r#"
                UPDATE produtos SET nome = $1, preco = $2, descricao = $3, imagem = $4 WHERE id = $5
                RETURNING id, nome, preco, descricao, imagem
            "#,
            )
            .bind(name)
            .bind(price)
            .bind(description)
            .bind(image)
            .bind(id)
            .fetch_optional(&mut *self.connection)
            .await?
        };

        Ok(product)
    }

    /// Returns `false` if there was no product with the given id.
    pub async fn delete_product(&mut self, id: i32) -> ServiceResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM produtos WHERE id = $1
        "#,
        )
        .bind(id)
        .execute(&mut *self.connection)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
