use crate::error::ServiceResult;
use crate::models::Coupon;

use super::DatabaseConnection;

impl DatabaseConnection {
    pub async fn get_all_coupons(&mut self) -> ServiceResult<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT id, codigo, desconto FROM cupons ORDER BY id
        "#,
        )
        .fetch_all(&mut *self.connection)
        .await?;

        Ok(coupons)
    }

    /// `coupon.code` is expected in its normalized form.
    pub async fn store_coupon(&mut self, coupon: Coupon) -> ServiceResult<Coupon> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO cupons (codigo, desconto) VALUES ($1, $2)
            RETURNING id, codigo, desconto
        "#,
        )
        .bind(coupon.code)
        .bind(coupon.discount)
        .fetch_one(&mut *self.connection)
        .await?;

        Ok(coupon)
    }
}
