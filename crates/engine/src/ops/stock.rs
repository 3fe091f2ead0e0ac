use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, NewStock, ResultEngine, Stock, stock};

use super::{Engine, with_tx};

impl Engine {
    /// Register a stock entry.
    ///
    /// A missing `product_id` stores an orphan row; a present one must point
    /// at an existing product.
    pub async fn register_stock(&self, input: NewStock) -> ResultEngine<Stock> {
        if input.quantity < 0 {
            return Err(EngineError::InvalidInput(
                "quantity must be >= 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if let Some(product_id) = input.product_id {
                self.require_product(&db_tx, product_id).await?;
            }

            let model = stock::ActiveModel {
                quantity: ActiveValue::Set(input.quantity),
                product_id: ActiveValue::Set(input.product_id),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(
                stock_id = model.id,
                product_id = ?model.product_id,
                quantity = model.quantity,
                "registered stock"
            );
            Ok(Stock::from(model))
        })
    }

    /// All stock entries, in insertion order.
    pub async fn list_stock(&self) -> ResultEngine<Vec<Stock>> {
        let models = stock::Entity::find()
            .order_by_asc(stock::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Stock::from).collect())
    }
}
