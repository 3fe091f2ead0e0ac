use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, NewOrder, Order, ResultEngine, user_orders, users};

use super::{Engine, with_tx};

impl Engine {
    /// Place an order attributed to `user_id`.
    ///
    /// Both the product and the user must exist.
    pub async fn place_order(&self, input: NewOrder, user_id: i32) -> ResultEngine<Order> {
        if input.quantity <= 0 {
            return Err(EngineError::InvalidInput(
                "quantity must be > 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.require_product(&db_tx, input.product_id).await?;
            if users::Entity::find_by_id(user_id).one(&db_tx).await?.is_none() {
                return Err(EngineError::UnknownReference(format!(
                    "user {user_id} not exists"
                )));
            }

            let model = user_orders::ActiveModel {
                product_id: ActiveValue::Set(Some(input.product_id)),
                quantity: ActiveValue::Set(input.quantity),
                user_id: ActiveValue::Set(Some(user_id)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(order_id = model.id, user_id, "placed order");
            Ok(Order::from(model))
        })
    }

    /// Orders placed by one user, oldest first.
    pub async fn list_orders(&self, user_id: i32) -> ResultEngine<Vec<Order>> {
        let models = user_orders::Entity::find()
            .filter(user_orders::Column::UserId.eq(user_id))
            .order_by_asc(user_orders::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Order::from).collect())
    }
}
