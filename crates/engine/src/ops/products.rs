use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, NewProduct, Product, ResultEngine, categories, product_categories, products,
};

use super::{Engine, normalize_required_text, unique_violation, with_tx};

impl Engine {
    /// Register a product and link it to the given categories.
    ///
    /// Codes are unique and both code and name are required. Every category
    /// id must resolve, otherwise nothing is written; repeated ids produce a
    /// single link.
    pub async fn register_product(&self, input: NewProduct) -> ResultEngine<Product> {
        let code = normalize_required_text(&input.code, "product code")?;
        let name = normalize_required_text(&input.name, "product name")?;
        let mut category_ids = input.category_ids;
        category_ids.sort_unstable();
        category_ids.dedup();

        with_tx!(self, |db_tx| {
            let exists = products::Entity::find()
                .filter(products::Column::Code.eq(code.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::DuplicateName(code));
            }

            let categories = self.require_categories(&db_tx, &category_ids).await?;

            let model = products::ActiveModel {
                code: ActiveValue::Set(code.clone()),
                name: ActiveValue::Set(Some(name)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await
            .map_err(|err| unique_violation(err, &code))?;

            for category in &categories {
                product_categories::ActiveModel {
                    product_id: ActiveValue::Set(model.id),
                    category_id: ActiveValue::Set(category.id),
                }
                .insert(&db_tx)
                .await?;
            }

            tracing::info!(
                product_id = model.id,
                categories = categories.len(),
                "registered product"
            );
            Ok(Product::from_parts(model, categories))
        })
    }

    /// All products with their categories, in insertion order.
    pub async fn list_products(&self) -> ResultEngine<Vec<Product>> {
        let rows = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .find_with_related(categories::Entity)
            .all(&self.database)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(model, categories)| Product::from_parts(model, categories))
            .collect())
    }

    /// Fetch a product by id. An unknown id is `Ok(None)`.
    pub async fn product(&self, product_id: i32) -> ResultEngine<Option<Product>> {
        let Some(model) = products::Entity::find_by_id(product_id)
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        self.with_categories(model).await.map(Some)
    }

    pub async fn product_by_code(&self, code: &str) -> ResultEngine<Option<Product>> {
        let Some(model) = products::Entity::find()
            .filter(products::Column::Code.eq(code.trim()))
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        self.with_categories(model).await.map(Some)
    }

    async fn with_categories(&self, model: products::Model) -> ResultEngine<Product> {
        let categories = model
            .find_related(categories::Entity)
            .all(&self.database)
            .await?;
        Ok(Product::from_parts(model, categories))
    }

    /// Ensure a product exists inside the current transaction.
    pub(super) async fn require_product(
        &self,
        db: &DatabaseTransaction,
        product_id: i32,
    ) -> ResultEngine<products::Model> {
        products::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                EngineError::UnknownReference(format!("product {product_id} not exists"))
            })
    }
}
