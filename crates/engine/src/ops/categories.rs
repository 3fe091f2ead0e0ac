use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{Category, EngineError, NewCategory, ResultEngine, categories};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Register a category. Category names are not unique.
    pub async fn register_category(&self, input: NewCategory) -> ResultEngine<Category> {
        let name = normalize_required_text(&input.name, "category name")?;

        with_tx!(self, |db_tx| {
            let model = categories::ActiveModel {
                name: ActiveValue::Set(Some(name)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(category_id = model.id, "registered category");
            Ok(Category::from(model))
        })
    }

    /// All categories, in insertion order.
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    pub async fn category(&self, category_id: i32) -> ResultEngine<Option<Category>> {
        let model = categories::Entity::find_by_id(category_id)
            .one(&self.database)
            .await?;
        Ok(model.map(Category::from))
    }

    /// Resolve every id to an existing category, failing on the first
    /// unknown one. `ids` must already be deduplicated.
    pub(super) async fn require_categories(
        &self,
        db: &DatabaseTransaction,
        ids: &[i32],
    ) -> ResultEngine<Vec<categories::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = categories::Entity::find()
            .filter(categories::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?;

        if let Some(missing) = ids
            .iter()
            .find(|id| !found.iter().any(|model| model.id == **id))
        {
            return Err(EngineError::UnknownReference(format!(
                "category {missing} not exists"
            )));
        }
        Ok(found)
    }
}
