use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Client, EngineError, NewClient, ResultEngine, clients};

use super::{Engine, normalize_optional_text, normalize_required_text, unique_violation, with_tx};

impl Engine {
    /// Register a new client. Names are unique.
    pub async fn register_client(&self, input: NewClient) -> ResultEngine<Client> {
        let name = normalize_required_text(&input.name, "client name")?;
        let address = normalize_optional_text(input.address.as_deref());

        with_tx!(self, |db_tx| {
            let exists = clients::Entity::find()
                .filter(clients::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::DuplicateName(name));
            }

            let model = clients::ActiveModel {
                name: ActiveValue::Set(name.clone()),
                address: ActiveValue::Set(address),
                ..Default::default()
            }
            .insert(&db_tx)
            .await
            .map_err(|err| unique_violation(err, &name))?;

            tracing::info!(client_id = model.id, "registered client");
            Ok(Client::from(model))
        })
    }

    /// All clients, in insertion order.
    pub async fn list_clients(&self) -> ResultEngine<Vec<Client>> {
        let models = clients::Entity::find()
            .order_by_asc(clients::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Client::from).collect())
    }

    pub async fn client(&self, client_id: i32) -> ResultEngine<Option<Client>> {
        let model = clients::Entity::find_by_id(client_id)
            .one(&self.database)
            .await?;
        Ok(model.map(Client::from))
    }

    pub async fn client_by_name(&self, name: &str) -> ResultEngine<Option<Client>> {
        let model = clients::Entity::find()
            .filter(clients::Column::Name.eq(name.trim()))
            .one(&self.database)
            .await?;
        Ok(model.map(Client::from))
    }
}
