//! Authentication boundary: sign-up, sign-in/out and session resolution.

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewUser, ResultEngine, Session, User,
    credentials::{hash_secret, verify_secret},
    sessions, users,
};

use super::{Engine, normalize_required_text, unique_violation, with_tx};

/// Who is behind a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl Engine {
    /// Sign up a new user.
    ///
    /// The password is stored as a salted Argon2id hash.
    pub async fn register_user(&self, input: NewUser) -> ResultEngine<User> {
        let username = normalize_required_text(&input.username, "username")?;
        if input.password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        if input.password != input.password_confirmation {
            return Err(EngineError::InvalidInput(
                "password confirmation does not match".to_string(),
            ));
        }
        let password = hash_secret(&input.password)?;

        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::DuplicateName(username));
            }

            let model = insert_user(&db_tx, &username, password).await?;
            tracing::info!(user_id = model.id, "registered user");
            Ok(User::from(model))
        })
    }

    pub async fn user(&self, user_id: i32) -> ResultEngine<Option<User>> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?;
        Ok(model.map(User::from))
    }

    pub async fn user_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        let model = self.find_user_model(username).await?;
        Ok(model.map(User::from))
    }

    /// Anonymous -> Authenticated.
    ///
    /// Opens a new session bound to the user when the password verifies
    /// against the stored hash. Expired sessions of every user are pruned on
    /// the way.
    pub async fn sign_in(&self, username: &str, password: &str) -> ResultEngine<Session> {
        let Some(model) = self.find_user_model(username).await? else {
            tracing::warn!("sign-in for unknown user");
            return Err(EngineError::UserNotFound(username.trim().to_string()));
        };
        if !verify_secret(password, &model.password)? {
            tracing::warn!(user_id = model.id, "sign-in with wrong password");
            return Err(EngineError::CredentialMismatch);
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        with_tx!(self, |db_tx| {
            let pruned = sessions::Entity::delete_many()
                .filter(sessions::Column::CreatedAt.lte(now - self.session_ttl))
                .exec(&db_tx)
                .await?;
            if pruned.rows_affected > 0 {
                tracing::debug!(pruned = pruned.rows_affected, "expired sessions removed");
            }

            sessions::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                user_id: ActiveValue::Set(model.id),
                created_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;
            Ok::<_, EngineError>(())
        })?;

        tracing::info!(user_id = model.id, "signed in");
        Ok(Session {
            id,
            user: User::from(model),
        })
    }

    /// Authenticated -> Anonymous. Dropping an unknown session is not an
    /// error.
    pub async fn sign_out(&self, session_id: Uuid) -> ResultEngine<()> {
        let res = sessions::Entity::delete_by_id(session_id.to_string())
            .exec(&self.database)
            .await?;
        tracing::debug!(removed = res.rows_affected, "signed out");
        Ok(())
    }

    /// Resolve a session id to the current identity.
    ///
    /// Unknown sessions, expired sessions and sessions whose user no longer
    /// exists resolve to [`Identity::Anonymous`]. An expired session is
    /// deleted.
    pub async fn identity(&self, session_id: Uuid) -> ResultEngine<Identity> {
        let Some((session, user)) = sessions::Entity::find_by_id(session_id.to_string())
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?
        else {
            return Ok(Identity::Anonymous);
        };

        if session.created_at + self.session_ttl <= Utc::now() {
            sessions::Entity::delete_by_id(session.id)
                .exec(&self.database)
                .await?;
            tracing::debug!(user_id = session.user_id, "session expired");
            return Ok(Identity::Anonymous);
        }

        Ok(user.map_or(Identity::Anonymous, |user| {
            Identity::Authenticated(User::from(user))
        }))
    }

    async fn find_user_model(&self, username: &str) -> ResultEngine<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await
            .map_err(Into::into)
    }
}

async fn insert_user(
    db: &DatabaseTransaction,
    username: &str,
    password: String,
) -> ResultEngine<users::Model> {
    users::ActiveModel {
        username: ActiveValue::Set(username.to_string()),
        password: ActiveValue::Set(password),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| unique_violation(err, username))
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;

    #[tokio::test]
    async fn store_rejects_duplicate_username_past_the_pre_check() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let tx = db.begin().await.unwrap();
        insert_user(&tx, "alice", "x".to_string()).await.unwrap();
        tx.commit().await.unwrap();

        let tx = db.begin().await.unwrap();
        let err = insert_user(&tx, "alice", "y".to_string())
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateName("alice".to_string()));
    }

    #[test]
    fn identity_exposes_user_only_when_authenticated() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
        };
        assert_eq!(Identity::Anonymous.user(), None);
        assert!(!Identity::Anonymous.is_authenticated());
        let identity = Identity::Authenticated(user.clone());
        assert_eq!(identity.user(), Some(&user));
        assert!(identity.is_authenticated());
    }
}
