use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mercado_core::domain::{NewUser, User, UserChanges, UserId, UserRecord};
use mercado_core::store::{Collection, DocumentStore};

use super::documents::Documents;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord>;
    /// `None` when no user has ever been stored.
    async fn list(&self) -> Result<Option<Vec<UserRecord>>>;
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>>;
    async fn update(&self, user_id: &UserId, changes: UserChanges) -> Result<Option<UserRecord>>;
    async fn delete(&self, user_id: &UserId) -> Result<bool>;
}

pub struct StoreUserRepository {
    documents: Documents<User>,
}

impl StoreUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: Documents::new(store, Collection::Users),
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord> {
        let user = new_user.register();
        let key = self.documents.insert(&user).await?;

        Ok(UserRecord {
            id: UserId::from(key),
            user,
        })
    }

    async fn list(&self) -> Result<Option<Vec<UserRecord>>> {
        let entries = self.documents.all().await?;
        Ok(entries.map(|entries| {
            entries
                .into_iter()
                .map(|(key, user)| UserRecord {
                    id: UserId::from(key),
                    user,
                })
                .collect()
        }))
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        let user = self.documents.get(user_id.as_str()).await?;
        Ok(user.map(|user| UserRecord {
            id: user_id.clone(),
            user,
        }))
    }

    async fn update(&self, user_id: &UserId, changes: UserChanges) -> Result<Option<UserRecord>> {
        let user = self.documents.merge(user_id.as_str(), &changes).await?;
        Ok(user.map(|user| UserRecord {
            id: user_id.clone(),
            user,
        }))
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool> {
        self.documents.remove(user_id.as_str()).await
    }
}
