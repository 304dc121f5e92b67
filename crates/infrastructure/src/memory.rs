use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::{Entity, Repository, RepositoryError};
use tokio::sync::RwLock;

/// In-memory repository for any entity type.
///
/// Entities are cloned in and out, so callers never share mutable state
/// with the store. `find_all` returns entities in insertion order.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    entities: Arc<RwLock<Vec<E>>>,
}

impl<E> InMemoryRepository<E> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        self.entities.write().await.clear();
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + 'static,
{
    async fn create(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut entities = self.entities.write().await;
        if entities.iter().any(|stored| stored.id() == entity.id()) {
            return Err(RepositoryError::already_exists::<E>(entity.id()));
        }
        entities.push(entity.clone());
        tracing::debug!(entity = E::ENTITY_NAME, id = %entity.id(), "Entity created");
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut entities = self.entities.write().await;
        let stored = entities
            .iter_mut()
            .find(|stored| stored.id() == entity.id())
            .ok_or_else(|| RepositoryError::not_found::<E>(entity.id()))?;
        *stored = entity.clone();
        tracing::debug!(entity = E::ENTITY_NAME, id = %entity.id(), "Entity updated");
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<E, RepositoryError> {
        self.entities
            .read()
            .await
            .iter()
            .find(|stored| stored.id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found::<E>(id))
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.entities.read().await.clone())
    }
}
