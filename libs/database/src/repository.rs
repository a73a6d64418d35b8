//! Persistence port
//!
//! A [`Repository`] is a unit of work: `add` and `update` only stage changes, and nothing becomes
//! visible to other readers until [`Repository::save_changes`] commits the staged set atomically.
//! A repository dropped with staged changes discards them, so a request that is cancelled midway
//! never leaves a partial mutation behind.
//!
//! ```text
//!   RepositoryFactory ──create()──► Repository (one per request)
//!                                       │  add / update        (staged)
//!                                       │  save_changes        (commit)
//!                                       ▼
//!                                  backing store
//! ```
//!
//! Every adapter hides soft-deleted entities from both `get_by_id` and `list`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::common::{DatabaseError, DatabaseResult};

/// An aggregate with a server-assigned integer identity.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    /// Called once by the adapter when the entity is staged for insertion.
    fn assign_id(&mut self, id: i64);

    fn is_deleted(&self) -> bool {
        false
    }
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Live entity with this id, `None` if absent or soft-deleted.
    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<E>>;

    /// Every live entity, ordered by id.
    async fn list(&self) -> DatabaseResult<Vec<E>>;

    /// Stage an insertion and return the entity carrying its assigned id.
    async fn add(&self, entity: E) -> DatabaseResult<E>;

    /// Stage a modification of an existing entity.
    async fn update(&self, entity: E) -> DatabaseResult<()>;

    /// Commit all staged changes atomically, returning how many were applied.
    async fn save_changes(&self) -> DatabaseResult<usize>;
}

/// Hands out one repository per dispatched request.
pub trait RepositoryFactory<E: Entity>: Send + Sync + 'static {
    type Repository: Repository<E>;

    fn create(&self) -> Self::Repository;
}

#[derive(Debug, Clone)]
enum Change<E> {
    Insert(E),
    Update(E),
}

/// Shared in-memory backing store.
#[derive(Debug, Clone)]
pub struct InMemoryStore<E> {
    rows: Arc<RwLock<BTreeMap<i64, E>>>,
    next_id: Arc<AtomicI64>,
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents, soft-deleted rows included.
    pub async fn all_rows(&self) -> Vec<E> {
        self.rows.read().await.values().cloned().collect()
    }
}

impl<E: Entity> RepositoryFactory<E> for InMemoryStore<E> {
    type Repository = InMemoryRepository<E>;

    fn create(&self) -> Self::Repository {
        InMemoryRepository {
            store: self.clone(),
            pending: Mutex::new(Vec::new()),
        }
    }
}

/// Unit of work over an [`InMemoryStore`].
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    store: InMemoryStore<E>,
    pending: Mutex<Vec<Change<E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub async fn has_pending_changes(&self) -> bool {
        !self.pending.lock().await.is_empty()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<E>> {
        let rows = self.store.rows.read().await;
        Ok(rows.get(&id).filter(|e| !e.is_deleted()).cloned())
    }

    async fn list(&self) -> DatabaseResult<Vec<E>> {
        let rows = self.store.rows.read().await;
        Ok(rows.values().filter(|e| !e.is_deleted()).cloned().collect())
    }

    async fn add(&self, mut entity: E) -> DatabaseResult<E> {
        let id = self.store.next_id.fetch_add(1, Ordering::SeqCst);
        entity.assign_id(id);
        self.pending.lock().await.push(Change::Insert(entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: E) -> DatabaseResult<()> {
        self.pending.lock().await.push(Change::Update(entity));
        Ok(())
    }

    async fn save_changes(&self) -> DatabaseResult<usize> {
        let mut pending = self.pending.lock().await;
        let mut rows = self.store.rows.write().await;

        // Validate the whole batch before touching storage.
        for change in pending.iter() {
            if let Change::Update(entity) = change {
                let staged_insert = pending
                    .iter()
                    .any(|c| matches!(c, Change::Insert(e) if e.id() == entity.id()));
                if !rows.contains_key(&entity.id()) && !staged_insert {
                    return Err(DatabaseError::MissingEntity(entity.id()));
                }
            }
        }

        let applied = pending.len();
        for change in pending.drain(..) {
            let entity = match change {
                Change::Insert(entity) | Change::Update(entity) => entity,
            };
            rows.insert(entity.id(), entity);
        }

        Ok(applied)
    }
}
