use async_trait::async_trait;
use parking_lot::RwLock;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::traits::KeyedStore;
use crate::core::Resource;
use crate::pagination::Page;

/// In-memory store ordered by identifier.
///
/// Useful for tests and demos. Writes can be made to fail with
/// [`MemoryStore::set_simulate_failure`] to exercise error paths.
pub struct MemoryStore<R: Resource> {
    entities: RwLock<BTreeMap<R::Id, R>>,
    simulate_failure: AtomicBool,
}

impl<R> Default for MemoryStore<R>
where
    R: Resource,
    R::Id: Ord,
{
    fn default() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            simulate_failure: AtomicBool::new(false),
        }
    }
}

impl<R> MemoryStore<R>
where
    R: Resource,
    R::Id: Ord,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entities`; later duplicates win.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = R>) -> Self {
        let store = Self::new();
        {
            let mut map = store.entities.write();
            for entity in entities {
                map.insert(entity.id(), entity);
            }
        }
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Make every subsequent call fail with a `DbErr::Custom` until reset.
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DbErr> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("simulated store failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> KeyedStore<R> for MemoryStore<R>
where
    R: Resource,
    R::Id: Ord,
{
    async fn get(&self, id: &R::Id) -> Result<Option<R>, DbErr> {
        self.check_available()?;
        Ok(self.entities.read().get(id).cloned())
    }

    async fn save(&self, entity: R) -> Result<R, DbErr> {
        self.check_available()?;
        self.entities.write().insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Page<R>, DbErr> {
        self.check_available()?;
        let entities = self.entities.read();
        let total = entities.len() as u64;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let items = entities.values().skip(skip).take(take).cloned().collect();
        Ok(Page::from_slice(items, offset, limit, total))
    }

    async fn find_all(&self) -> Result<Vec<R>, DbErr> {
        self.check_available()?;
        Ok(self.entities.read().values().cloned().collect())
    }
}
