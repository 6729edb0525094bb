use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
    QuerySelect, Select,
};
use std::marker::PhantomData;

use super::traits::KeyedStore;
use crate::core::Resource;
use crate::pagination::Page;

/// Keyed store over a sea-orm entity whose `Model` is the exposed resource.
///
/// Paged scans are ordered by primary key.
///
/// ```rust,ignore
/// let store = SeaOrmStore::<card_transaction::Entity, card_transaction::ActiveModel>::new(db.clone());
/// let service = CrudService::new(store, ResourceConfig::default());
/// ```
pub struct SeaOrmStore<E, A> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> (E, A)>,
}

impl<E, A> SeaOrmStore<E, A> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl<E, A> Clone for SeaOrmStore<E, A> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

#[async_trait]
impl<E, A> KeyedStore<E::Model> for SeaOrmStore<E, A>
where
    E: EntityTrait + Sync + 'static,
    E::Model: Resource + IntoActiveModel<A> + Sync,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    <E::Model as Resource>::Id: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    async fn get(&self, id: &<E::Model as Resource>::Id) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id.clone()).one(&self.db).await
    }

    async fn save(&self, entity: E::Model) -> Result<E::Model, DbErr> {
        let exists = E::find_by_id(entity.id()).one(&self.db).await?.is_some();

        // A model converts into an all-`Unchanged` active model; mark every
        // column as set so insert and update write the whole row.
        let mut active: A = entity.into_active_model();
        for column in E::Column::iter() {
            if let ActiveValue::Unchanged(value) = active.get(column) {
                active.set(column, value);
            }
        }

        if exists {
            active.update(&self.db).await
        } else {
            active.insert(&self.db).await
        }
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Page<E::Model>, DbErr> {
        let query = ordered_by_key::<E>();
        let total = query.clone().count(&self.db).await?;
        let items = query.offset(offset).limit(limit).all(&self.db).await?;
        Ok(Page::from_slice(items, offset, limit, total))
    }

    async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        ordered_by_key::<E>().all(&self.db).await
    }
}

fn ordered_by_key<E: EntityTrait>() -> Select<E> {
    E::PrimaryKey::iter().fold(E::find(), |query, key| {
        query.order_by_asc(key.into_column())
    })
}
