//! # Repository facade
//!
//! [`Repository`] is the generic CRUD + predicate query surface for one
//! entity type. [`SeaRepository`] implements it for any [`Resource`] on a
//! Sea-ORM [`DatabaseConnection`]; transactions, isolation and retries stay
//! with the engine.
//!
//! ```rust,ignore
//! let repo = SeaRepository::<People>::new(db.clone());
//! let saved = repo.save(person).await?;
//! let adults = repo
//!     .find_all_by_predicate(&build_predicate::<People>(&[QueryFilter::greater_than("age", 17)])?)
//!     .await?;
//! ```

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IdenStatic, IntoActiveModel, Order,
    PaginatorTrait, PrimaryKeyTrait, QueryFilter as _, QueryOrder, QuerySelect,
};
use std::marker::PhantomData;

use crate::errors::DataError;
use crate::pagination::{Page, PageRequest};
use crate::predicate::Predicate;
use crate::traits::{ColumnOf, IdOf, ModelOf, Resource};

/// Generic repository over entity type `T` identified by `ID`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + 'static,
    ID: Send + 'static,
{
    /// Column type predicates for this repository are built over.
    type Column: Send + Sync;

    /// Insert the entity, or update it when its identifier already exists.
    ///
    /// Identifiers are assigned by the caller. For an auto-increment
    /// primary key the database assigns one on insert, and the returned
    /// entity carries it.
    async fn save(&self, entity: T) -> Result<T, DataError>;

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DataError>;

    async fn find_all(&self) -> Result<Vec<T>, DataError>;

    async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<T>, DataError> {
        self.find_page_by_predicate(&Predicate::all(), request).await
    }

    /// Delete by identifier. A missing identifier is an error
    /// (`DbErr::RecordNotFound`).
    async fn delete_by_id(&self, id: ID) -> Result<(), DataError>;

    async fn find_all_by_predicate(
        &self,
        predicate: &Predicate<Self::Column>,
    ) -> Result<Vec<T>, DataError>;

    async fn find_page_by_predicate(
        &self,
        predicate: &Predicate<Self::Column>,
        request: &PageRequest,
    ) -> Result<Page<T>, DataError>;

    async fn count_by_predicate(&self, predicate: &Predicate<Self::Column>)
    -> Result<u64, DataError>;
}

/// [`Repository`] backed by a Sea-ORM connection.
pub struct SeaRepository<R> {
    db: DatabaseConnection,
    _marker: PhantomData<R>,
}

impl<R: Resource> SeaRepository<R> {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Resolve a sort field, falling back to the id column.
    fn resolve_sort_column(field: &str) -> ColumnOf<R> {
        R::sort_column(field).unwrap_or_else(|| {
            tracing::warn!(
                resource = R::RESOURCE_NAME,
                sort_field = field,
                "Unknown sort field, sorting by id"
            );
            R::ID_COLUMN
        })
    }
}

impl<R> Clone for SeaRepository<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R> Repository<ModelOf<R>, IdOf<R>> for SeaRepository<R>
where
    R: Resource,
    ModelOf<R>: IntoActiveModel<R::ActiveModel> + Sync + 'static,
    IdOf<R>: 'static,
{
    type Column = ColumnOf<R>;

    async fn save(&self, entity: ModelOf<R>) -> Result<ModelOf<R>, DataError> {
        let mut active = entity.into_active_model().reset_all();
        match active.clone().update(&self.db).await {
            Ok(updated) => Ok(updated),
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(resource = R::RESOURCE_NAME, "No existing row, inserting");
                if <<R::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::auto_increment() {
                    active.not_set(R::ID_COLUMN);
                }
                Ok(active.insert(&self.db).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: IdOf<R>) -> Result<Option<ModelOf<R>>, DataError> {
        Ok(R::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<ModelOf<R>>, DataError> {
        Ok(R::Entity::find().all(&self.db).await?)
    }

    async fn delete_by_id(&self, id: IdOf<R>) -> Result<(), DataError> {
        let res = R::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("{} not found", R::RESOURCE_NAME)).into());
        }
        tracing::debug!(resource = R::RESOURCE_NAME, "Deleted row");
        Ok(())
    }

    async fn find_all_by_predicate(
        &self,
        predicate: &Predicate<ColumnOf<R>>,
    ) -> Result<Vec<ModelOf<R>>, DataError> {
        tracing::debug!(
            resource = R::RESOURCE_NAME,
            clauses = predicate.len(),
            "Finding by predicate"
        );
        Ok(R::Entity::find()
            .filter(predicate.clone())
            .all(&self.db)
            .await?)
    }

    async fn find_page_by_predicate(
        &self,
        predicate: &Predicate<ColumnOf<R>>,
        request: &PageRequest,
    ) -> Result<Page<ModelOf<R>>, DataError> {
        let query = R::Entity::find().filter(predicate.clone());
        let total = PaginatorTrait::count(query.clone(), &self.db).await?;

        let sort_column = Self::resolve_sort_column(&request.sort_field);
        let mut query = query.order_by(sort_column, Order::from(request.sort_direction));
        if sort_column.as_str() != R::ID_COLUMN.as_str() {
            // stable pages when the sort column has duplicates
            query = query.order_by(R::ID_COLUMN, Order::Asc);
        }

        let content = query
            .offset(request.offset())
            .limit(request.page_size)
            .all(&self.db)
            .await?;

        tracing::debug!(
            resource = R::RESOURCE_NAME,
            page = request.page_index,
            size = request.page_size,
            total,
            "Fetched page"
        );
        Ok(Page::new(content, request, total))
    }

    async fn count_by_predicate(
        &self,
        predicate: &Predicate<ColumnOf<R>>,
    ) -> Result<u64, DataError> {
        let query = R::Entity::find().filter(predicate.clone());
        Ok(PaginatorTrait::count(query, &self.db).await?)
    }
}
