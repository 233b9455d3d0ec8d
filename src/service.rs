//! Service facade.
//!
//! A [`Service`] owns a repository and forwards every call to it unchanged.
//! Implementors add business rules by overriding individual methods; the
//! defaults keep the plain CRUD surface working.

use async_trait::async_trait;

use crate::errors::DataError;
use crate::pagination::{Page, PageRequest, PaginationResponse, shape_response};
use crate::predicate::Predicate;
use crate::repository::Repository;

/// Column type of a service's repository.
pub type ServiceColumn<S, T, ID> =
    <<S as Service<T, ID>>::Repository as Repository<T, ID>>::Column;

#[async_trait]
pub trait Service<T, ID>: Send + Sync
where
    T: Send + 'static,
    ID: Send + 'static,
{
    type Repository: Repository<T, ID>;

    fn repository(&self) -> &Self::Repository;

    async fn save(&self, entity: T) -> Result<T, DataError> {
        self.repository().save(entity).await
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DataError> {
        self.repository().find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<T>, DataError> {
        self.repository().find_all().await
    }

    async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<T>, DataError> {
        self.repository().find_all_paged(request).await
    }

    async fn delete_by_id(&self, id: ID) -> Result<(), DataError> {
        self.repository().delete_by_id(id).await
    }

    async fn find_all_by_predicate(
        &self,
        predicate: &Predicate<ServiceColumn<Self, T, ID>>,
    ) -> Result<Vec<T>, DataError> {
        self.repository().find_all_by_predicate(predicate).await
    }

    async fn count_by_predicate(
        &self,
        predicate: &Predicate<ServiceColumn<Self, T, ID>>,
    ) -> Result<u64, DataError> {
        self.repository().count_by_predicate(predicate).await
    }

    /// Fetch one page of matches, already shaped for the caller.
    async fn find_page(
        &self,
        predicate: &Predicate<ServiceColumn<Self, T, ID>>,
        request: &PageRequest,
    ) -> Result<PaginationResponse<T>, DataError> {
        let page = self
            .repository()
            .find_page_by_predicate(predicate, request)
            .await?;
        Ok(shape_response(page))
    }
}

/// Service with no behaviour of its own.
#[derive(Debug, Clone)]
pub struct CrudService<Repo> {
    repository: Repo,
}

impl<Repo> CrudService<Repo> {
    #[must_use]
    pub const fn new(repository: Repo) -> Self {
        Self { repository }
    }

    #[must_use]
    pub fn into_inner(self) -> Repo {
        self.repository
    }
}

impl<T, ID, Repo> Service<T, ID> for CrudService<Repo>
where
    T: Send + 'static,
    ID: Send + 'static,
    Repo: Repository<T, ID>,
{
    type Repository = Repo;

    fn repository(&self) -> &Repo {
        &self.repository
    }
}
