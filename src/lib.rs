//! # crudkit
//!
//! Generic data-access helpers on top of Sea-ORM:
//!
//! - [`filter`]: field/operation/value filters, parseable from JSON
//! - [`predicate`]: filters resolved against a resource's columns into a
//!   query condition
//! - [`pagination`]: page requests and flattened page responses
//! - [`repository`] and [`service`]: generic CRUD facades
//! - [`validation`]: field presence checks and a validator registry
//!
//! A resource is described once through [`Resource`]; everything else is
//! generic over it.
//!
//! ```rust,ignore
//! use crudkit::{QueryFilter, Resource, SeaRepository, Repository, build_predicate, make_page_request};
//!
//! let repo = SeaRepository::<People>::new(db);
//! let predicate = build_predicate::<People>(&[QueryFilter::greater_than("age", 30)])?;
//! let page = repo
//!     .find_page_by_predicate(&predicate, &make_page_request(0, 10, "name", "desc"))
//!     .await?;
//! ```

pub mod errors;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod predicate;
pub mod repository;
pub mod service;
pub mod traits;
pub mod validation;

pub use errors::{ApiError, DataError, FilterError};
pub use filter::{FilterValue, Operation, QueryFilter, parse_filters};
pub use models::{DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, ListQuery};
pub use pagination::{
    Page, PageRequest, PaginationResponse, SortDirection, make_page_request, shape_response,
};
pub use predicate::{Clause, Predicate, build_predicate};
pub use repository::{Repository, SeaRepository};
pub use service::{CrudService, Service};
pub use traits::Resource;
pub use validation::{FieldValues, ValidationError, ValidationErrors, ValidatorRegistry, is_valid};
