//! Resource descriptors.
//!
//! A [`Resource`] ties an entity to the names filters and sort fields may
//! use. Names resolve through the entity's generated `FromStr` by default,
//! so every column is addressable by its database name (or camelCase form)
//! unless the resource narrows the set.

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, PrimaryKeyTrait};

/// Column type of a resource's entity.
pub type ColumnOf<R> = <<R as Resource>::Entity as EntityTrait>::Column;

/// Row type of a resource's entity.
pub type ModelOf<R> = <<R as Resource>::Entity as EntityTrait>::Model;

/// Primary key value type of a resource's entity.
pub type IdOf<R> =
    <<<R as Resource>::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Describes one persisted entity type to the repository and the predicate
/// builder.
///
/// Filters and sort fields are resolved by name through
/// [`filter_column`](Resource::filter_column) and
/// [`sort_column`](Resource::sort_column), never by reflection.
///
/// ```rust,ignore
/// pub struct People;
///
/// impl Resource for People {
///     type Entity = person::Entity;
///     type ActiveModel = person::ActiveModel;
///
///     const ID_COLUMN: person::Column = person::Column::Id;
///     const RESOURCE_NAME: &'static str = "person";
///
///     fn sort_column(name: &str) -> Option<person::Column> {
///         find_column(name, &[("name", person::Column::Name), ("age", person::Column::Age)])
///     }
/// }
/// ```
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync;

    /// Primary key column, also the fallback sort column.
    const ID_COLUMN: ColumnOf<Self>;
    /// Singular name used in log fields and not-found messages.
    const RESOURCE_NAME: &'static str;

    /// Column a filter field names. Defaults to any column of the entity.
    #[must_use]
    fn filter_column(name: &str) -> Option<ColumnOf<Self>> {
        name.parse().ok()
    }

    /// Column a page request may sort by. Defaults to any column.
    #[must_use]
    fn sort_column(name: &str) -> Option<ColumnOf<Self>> {
        name.parse().ok()
    }
}

/// Look a column up by name in an explicit list.
#[must_use]
pub fn find_column<C: Copy>(name: &str, columns: &[(&str, C)]) -> Option<C> {
    columns
        .iter()
        .find(|&&(column_name, _)| column_name == name)
        .map(|&(_, column)| column)
}
