use crudkit::{Resource, traits::find_column};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct People;

impl Resource for People {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME: &'static str = "person";

    // `active` is not sortable
    fn sort_column(name: &str) -> Option<Column> {
        find_column(
            name,
            &[
                ("id", Column::Id),
                ("name", Column::Name),
                ("age", Column::Age),
                ("email", Column::Email),
            ],
        )
    }
}

pub fn person(id: i32, name: &str, age: i32, email: Option<&str>, active: bool) -> Model {
    Model {
        id,
        name: name.to_string(),
        age,
        email: email.map(str::to_string),
        active,
    }
}
