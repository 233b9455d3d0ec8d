use crudkit::Resource;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Notes;

impl Resource for Notes {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME: &'static str = "note";
}
