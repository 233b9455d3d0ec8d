#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use crudkit::{
    ApiError, CrudService, ListQuery, PaginationResponse, Resource, SeaRepository, Service,
    ValidatorRegistry, build_predicate,
};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, IntoActiveModel};
use sea_orm_migration::prelude::*;

pub mod note_entity;
pub mod person_entity;

use person_entity::People;

pub type PeopleService = CrudService<SeaRepository<People>>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Insert rows directly, bypassing the repository under test.
pub async fn seed(db: &DatabaseConnection, people: &[person_entity::Model]) {
    for person in people {
        person
            .clone()
            .into_active_model()
            .reset_all()
            .insert(db)
            .await
            .expect("Failed to seed person");
    }
}

/// Five people covering every column shape.
pub fn sample_people() -> Vec<person_entity::Model> {
    use person_entity::person;
    vec![
        person(1, "Anna", 20, Some("anna@example.com"), true),
        person(2, "band", 30, None, false),
        person(3, "Carl", 40, Some("carl@example.com"), true),
        person(4, "Dan", 35, None, true),
        person(5, "Eve", 25, Some("eve_1@example.com"), false),
    ]
}

pub fn person_rules() -> ValidatorRegistry {
    ValidatorRegistry::new().require("name")
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let service = PeopleService::new(SeaRepository::new(db));

    let api = Router::new()
        .route("/people", get(get_all_handler).post(create_one_handler))
        .route(
            "/people/{id}",
            get(get_one_handler).delete(delete_one_handler),
        )
        .with_state(service);

    Router::new().nest("/api/v1", api)
}

async fn get_all_handler(
    State(service): State<PeopleService>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PaginationResponse<person_entity::Model>>, ApiError> {
    let predicate = build_predicate::<People>(&query.filters()?)?;
    let page = service.find_page(&predicate, &query.page_request()).await?;
    Ok(Json(page))
}

async fn get_one_handler(
    State(service): State<PeopleService>,
    Path(id): Path<i32>,
) -> Result<Json<person_entity::Model>, ApiError> {
    service
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(People::RESOURCE_NAME))
}

async fn create_one_handler(
    State(service): State<PeopleService>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<person_entity::Model>), ApiError> {
    person_rules().validate(&payload)?;
    let person: person_entity::Model =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let saved = service.save(person).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn delete_one_handler(
    State(service): State<PeopleService>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreatePeopleTable), Box::new(CreateNotesTable)]
    }
}

pub struct CreatePeopleTable;

#[async_trait::async_trait]
impl MigrationName for CreatePeopleTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_people_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePeopleTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PeopleTable)
            .if_not_exists()
            .col(
                ColumnDef::new(PeopleColumn::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(PeopleColumn::Name).string().not_null())
            .col(ColumnDef::new(PeopleColumn::Age).integer().not_null())
            .col(ColumnDef::new(PeopleColumn::Email).string().null())
            .col(
                ColumnDef::new(PeopleColumn::Active)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PeopleTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum PeopleColumn {
    Id,
    Name,
    Age,
    Email,
    Active,
}

impl Iden for PeopleColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Age => "age",
                Self::Email => "email",
                Self::Active => "active",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PeopleTable;

impl Iden for PeopleTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "people").unwrap();
    }
}

pub struct CreateNotesTable;

#[async_trait::async_trait]
impl MigrationName for CreateNotesTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_notes_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateNotesTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(NotesTable)
            .if_not_exists()
            .col(
                ColumnDef::new(NotesColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(NotesColumn::Body).string().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotesTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum NotesColumn {
    Id,
    Body,
}

impl Iden for NotesColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Body => "body",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct NotesTable;

impl Iden for NotesTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "notes").unwrap();
    }
}
