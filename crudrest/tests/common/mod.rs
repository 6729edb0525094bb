#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use crudrest::{CrudService, FieldTable, MemoryStore, Resource, ResourceConfig};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

pub mod card_entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CardTransaction {
    pub id: i64,
    pub amount: f64,
    pub memo: String,
}

impl Resource for CardTransaction {
    type Id = i64;
    const RESOURCE_NAME_SINGULAR: &'static str = "CardTransaction";
    const RESOURCE_NAME_PLURAL: &'static str = "transactions";
    const RESOURCE_DESCRIPTION: &'static str = "Card payments with an amount and a memo.";

    fn id(&self) -> i64 {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        crudrest::field_table!(CardTransaction { id, amount, memo })
    }
}

pub type TransactionService = CrudService<CardTransaction, MemoryStore<CardTransaction>>;

/// Ten transactions with ids 1..=10, amount `id * 10.5`.
pub fn seed_transactions() -> Vec<CardTransaction> {
    (1..=10)
        .map(|id: i32| CardTransaction {
            id: i64::from(id),
            amount: f64::from(id) * 10.5,
            memo: format!("transaction {id}"),
        })
        .collect()
}

pub fn transaction_service(config: ResourceConfig) -> TransactionService {
    CrudService::new(MemoryStore::with_entities(seed_transactions()), config)
}

pub fn setup_app(service: &TransactionService) -> Router {
    Router::new().nest("/transactions", service.router())
}

pub fn setup_test_app() -> Router {
    setup_app(&transaction_service(ResourceConfig::default()))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn setup_card_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(card_entity::Entity)))
        .await?;
    Ok(db)
}
