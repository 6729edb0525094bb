use axum::{Json, Router, routing::get};
use crudrest::{CrudService, FieldTable, KeyedStore, Resource, ResourceConfig, SeaOrmStore};
use sea_orm::{Database, DatabaseConnection, Schema, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "card_transactions")]
#[serde(default)]
#[schema(as = CardTransaction)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub amount: f64,
    pub memo: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
impl ActiveModelBehavior for ActiveModel {}

impl Resource for Model {
    type Id = i64;
    const RESOURCE_NAME_SINGULAR: &'static str = "CardTransaction";
    const RESOURCE_NAME_PLURAL: &'static str = "transactions";
    const RESOURCE_DESCRIPTION: &'static str = "Card payments with an amount and a memo.";

    fn id(&self) -> i64 {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        crudrest::field_table!(Model { id, amount, memo })
    }
}

type TransactionStore = SeaOrmStore<Entity, ActiveModel>;

async fn seed(store: &TransactionStore) -> Result<(), DbErr> {
    for id in 1..=10 {
        store
            .save(Model {
                id,
                amount: 10.0 * f64::from(i32::try_from(id).unwrap_or_default()),
                memo: format!("transaction {id}"),
            })
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,crudrest=debug")),
        )
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let db: DatabaseConnection = Database::connect(&database_url).await?;
    let backend = db.get_database_backend();
    let mut create = Schema::new(backend).create_table_from_entity(Entity);
    db.execute(backend.build(create.if_not_exists())).await?;

    let store = TransactionStore::new(db);
    seed(&store).await?;

    let config = ResourceConfig::default().with_default_page_size(4);
    let service = CrudService::new(store, config);
    let apidoc = crudrest::openapi::resource_openapi::<Model>("/transactions");

    let app = Router::new()
        .nest("/transactions", service.router())
        .route("/openapi.json", get(move || async move { Json(apidoc) }));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "Serving /transactions and /openapi.json");
    axum::serve(listener, app).await?;
    Ok(())
}
