use axum::Router;
use axum::http::{Method, StatusCode};
use crudrest::{CrudService, KeyedStore, ResourceConfig, SeaOrmStore};
use serde_json::json;

mod common;
use common::card_entity::{ActiveModel, Entity, Model};
use common::{body_json, send, setup_card_db};

type CardStore = SeaOrmStore<Entity, ActiveModel>;

fn card(id: i64) -> Model {
    Model {
        id,
        amount: 2.5 * f64::from(i32::try_from(id).unwrap()),
        memo: format!("card {id}"),
    }
}

async fn seeded_store() -> CardStore {
    let db = setup_card_db().await.expect("Failed to setup test database");
    let store = CardStore::new(db);
    // Insert out of order to check that pages come back sorted by key
    for id in [3, 1, 10, 2, 5, 4, 9, 6, 8, 7] {
        store.save(card(id)).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_save_inserts_then_updates() {
    let store = seeded_store().await;
    assert_eq!(store.get(&4).await.unwrap(), Some(card(4)));
    assert_eq!(store.get(&40).await.unwrap(), None);

    let mut changed = card(4);
    changed.memo = "changed".to_string();
    store.save(changed.clone()).await.unwrap();
    assert_eq!(store.get(&4).await.unwrap(), Some(changed));
    assert_eq!(store.find_all().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_find_page_is_ordered_by_key() {
    let store = seeded_store().await;
    let page = store.find_page(4, 4).await.unwrap();
    let ids: Vec<i64> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);
    assert_eq!(page.total, 10);
    assert_eq!(page.number, 1);
    assert!(page.has_previous);
    assert!(page.has_next);

    let last = store.find_page(8, 4).await.unwrap();
    assert_eq!(last.items.len(), 2);
    assert!(!last.has_next);
}

#[tokio::test]
async fn test_patch_through_router() {
    let service = CrudService::new(seeded_store().await, ResourceConfig::default());
    let app = Router::new().nest("/transactions", service.router());

    let response = send(
        app.clone(),
        Method::PATCH,
        "/transactions/2",
        Some(r#"{ "memo": "updated stuff" }"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 2, "amount": 5.0, "memo": "updated stuff"})
    );

    let response = send(app, Method::GET, "/transactions?page=2&per_page=4", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["_meta_"]["prev"], "/transactions?page=1&per_page=4");
    assert!(body["_meta_"].get("next").is_none());
}

#[tokio::test]
async fn test_missing_row_is_not_found() {
    let service = CrudService::new(seeded_store().await, ResourceConfig::default());
    let app = Router::new().nest("/transactions", service.router());
    let response = send(app, Method::PATCH, "/transactions/10000", Some("{}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
