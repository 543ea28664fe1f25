//! In-memory `CatalogStore` and request helpers shared by the router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use cat_catalog::{app, AppError, AppState, Breed, BreedData, Cat, CatData, CatalogStore, WriteOutcome};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Clone)]
struct CatRecord {
    color: String,
    age_in_months: i32,
    description: Option<String>,
    breed_id: i32,
}

#[derive(Default)]
struct Tables {
    breeds: BTreeMap<i32, String>,
    cats: BTreeMap<i32, CatRecord>,
    next_breed_id: i32,
    next_cat_id: i32,
}

impl Tables {
    fn join(&self, id: i32, rec: &CatRecord) -> Cat {
        Cat {
            id,
            color: rec.color.clone(),
            age_in_months: rec.age_in_months,
            description: rec.description.clone(),
            breed: Breed {
                id: rec.breed_id,
                name: self.breeds.get(&rec.breed_id).cloned().unwrap_or_default(),
            },
        }
    }
}

/// Mirrors the PostgreSQL store: serial ids, breed foreign key, ordered by id.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn cat_count(&self) -> usize {
        self.tables.lock().unwrap().cats.len()
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn foreign_key_violation(breed_id: i32) -> AppError {
    AppError::Db(sqlx::Error::Protocol(format!(
        "insert or update on table \"cat\" violates foreign key constraint (breed_id={})",
        breed_id
    )))
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, AppError> {
        self.check_online()?;
        let t = self.tables.lock().unwrap();
        Ok(t.cats.iter().map(|(id, rec)| t.join(*id, rec)).collect())
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, AppError> {
        self.check_online()?;
        let t = self.tables.lock().unwrap();
        Ok(t.breeds
            .iter()
            .map(|(id, name)| Breed {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn list_cats_by_breed(&self, breed_name: &str) -> Result<Vec<Cat>, AppError> {
        self.check_online()?;
        let t = self.tables.lock().unwrap();
        Ok(t.cats
            .iter()
            .filter(|(_, rec)| t.breeds.get(&rec.breed_id).map(String::as_str) == Some(breed_name))
            .map(|(id, rec)| t.join(*id, rec))
            .collect())
    }

    async fn get_cat(&self, cat_id: i32) -> Result<Option<Cat>, AppError> {
        self.check_online()?;
        let t = self.tables.lock().unwrap();
        Ok(t.cats.get(&cat_id).map(|rec| t.join(cat_id, rec)))
    }

    async fn insert_cat(&self, data: &CatData) -> Result<i32, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        if !t.breeds.contains_key(&data.breed_id) {
            return Err(foreign_key_violation(data.breed_id));
        }
        t.next_cat_id += 1;
        let id = t.next_cat_id;
        t.cats.insert(
            id,
            CatRecord {
                color: data.color.clone(),
                age_in_months: data.age_in_months,
                description: data.description.clone(),
                breed_id: data.breed_id,
            },
        );
        Ok(id)
    }

    async fn update_cat(&self, cat_id: i32, data: &CatData) -> Result<WriteOutcome, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        if !t.cats.contains_key(&cat_id) {
            return Ok(WriteOutcome::NotFound);
        }
        if !t.breeds.contains_key(&data.breed_id) {
            return Err(foreign_key_violation(data.breed_id));
        }
        t.cats.insert(
            cat_id,
            CatRecord {
                color: data.color.clone(),
                age_in_months: data.age_in_months,
                description: data.description.clone(),
                breed_id: data.breed_id,
            },
        );
        Ok(WriteOutcome::Applied)
    }

    async fn delete_cat(&self, cat_id: i32) -> Result<WriteOutcome, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        Ok(match t.cats.remove(&cat_id) {
            Some(_) => WriteOutcome::Applied,
            None => WriteOutcome::NotFound,
        })
    }

    async fn insert_breed(&self, data: &BreedData) -> Result<Breed, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        t.next_breed_id += 1;
        let id = t.next_breed_id;
        t.breeds.insert(id, data.name.clone());
        Ok(Breed {
            id,
            name: data.name.clone(),
        })
    }
}

pub const BREED_NAME: &str = "Британский вислоухий";

/// Empty store behind the full router with the default `/api` prefix.
pub fn empty_app() -> (Arc<MemoryStore>, Router) {
    let store = MemoryStore::new();
    let router = app(AppState::new(store.clone()), "/api");
    (store, router)
}

/// One breed ("Британский вислоухий", id 1) and one cat (Красный, 10 months, id 1).
pub async fn seeded_app() -> (Arc<MemoryStore>, Router) {
    let (store, router) = empty_app();
    let breed = store
        .insert_breed(&BreedData {
            name: BREED_NAME.to_string(),
        })
        .await
        .unwrap();
    store
        .insert_cat(&CatData {
            color: "Красный".to_string(),
            age_in_months: 10,
            description: None,
            breed_id: breed.id,
        })
        .await
        .unwrap();
    (store, router)
}

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::new();
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap_or_else(|err| panic!("failed to build request: {err}")),
        None => builder
            .body(Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}")),
    };
    let response = match router.clone().oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    };
    let status = response.status();
    let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read response body: {err}"),
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
