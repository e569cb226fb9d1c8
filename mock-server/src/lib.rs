use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Body accepted by `POST /posts` and `PUT /posts/{id}`. Any `id` in the body
/// is ignored; the server owns identity.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Db {
    posts: Arc<RwLock<BTreeMap<i64, Post>>>,
    next_id: Arc<AtomicI64>,
}

impl Db {
    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .with_state(Db::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.posts.read().await;
    Json(posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<PostPayload>,
) -> (StatusCode, Json<Post>) {
    let post = Post {
        user_id: input.user_id,
        id: db.assign_id(),
        title: input.title,
        body: input.body,
    };
    tracing::debug!(id = post.id, "created post");
    db.posts.write().await.insert(post.id, post.clone());
    (StatusCode::CREATED, Json(post))
}

/// Not used by the client; lets the router tests read back a single post.
async fn get_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Post>, StatusCode> {
    let posts = db.posts.read().await;
    posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<PostPayload>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.posts.write().await;
    let post = posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.user_id = input.user_id;
    post.title = input.title;
    post.body = input.body;
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut posts = db.posts.write().await;
    posts
        .remove(&id)
        .map(|_| Json(serde_json::json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}
