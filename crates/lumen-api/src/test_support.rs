//! Fixtures for in-process router tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use lumen_contact::{
    ContactService, FailingSubmissionStore, MemorySubmissionStore, MockMailer, Notifier,
    SubmissionStore,
};
use lumen_content::{Post, PostMeta, PostProvider};
use lumen_core::{Error, Result};
use lumen_vault::{PasskeyRegistry, VaultPasskeys};
use serde_json::Value;
use tower::ServiceExt;

use crate::routes::router;
use crate::state::ApiState;

/// A fixed corpus, newest first.
pub(crate) struct FixedPosts(Vec<PostMeta>);

#[async_trait]
impl PostProvider for FixedPosts {
    async fn list_all(&self) -> Result<Vec<PostMeta>> {
        Ok(self.0.clone())
    }

    async fn get_one(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.0.iter().find(|p| p.slug == slug).map(|meta| Post {
            meta: meta.clone(),
            content: format!("Body of {slug}"),
        }))
    }
}

/// A corpus whose every read fails.
pub(crate) struct BrokenPosts;

#[async_trait]
impl PostProvider for BrokenPosts {
    async fn list_all(&self) -> Result<Vec<PostMeta>> {
        Err(Error::parse("corrupt frontmatter"))
    }

    async fn get_one(&self, _slug: &str) -> Result<Option<Post>> {
        Err(Error::parse("corrupt frontmatter"))
    }
}

fn meta(slug: &str, title: &str, date: &str, author: &str, category: &str, tags: &[&str]) -> PostMeta {
    PostMeta {
        slug: slug.into(),
        title: title.into(),
        description: String::new(),
        date: date.into(),
        author: author.into(),
        category: category.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: None,
        thumbnail: None,
        read_time: None,
    }
}

fn corpus() -> FixedPosts {
    FixedPosts(vec![
        meta("grace-in-code", "Grace in Code", "2024-06-10", "Ana", "Faith", &["prayer", "software"]),
        meta("prayer-app", "Building a Prayer App", "2024-06-01", "Ana", "Faith", &["Prayer", "apps"]),
        meta("rust-at-lumen", "Rust at Lumen", "2024-03-01", "Ben", "Engineering", &["rust", "software"]),
        meta("hiring", "We Are Hiring", "2023-01-15", "Cy", "Company", &[]),
    ])
}

pub(crate) struct TestApp {
    posts: Arc<dyn PostProvider>,
    store_impl: Arc<dyn SubmissionStore>,
    pub store: MemorySubmissionStore,
    pub mailer: MockMailer,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemorySubmissionStore::new();
        Self {
            posts: Arc::new(corpus()),
            store_impl: Arc::new(store.clone()),
            store,
            mailer: MockMailer::new(),
        }
    }

    pub fn with_failing_store() -> Self {
        Self {
            store_impl: Arc::new(FailingSubmissionStore),
            ..Self::new()
        }
    }

    pub fn broken_corpus() -> Self {
        Self {
            posts: Arc::new(BrokenPosts),
            ..Self::new()
        }
    }

    pub fn with_posts(posts: impl PostProvider + 'static) -> Self {
        Self {
            posts: Arc::new(posts),
            ..Self::new()
        }
    }

    pub fn router(&self) -> Router {
        router(self.state())
    }

    pub fn state(&self) -> ApiState {
        let notifier = Notifier::new(Arc::new(self.mailer.clone()), "ops@example.org");
        let contact = ContactService::new(self.store_impl.clone(), notifier);
        let vault = PasskeyRegistry::from_passkeys(&VaultPasskeys {
            investors: Some("INVEST2024".into()),
            talent: Some("TALENT2024".into()),
            community: Some("COMMUNITY2024".into()),
        });
        ApiState::new(self.posts.clone(), contact, vault)
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub(crate) async fn post_json(
    app: Router,
    uri: &str,
    body: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}
