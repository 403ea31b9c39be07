//! Post handlers.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use memo_core::DomainError;
use memo_core::domain::{PageRequest, Post, PostFilter, PostPatch, last_page};
use memo_core::ports::{BaseRepository, PostRepository};
use memo_shared::dto::{ListQuery, PostPayload};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Header carrying the number of listing pages.
pub const LAST_PAGE_HEADER: &str = "Last-Page";

/// A payload that passed validation.
struct ValidPost {
    title: String,
    body: String,
    tags: Option<Vec<String>>,
}

fn validate(document: Value) -> AppResult<ValidPost> {
    match PostPayload::from_json(document) {
        Ok(PostPayload {
            title: Some(title),
            body: Some(body),
            tags,
        }) => Ok(ValidPost { title, body, tags }),
        Ok(payload) => Err(DomainError::Validation {
            fields: payload.violations(),
        }
        .into()),
        Err(fields) => Err(DomainError::Validation { fields }.into()),
    }
}

/// Sanitize a body, rejecting one that had nothing but disallowed markup.
fn clean_body(state: &AppState, body: &str) -> AppResult<String> {
    let cleaned = state.sanitizer.clean(body);
    if cleaned.is_empty() {
        return Err(DomainError::invalid_field("body").into());
    }
    Ok(cleaned)
}

fn page_from_query(raw: Option<&str>) -> Result<PageRequest, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(PageRequest::default()),
        Some(raw) => {
            let number = raw
                .parse::<i64>()
                .map_err(|_| DomainError::invalid_field("page"))?;
            PageRequest::new(number)
        }
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let valid = validate(body.into_inner())?;
    let clean = clean_body(&state, &valid.body)?;

    let post = Post::new(
        valid.title,
        clean,
        valid.tags.unwrap_or_default(),
        identity.as_author(),
    );
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, user_id = %identity.user_id, "Post created");

    Ok(HttpResponse::Ok().json(saved))
}

/// GET /api/posts?page=&tag=&username=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = page_from_query(query.page.as_deref())?;
    let filter = PostFilter::new(query.tag, query.username);

    let (posts, total) = futures::try_join!(
        state.posts.find_page(&filter, page),
        state.posts.count(&filter)
    )?;

    let excerpts: Vec<Post> = posts
        .into_iter()
        .map(|post| Post {
            body: state.sanitizer.excerpt(&post.body),
            ..post
        })
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header((LAST_PAGE_HEADER, last_page(total).to_string()))
        .json(excerpts))
}

/// GET /api/posts/{id} - the post comes from the loader middleware.
pub async fn read(post: web::ReqData<Post>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(post.into_inner()))
}

/// PUT /api/posts/{id}
///
/// The payload is validated as a whole: `title` and `body` are required here
/// just as they are on create.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let id = Post::parse_id(&path.into_inner())?;
    let valid = validate(body.into_inner())?;

    let patch = PostPatch {
        title: Some(valid.title),
        body: Some(clean_body(&state, &valid.body)?),
        tags: valid.tags,
    };

    let post = state
        .posts
        .update(id, patch)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;

    tracing::info!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id} - succeeds whether or not the post still exists.
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = Post::parse_id(&path.into_inner())?;

    let removed = state.posts.delete(id).await?;
    tracing::info!(post_id = %id, removed, "Post delete requested");

    Ok(HttpResponse::NoContent().finish())
}
