//! Post loader middleware - resolves `{id}` to a stored post.

use actix_web::{
    Error, HttpMessage, web,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

use memo_core::DomainError;
use memo_core::domain::Post;
use memo_core::ports::BaseRepository;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Loads the post named by the `{id}` path segment and stores it in the
/// request extensions for downstream middleware and handlers.
///
/// Must wrap a resource whose path declares `{id}`.
pub struct PostLoader;

impl<S, B> Transform<S, ServiceRequest> for PostLoader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = PostLoaderService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PostLoaderService {
            service: Rc::new(service),
        }))
    }
}

pub struct PostLoaderService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PostLoaderService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match load_post(&req).await {
                Ok(post) => {
                    tracing::debug!(post_id = %post.id, "Post loaded");
                    req.extensions_mut().insert(post);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

async fn load_post(req: &ServiceRequest) -> Result<Post, AppError> {
    // Malformed ids never reach the store.
    let id = Post::parse_id(req.match_info().get("id").unwrap_or_default())?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("AppState not configured".to_string()))?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;

    Ok(post)
}
