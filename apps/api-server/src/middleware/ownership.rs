//! Ownership guard middleware.

use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

use memo_core::DomainError;
use memo_core::domain::Post;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppError;

/// Rejects the request unless the authenticated user wrote the loaded post.
///
/// Needs [`PostLoader`](super::PostLoader) to run first, so register this
/// guard before the loader (actix runs the last `wrap` outermost).
pub struct OwnershipGuard;

impl<S, B> Transform<S, ServiceRequest> for OwnershipGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = OwnershipGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnershipGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct OwnershipGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for OwnershipGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let checked = match req.extract::<Identity>().await {
                Ok(identity) => check_owner(&req, &identity).map_err(Error::from),
                Err(err) => Err(err.into()),
            };

            match checked {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

fn check_owner(req: &ServiceRequest, identity: &Identity) -> Result<(), AppError> {
    let extensions = req.extensions();
    let post = extensions
        .get::<Post>()
        .ok_or_else(|| AppError::Internal("Ownership guard ran without a loaded post".to_string()))?;

    if !post.is_owned_by(identity.user_id) {
        tracing::warn!(
            post_id = %post.id,
            user_id = %identity.user_id,
            "Rejected modification by non-owner"
        );
        return Err(DomainError::Forbidden.into());
    }

    Ok(())
}
