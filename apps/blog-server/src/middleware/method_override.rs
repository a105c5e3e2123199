//! Method override middleware - lets HTML forms issue PUT and DELETE.
//!
//! Browsers only submit GET and POST, so the forms post to
//! `/blogs/{id}?_method=PUT` and this middleware rewrites the method before
//! the router sees the request.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use std::future::{Ready, ready};

use blog_shared::MethodOverrideQuery;

/// Middleware rewriting `POST ?_method=PUT|DELETE` into the named method.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if *req.method() == Method::POST {
            if let Some(method) = overridden_method(req.query_string()) {
                tracing::debug!(method = %method, path = %req.path(), "Overriding request method");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

/// Method named by the `_method` query parameter, if it is one we tunnel.
fn overridden_method(query: &str) -> Option<Method> {
    let query = web::Query::<MethodOverrideQuery>::from_query(query).ok()?;
    let method = query.into_inner().method?;

    match method.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
