// src/server/handler.rs
use hyper::{Body, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use tower::Service;
use tracing::error;

use crate::server::content::{ContentError, ContentResolver};

#[derive(Clone)]
pub struct ContentHandler {
    resolver: Arc<ContentResolver>,
}

impl ContentHandler {
    pub fn new(resolver: Arc<ContentResolver>) -> Self {
        Self { resolver }
    }

    async fn respond(resolver: Arc<ContentResolver>, req: Request<Body>) -> Response<Body> {
        let is_head = req.method() == Method::HEAD;
        if req.method() != Method::GET && !is_head {
            return Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .body(Body::from("Method Not Allowed"))
                .unwrap();
        }

        match resolver.resolve(req.uri().path()).await {
            Ok(asset) => {
                let body = if is_head {
                    Body::empty()
                } else {
                    Body::from(asset.bytes)
                };
                Response::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", asset.content_type)
                    .body(body)
                    .unwrap()
            }
            Err(ContentError::NotFound(_)) => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("Not Found"))
                .unwrap(),
            Err(ContentError::Forbidden(_)) => Response::builder()
                .status(StatusCode::FORBIDDEN)
                .body(Body::from("Forbidden"))
                .unwrap(),
            Err(e @ ContentError::Io { .. }) => {
                error!("Content read failed: {}", e);
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            }
        }
    }
}

impl Service<Request<Body>> for ContentHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let resolver = self.resolver.clone();
        Box::pin(async move { Ok(Self::respond(resolver, req).await) })
    }
}
