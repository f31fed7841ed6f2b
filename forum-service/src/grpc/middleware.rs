//! Tower middleware for the gRPC server

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::Instrument;

/// Logs every gRPC call with its method, duration and status
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer;

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for LoggingService<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: http::Request<ReqBody>) -> Self::Future {
        // The clone may not be ready; keep the service that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_string();
        let request_id = req
            .headers()
            .get(super::interceptors::REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let span = tracing::info_span!(
            "grpc_request",
            rpc.service = %extract_service_name(&path),
            rpc.method = %extract_method_name(&path),
            request_id = %request_id,
        );

        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(req).await;
                let duration_ms = start.elapsed().as_millis();

                match &result {
                    Ok(response) => {
                        // Errors are trailers-only responses, so grpc-status
                        // shows up in the headers; a missing one means OK
                        let status = response
                            .headers()
                            .get("grpc-status")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("0");
                        if status == "0" {
                            tracing::info!(duration_ms, grpc.status_code = status, "gRPC request completed");
                        } else {
                            tracing::warn!(duration_ms, grpc.status_code = status, "gRPC request failed");
                        }
                    }
                    Err(_) => {
                        tracing::error!(duration_ms, "gRPC transport error");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Service name from a `/package.Service/Method` path
fn extract_service_name(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|s| s.rsplit('.').next())
        .unwrap_or("unknown")
}

/// Method name from a `/package.Service/Method` path
fn extract_method_name(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .nth(1)
        .unwrap_or("unknown")
}
