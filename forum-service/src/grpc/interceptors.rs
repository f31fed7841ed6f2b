//! gRPC interceptors for cross-cutting concerns

use tonic::metadata::MetadataValue;
use tonic::{Request, Status};

use crate::ids::RequestId;

/// Metadata key carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for handlers
#[derive(Debug, Clone)]
pub struct RequestIdExtension(pub String);

/// Request ID interceptor
///
/// Keeps the caller's `x-request-id` when present, otherwise generates a
/// `req_` TypeID, and exposes it to handlers as a [`RequestIdExtension`].
pub fn request_id_interceptor(mut req: Request<()>) -> Result<Request<()>, Status> {
    let request_id = req
        .metadata()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| RequestId::new().to_string());

    let value = MetadataValue::try_from(request_id.as_str())
        .map_err(|_| Status::internal("Failed to encode request ID"))?;
    req.metadata_mut().insert(REQUEST_ID_HEADER, value);
    req.extensions_mut().insert(RequestIdExtension(request_id));

    Ok(req)
}

/// The request id attached by [`request_id_interceptor`], or `"unknown"`
pub fn request_id<T>(req: &Request<T>) -> &str {
    req.extensions()
        .get::<RequestIdExtension>()
        .map(|ext| ext.0.as_str())
        .unwrap_or("unknown")
}
