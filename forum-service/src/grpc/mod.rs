//! gRPC surface of the forum service
//!
//! Five tonic services, one per proto package, each a thin translation from
//! protobuf messages to repository calls. Repository errors become gRPC
//! statuses through [`status`].
//!
//! ## Middleware and Interceptors
//!
//! - **Request ID**: [`request_id_interceptor`] runs in front of every service
//! - **Logging**: [`LoggingLayer`] logs method, duration and status per call
//! - **Health**: standard `grpc.health.v1` service via `tonic-health`
//! - **Reflection**: `grpc.reflection.v1` via `tonic-reflection`, optional

use chrono::{DateTime, SecondsFormat, Utc};

pub mod category;
pub mod comment;
pub mod interceptors;
pub mod middleware;
pub mod post;
pub mod post_tag;
pub mod server;
pub mod status;
pub mod tag;

/// Generated protobuf types and service stubs
pub mod proto {
    pub mod category {
        tonic::include_proto!("category");
    }
    pub mod tag {
        tonic::include_proto!("tag");
    }
    pub mod post {
        tonic::include_proto!("post");
    }
    pub mod comment {
        tonic::include_proto!("comment");
    }
    pub mod posttag {
        tonic::include_proto!("posttag");
    }

    /// Encoded descriptors of every service, for reflection
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("forum_descriptor");
}

pub use category::CategoryHandler;
pub use comment::CommentHandler;
pub use interceptors::{request_id_interceptor, RequestIdExtension};
pub use middleware::{LoggingLayer, LoggingService};
pub use post::PostHandler;
pub use post_tag::PostTagHandler;
pub use server::GrpcServer;
pub use tag::TagHandler;

/// Timestamps go over the wire as RFC 3339 in UTC
fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let value = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(timestamp(value), "2024-06-01T12:30:00.000000Z");
    }

    #[test]
    fn test_record_conversion() {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let post = crate::models::Post {
            id: "post_1".into(),
            user_id: "u1".into(),
            title: "Hello".into(),
            body: "World".into(),
            category_id: "cat_1".into(),
            created_at: created,
            updated_at: created,
            deleted_at: 0,
        };
        let message = proto::post::Post::from(post);
        assert_eq!(message.id, "post_1");
        assert_eq!(message.category_id, "cat_1");
        assert_eq!(message.created_at, "2024-06-01T00:00:00.000000Z");
    }

    #[test]
    fn test_descriptor_set_is_embedded() {
        assert!(!proto::FILE_DESCRIPTOR_SET.is_empty());
    }
}
