//! gRPC server assembly

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tonic::service::interceptor::InterceptedService;
use tonic::transport::Server;

use super::interceptors::request_id_interceptor;
use super::middleware::LoggingLayer;
use super::proto::category::category_service_server::CategoryServiceServer;
use super::proto::comment::comment_service_server::CommentServiceServer;
use super::proto::post::post_service_server::PostServiceServer;
use super::proto::posttag::post_tag_service_server::PostTagServiceServer;
use super::proto::tag::tag_service_server::TagServiceServer;
use super::proto::FILE_DESCRIPTOR_SET;
use super::{CategoryHandler, CommentHandler, PostHandler, PostTagHandler, TagHandler};
use crate::config::GrpcConfig;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// gRPC server builder
///
/// Applies the transport settings from [`GrpcConfig`] and registers the
/// forum services, health and reflection.
#[derive(Debug)]
pub struct GrpcServer {
    config: GrpcConfig,
}

impl GrpcServer {
    pub fn new(config: GrpcConfig) -> Self {
        Self { config }
    }

    /// Tonic server with frame size, request timeout and keepalive applied
    pub fn builder(&self) -> Server {
        Server::builder()
            .max_frame_size(Some(self.frame_size()))
            .timeout(self.config.timeout())
            .tcp_keepalive(Some(Duration::from_secs(60)))
    }

    /// Address the server binds
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.config.listen_addr().parse()?)
    }

    /// HTTP/2 frames are capped at 2^24 - 1 bytes
    fn frame_size(&self) -> u32 {
        u32::try_from(self.config.max_message_size_bytes())
            .unwrap_or(u32::MAX)
            .min((1 << 24) - 1)
    }

    /// Serve every forum service until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, storage: Storage, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.socket_addr()?;
        let max_message = self.config.max_message_size_bytes();

        let health = if self.config.health_check_enabled {
            let (reporter, service) = tonic_health::server::health_reporter();
            reporter
                .set_serving::<CategoryServiceServer<CategoryHandler>>()
                .await;
            reporter.set_serving::<TagServiceServer<TagHandler>>().await;
            reporter.set_serving::<PostServiceServer<PostHandler>>().await;
            reporter
                .set_serving::<CommentServiceServer<CommentHandler>>()
                .await;
            reporter
                .set_serving::<PostTagServiceServer<PostTagHandler>>()
                .await;
            Some(service)
        } else {
            None
        };

        let reflection = if self.config.reflection_enabled {
            let service = tonic_reflection::server::Builder::configure()
                .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
                .build_v1()
                .map_err(|e| Error::Internal(format!("Failed to build reflection service: {}", e)))?;
            Some(service)
        } else {
            None
        };

        let categories = CategoryServiceServer::new(CategoryHandler::new(storage.categories()))
            .max_decoding_message_size(max_message)
            .max_encoding_message_size(max_message);
        let tags = TagServiceServer::new(TagHandler::new(storage.tags()))
            .max_decoding_message_size(max_message)
            .max_encoding_message_size(max_message);
        let posts = PostServiceServer::new(PostHandler::new(storage.posts()))
            .max_decoding_message_size(max_message)
            .max_encoding_message_size(max_message);
        let comments = CommentServiceServer::new(CommentHandler::new(storage.comments()))
            .max_decoding_message_size(max_message)
            .max_encoding_message_size(max_message);
        let post_tags = PostTagServiceServer::new(PostTagHandler::new(storage.post_tags()))
            .max_decoding_message_size(max_message)
            .max_encoding_message_size(max_message);

        tracing::info!(
            %addr,
            health = self.config.health_check_enabled,
            reflection = self.config.reflection_enabled,
            "gRPC server listening"
        );

        self.builder()
            .layer(LoggingLayer)
            .add_optional_service(health)
            .add_optional_service(reflection)
            .add_service(InterceptedService::new(categories, request_id_interceptor))
            .add_service(InterceptedService::new(tags, request_id_interceptor))
            .add_service(InterceptedService::new(posts, request_id_interceptor))
            .add_service(InterceptedService::new(comments, request_id_interceptor))
            .add_service(InterceptedService::new(post_tags, request_id_interceptor))
            .serve_with_shutdown(addr, signal)
            .await?;

        tracing::info!("gRPC server shutdown complete");
        Ok(())
    }
}
