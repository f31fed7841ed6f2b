//! `comment.CommentService`

use tonic::{Request, Response, Status};

use super::interceptors::request_id;
use super::proto::comment::comment_service_server::CommentService;
use super::proto::comment::{
    self as pb, CreateCommentRequest, CreateCommentResponse, DeleteCommentRequest,
    DeleteCommentResponse, GetAllCommentsRequest, GetAllCommentsResponse, GetCommentRequest,
    GetCommentResponse, UpdateCommentRequest, UpdateCommentResponse,
};
use super::timestamp;
use crate::models::{Comment, CommentFilter, CreateComment, UpdateComment};
use crate::repository::{CommentRepository, PageRequest, Repository, UpdateRepository};

impl From<Comment> for pb::Comment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body,
            created_at: timestamp(comment.created_at),
            updated_at: timestamp(comment.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentHandler {
    repo: CommentRepository,
}

impl CommentHandler {
    pub fn new(repo: CommentRepository) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl CommentService for CommentHandler {
    async fn create_comment(
        &self,
        request: Request<CreateCommentRequest>,
    ) -> Result<Response<CreateCommentResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "CreateComment called");
        let req = request.into_inner();

        let comment = self
            .repo
            .create(CreateComment {
                post_id: req.post_id,
                user_id: req.user_id,
                body: req.body,
            })
            .await?;
        Ok(Response::new(CreateCommentResponse {
            comment: Some(comment.into()),
        }))
    }

    async fn get_comment(
        &self,
        request: Request<GetCommentRequest>,
    ) -> Result<Response<GetCommentResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetComment called");
        let req = request.into_inner();

        let comment = self.repo.get_by_id(&req.id).await?;
        Ok(Response::new(GetCommentResponse {
            comment: Some(comment.into()),
        }))
    }

    async fn update_comment(
        &self,
        request: Request<UpdateCommentRequest>,
    ) -> Result<Response<UpdateCommentResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "UpdateComment called");
        let req = request.into_inner();

        let comment = self
            .repo
            .update(&req.id, UpdateComment { body: req.body })
            .await?;
        Ok(Response::new(UpdateCommentResponse {
            comment: Some(comment.into()),
        }))
    }

    async fn delete_comment(
        &self,
        request: Request<DeleteCommentRequest>,
    ) -> Result<Response<DeleteCommentResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "DeleteComment called");
        let req = request.into_inner();

        self.repo.delete(&req.id).await?;
        Ok(Response::new(DeleteCommentResponse {
            message: "Comment soft deleted successfully".to_string(),
        }))
    }

    async fn get_all_comments(
        &self,
        request: Request<GetAllCommentsRequest>,
    ) -> Result<Response<GetAllCommentsResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetAllComments called");
        let req = request.into_inner();

        let filter = CommentFilter {
            post_id: req.post_id,
            user_id: req.user_id,
        };
        let comments = self
            .repo
            .list(filter, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetAllCommentsResponse {
            comments: comments.into_iter().map(Into::into).collect(),
        }))
    }
}
