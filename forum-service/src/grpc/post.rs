//! `post.PostService`

use tonic::{Request, Response, Status};

use super::interceptors::request_id;
use super::proto::post::post_service_server::PostService;
use super::proto::post::{
    self as pb, CreatePostRequest, CreatePostResponse, DeletePostRequest, DeletePostResponse,
    GetAllPostsRequest, GetAllPostsResponse, GetPostRequest, GetPostResponse, UpdatePostRequest,
    UpdatePostResponse,
};
use super::timestamp;
use crate::models::{CreatePost, Post, PostFilter, UpdatePost};
use crate::repository::{PageRequest, PostRepository, Repository, UpdateRepository};

impl From<Post> for pb::Post {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            body: post.body,
            category_id: post.category_id,
            created_at: timestamp(post.created_at),
            updated_at: timestamp(post.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostHandler {
    repo: PostRepository,
}

impl PostHandler {
    pub fn new(repo: PostRepository) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl PostService for PostHandler {
    async fn create_post(
        &self,
        request: Request<CreatePostRequest>,
    ) -> Result<Response<CreatePostResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "CreatePost called");
        let req = request.into_inner();

        let post = self
            .repo
            .create(CreatePost {
                user_id: req.user_id,
                title: req.title,
                body: req.body,
                category_id: req.category_id,
            })
            .await?;
        Ok(Response::new(CreatePostResponse {
            post: Some(post.into()),
        }))
    }

    async fn get_post(
        &self,
        request: Request<GetPostRequest>,
    ) -> Result<Response<GetPostResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetPost called");
        let req = request.into_inner();

        let post = self.repo.get_by_id(&req.id).await?;
        Ok(Response::new(GetPostResponse {
            post: Some(post.into()),
        }))
    }

    async fn update_post(
        &self,
        request: Request<UpdatePostRequest>,
    ) -> Result<Response<UpdatePostResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "UpdatePost called");
        let req = request.into_inner();

        let post = self
            .repo
            .update(
                &req.id,
                UpdatePost {
                    title: req.title,
                    body: req.body,
                    category_id: req.category_id,
                },
            )
            .await?;
        Ok(Response::new(UpdatePostResponse {
            post: Some(post.into()),
        }))
    }

    async fn delete_post(
        &self,
        request: Request<DeletePostRequest>,
    ) -> Result<Response<DeletePostResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "DeletePost called");
        let req = request.into_inner();

        self.repo.delete(&req.id).await?;
        Ok(Response::new(DeletePostResponse {
            message: "Post soft deleted successfully".to_string(),
        }))
    }

    async fn get_all_posts(
        &self,
        request: Request<GetAllPostsRequest>,
    ) -> Result<Response<GetAllPostsResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetAllPosts called");
        let req = request.into_inner();

        let filter = PostFilter {
            user_id: req.user_id,
            title: req.title,
            body: req.body,
            category_id: req.category_id,
        };
        let posts = self
            .repo
            .list(filter, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetAllPostsResponse {
            posts: posts.into_iter().map(Into::into).collect(),
        }))
    }
}
