//! `posttag.PostTagService`

use tonic::{Request, Response, Status};

use super::interceptors::request_id;
use super::proto::posttag::post_tag_service_server::PostTagService;
use super::proto::posttag::{
    self as pb, CreatePostTagRequest, CreatePostTagResponse, DeletePostTagRequest,
    DeletePostTagResponse, GetAllPostTagsRequest, GetAllPostTagsResponse, GetPostTagRequest,
    GetPostTagResponse, GetPostsByTagRequest, GetPostsByTagResponse,
};
use super::timestamp;
use crate::models::{CreatePostTag, PostTag, PostTagFilter, PostTagKey};
use crate::repository::{PageRequest, PostTagRepository, PostsByTagRepository, Repository};

impl From<PostTag> for pb::PostTag {
    fn from(post_tag: PostTag) -> Self {
        Self {
            post_id: post_tag.post_id,
            tag_id: post_tag.tag_id,
            created_at: timestamp(post_tag.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostTagHandler {
    repo: PostTagRepository,
}

impl PostTagHandler {
    pub fn new(repo: PostTagRepository) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl PostTagService for PostTagHandler {
    async fn create_post_tag(
        &self,
        request: Request<CreatePostTagRequest>,
    ) -> Result<Response<CreatePostTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "CreatePostTag called");
        let req = request.into_inner();

        let post_tag = self
            .repo
            .create(CreatePostTag {
                post_id: req.post_id,
                tag_id: req.tag_id,
            })
            .await?;
        Ok(Response::new(CreatePostTagResponse {
            post_tag: Some(post_tag.into()),
        }))
    }

    async fn get_post_tag(
        &self,
        request: Request<GetPostTagRequest>,
    ) -> Result<Response<GetPostTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetPostTag called");
        let req = request.into_inner();

        let post_tag = self
            .repo
            .get_by_id(&PostTagKey::new(req.post_id, req.tag_id))
            .await?;
        Ok(Response::new(GetPostTagResponse {
            post_tag: Some(post_tag.into()),
        }))
    }

    async fn delete_post_tag(
        &self,
        request: Request<DeletePostTagRequest>,
    ) -> Result<Response<DeletePostTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "DeletePostTag called");
        let req = request.into_inner();

        // Confirmed even when the pair was not stored
        self.repo
            .delete(&PostTagKey::new(req.post_id, req.tag_id))
            .await?;
        Ok(Response::new(DeletePostTagResponse {
            message: "Post_tag association deleted successfully".to_string(),
        }))
    }

    async fn get_all_post_tags(
        &self,
        request: Request<GetAllPostTagsRequest>,
    ) -> Result<Response<GetAllPostTagsResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetAllPostTags called");
        let req = request.into_inner();

        let filter = PostTagFilter {
            post_id: req.post_id,
            tag_id: req.tag_id,
        };
        let post_tags = self
            .repo
            .list(filter, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetAllPostTagsResponse {
            post_tags: post_tags.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_posts_by_tag(
        &self,
        request: Request<GetPostsByTagRequest>,
    ) -> Result<Response<GetPostsByTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetPostsByTag called");
        let req = request.into_inner();

        let posts = self
            .repo
            .posts_by_tag(&req.tag_id, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetPostsByTagResponse {
            posts: posts.into_iter().map(Into::into).collect(),
        }))
    }
}
