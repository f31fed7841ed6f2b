//! `tag.TagService`

use tonic::{Request, Response, Status};

use super::interceptors::request_id;
use super::proto::tag::tag_service_server::TagService;
use super::proto::tag::{
    self as pb, CreateTagRequest, CreateTagResponse, DeleteTagRequest, DeleteTagResponse,
    GetAllTagsRequest, GetAllTagsResponse, GetFamousTagsRequest, GetFamousTagsResponse,
    GetTagRequest, GetTagResponse, UpdateTagRequest, UpdateTagResponse,
};
use super::timestamp;
use crate::models::{CreateTag, FamousTag, Tag, TagFilter, UpdateTag};
use crate::repository::{
    FamousTagRepository, PageRequest, Repository, TagRepository, UpdateRepository,
};

impl From<Tag> for pb::Tag {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_at: timestamp(tag.created_at),
            updated_at: timestamp(tag.updated_at),
        }
    }
}

impl From<FamousTag> for pb::FamousTag {
    fn from(tag: FamousTag) -> Self {
        Self {
            name: tag.name,
            count: tag.count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagHandler {
    repo: TagRepository,
}

impl TagHandler {
    pub fn new(repo: TagRepository) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl TagService for TagHandler {
    async fn create_tag(
        &self,
        request: Request<CreateTagRequest>,
    ) -> Result<Response<CreateTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "CreateTag called");
        let req = request.into_inner();

        let tag = self.repo.create(CreateTag { name: req.name }).await?;
        Ok(Response::new(CreateTagResponse {
            tag: Some(tag.into()),
        }))
    }

    async fn get_tag(
        &self,
        request: Request<GetTagRequest>,
    ) -> Result<Response<GetTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetTag called");
        let req = request.into_inner();

        let tag = self.repo.get_by_id(&req.id).await?;
        Ok(Response::new(GetTagResponse {
            tag: Some(tag.into()),
        }))
    }

    async fn update_tag(
        &self,
        request: Request<UpdateTagRequest>,
    ) -> Result<Response<UpdateTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "UpdateTag called");
        let req = request.into_inner();

        let tag = self.repo.update(&req.id, UpdateTag { name: req.name }).await?;
        Ok(Response::new(UpdateTagResponse {
            tag: Some(tag.into()),
        }))
    }

    async fn delete_tag(
        &self,
        request: Request<DeleteTagRequest>,
    ) -> Result<Response<DeleteTagResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "DeleteTag called");
        let req = request.into_inner();

        self.repo.delete(&req.id).await?;
        Ok(Response::new(DeleteTagResponse {
            message: "Tag soft deleted successfully".to_string(),
        }))
    }

    async fn get_all_tags(
        &self,
        request: Request<GetAllTagsRequest>,
    ) -> Result<Response<GetAllTagsResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetAllTags called");
        let req = request.into_inner();

        let tags = self
            .repo
            .list(TagFilter { name: req.name }, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetAllTagsResponse {
            tags: tags.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_famous_tags(
        &self,
        request: Request<GetFamousTagsRequest>,
    ) -> Result<Response<GetFamousTagsResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetFamousTags called");
        let req = request.into_inner();

        let tags = self
            .repo
            .famous_tags(req.name, req.desc, PageRequest::new(req.page, req.limit))
            .await?;
        Ok(Response::new(GetFamousTagsResponse {
            tags: tags.into_iter().map(Into::into).collect(),
        }))
    }
}
