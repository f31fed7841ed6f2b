//! `category.CategoryService`

use tonic::{Request, Response, Status};

use super::interceptors::request_id;
use super::proto::category::category_service_server::CategoryService;
use super::proto::category::{
    self as pb, CreateCategoryRequest, CreateCategoryResponse, DeleteCategoryRequest,
    DeleteCategoryResponse, GetAllCategoriesRequest, GetAllCategoriesResponse, GetCategoryRequest,
    GetCategoryResponse, UpdateCategoryRequest, UpdateCategoryResponse,
};
use super::timestamp;
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::{CategoryRepository, PageRequest, Repository, UpdateRepository};

impl From<Category> for pb::Category {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: timestamp(category.created_at),
            updated_at: timestamp(category.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryHandler {
    repo: CategoryRepository,
}

impl CategoryHandler {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl CategoryService for CategoryHandler {
    async fn create_category(
        &self,
        request: Request<CreateCategoryRequest>,
    ) -> Result<Response<CreateCategoryResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "CreateCategory called");
        let req = request.into_inner();

        let category = self.repo.create(CreateCategory { name: req.name }).await?;
        Ok(Response::new(CreateCategoryResponse {
            category: Some(category.into()),
        }))
    }

    async fn get_category(
        &self,
        request: Request<GetCategoryRequest>,
    ) -> Result<Response<GetCategoryResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetCategory called");
        let req = request.into_inner();

        let category = self.repo.get_by_id(&req.id).await?;
        Ok(Response::new(GetCategoryResponse {
            category: Some(category.into()),
        }))
    }

    async fn update_category(
        &self,
        request: Request<UpdateCategoryRequest>,
    ) -> Result<Response<UpdateCategoryResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "UpdateCategory called");
        let req = request.into_inner();

        let category = self
            .repo
            .update(&req.id, UpdateCategory { name: req.name })
            .await?;
        Ok(Response::new(UpdateCategoryResponse {
            category: Some(category.into()),
        }))
    }

    async fn delete_category(
        &self,
        request: Request<DeleteCategoryRequest>,
    ) -> Result<Response<DeleteCategoryResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "DeleteCategory called");
        let req = request.into_inner();

        self.repo.delete(&req.id).await?;
        Ok(Response::new(DeleteCategoryResponse {
            message: "Category soft deleted successfully".to_string(),
        }))
    }

    async fn get_all_categories(
        &self,
        request: Request<GetAllCategoriesRequest>,
    ) -> Result<Response<GetAllCategoriesResponse>, Status> {
        tracing::info!(request_id = %request_id(&request), "GetAllCategories called");
        let req = request.into_inner();

        let categories = self
            .repo
            .list(
                CategoryFilter { name: req.name },
                PageRequest::new(req.page, req.limit),
            )
            .await?;
        Ok(Response::new(GetAllCategoriesResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        }))
    }
}
