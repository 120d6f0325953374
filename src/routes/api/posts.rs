use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use serde::Deserialize;

use crate::service::{PostService, ServiceError};
use crate::types::{PostInput, PostUpdate};

const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

// -------------------- Reads --------------------

#[get("/posts")]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let posts = service.list_posts(query.category.as_deref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/posts/featured")]
pub async fn featured_post(service: web::Data<PostService>) -> Result<HttpResponse> {
    match service.featured_post().await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(ServiceError::NotFound("featured".into()).into()),
    }
}

#[get("/posts/{id}")]
pub async fn get_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.get_post(&id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[get("/posts/{id}/related")]
pub async fn related_posts(
    service: web::Data<PostService>,
    id: web::Path<String>,
    query: web::Query<RelatedQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let posts = service.related_posts(&id, limit).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/categories")]
pub async fn categories(service: web::Data<PostService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.categories().await?))
}

// -------------------- Admin writes --------------------

#[post("/posts")]
pub async fn create_post(
    service: web::Data<PostService>,
    body: web::Json<PostInput>,
) -> Result<HttpResponse> {
    let post = service.create_post(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[put("/posts/{id}")]
pub async fn update_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
    body: web::Json<PostUpdate>,
) -> Result<HttpResponse> {
    let post = service.update_post(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete_post(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/posts/{id}/restore")]
pub async fn restore_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.restore_post(&id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[post("/posts/{id}/featured")]
pub async fn toggle_featured(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let featured = service.toggle_featured(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "featured": featured })))
}
