// src/errors.rs
use actix_web::{
    dev::ServiceResponse, http::StatusCode, middleware::ErrorHandlerResponse, HttpResponse,
    ResponseError, Result,
};
use log::{error, warn};
use serde::Serialize;

use crate::config::IS_DEV;
use crate::service::ServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub status: &'static str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a str>,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::SaveInProgress(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = self.to_string();

        // Store failures are only described in development.
        let (message, details) = match self {
            ServiceError::Store(_) => {
                error!("store error: {}", detail);
                (
                    "The article store is unavailable, please retry",
                    (*IS_DEV).then_some(detail.as_str()),
                )
            }
            _ => {
                warn!("request rejected: {}", detail);
                (detail.as_str(), None)
            }
        };

        HttpResponse::build(status).json(ErrorBody {
            status: "error",
            message,
            details,
        })
    }
}

// ---------- Error Handlers ----------

pub fn not_found_handler<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>>
where
    B: actix_web::body::MessageBody + 'static,
{
    // Handlers that already produced a JSON error keep their body.
    if res.response().error().is_some() {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let (req, _res) = res.into_parts();
    let path = req.path().to_string();

    let json_response = HttpResponse::NotFound().json(ErrorBody {
        status: "error",
        message: "Not Found",
        details: if *IS_DEV { Some(path.as_str()) } else { None },
    });

    Ok(ErrorHandlerResponse::Response(ServiceResponse::new(
        req,
        json_response.map_into_right_body(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Validation("title is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("a".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::SaveInProgress("a".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ServiceError::Store(StoreError::Unavailable("down".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
