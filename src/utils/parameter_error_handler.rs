use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError};

use crate::errors::ClassroomError;

/// JSON 请求体解析失败时返回统一的校验错误
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("JSON payload rejected: {}", err);
    ClassroomError::validation(format!("invalid request body: {err}")).into()
}

/// 查询参数解析失败时返回统一的校验错误
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Query string rejected: {}", err);
    ClassroomError::validation(format!("invalid query parameters: {err}")).into()
}
