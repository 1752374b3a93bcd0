use crate::errors::ClassroomError;

/// 响应体中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    Conflict = 1009,
    Unprocessable = 1022,
    RequestTimeout = 1008,
    InternalServerError = 5000,

    // 班级相关
    ClassPermissionDenied = 2003,
}

impl From<&ClassroomError> for ErrorCode {
    fn from(err: &ClassroomError) -> Self {
        match err {
            ClassroomError::NotFound(_) => ErrorCode::NotFound,
            ClassroomError::AlreadyExists(_) => ErrorCode::Conflict,
            ClassroomError::Forbidden(_) => ErrorCode::ClassPermissionDenied,
            ClassroomError::Validation(_) => ErrorCode::BadRequest,
            ClassroomError::Unprocessable(_) => ErrorCode::Unprocessable,
            ClassroomError::Authentication(_) => ErrorCode::Unauthorized,
            ClassroomError::Cancelled(_) | ClassroomError::DeadlineExceeded(_) => {
                ErrorCode::RequestTimeout
            }
            ClassroomError::DatabaseConfig(_)
            | ClassroomError::DatabaseConnection(_)
            | ClassroomError::DatabaseOperation(_)
            | ClassroomError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}
