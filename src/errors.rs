//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 存储层返回带类别的错误，服务层原样透传或在保留类别的前提下改写消息。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - with_message() 方法 - 保留类别替换消息
/// - 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }

            /// 保留错误类别，替换为请求相关的消息
            pub fn with_message<T: Into<String>>(self, msg: T) -> Self {
                match self {
                    $(ClassroomError::$variant(_) => ClassroomError::$variant(msg.into()),)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    NotFound("E001", "Resource Not Found"),
    AlreadyExists("E002", "Resource Already Exists"),
    Forbidden("E003", "Forbidden"),
    Validation("E004", "Validation Error"),
    Unprocessable("E005", "Unprocessable Entity"),
    Authentication("E006", "Authentication Error"),
    Cancelled("E007", "Request Cancelled"),
    DeadlineExceeded("E008", "Deadline Exceeded"),
    DatabaseConfig("E009", "Database Configuration Error"),
    DatabaseConnection("E010", "Database Connection Error"),
    DatabaseOperation("E011", "Database Operation Error"),
    Serialization("E012", "Serialization Error"),
}

impl ClassroomError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClassroomError::NotFound(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

impl ResponseError for ClassroomError {
    fn status_code(&self) -> StatusCode {
        match self {
            ClassroomError::NotFound(_) => StatusCode::NOT_FOUND,
            ClassroomError::AlreadyExists(_) => StatusCode::CONFLICT,
            ClassroomError::Forbidden(_) => StatusCode::FORBIDDEN,
            ClassroomError::Validation(_) => StatusCode::BAD_REQUEST,
            ClassroomError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ClassroomError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ClassroomError::Cancelled(_) => StatusCode::REQUEST_TIMEOUT,
            ClassroomError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            ClassroomError::DatabaseConfig(_)
            | ClassroomError::DatabaseConnection(_)
            | ClassroomError::DatabaseOperation(_)
            | ClassroomError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(status).json(crate::models::ApiResponse::error_empty(
            self.into(),
            self.message(),
        ))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassroomError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassroomError::not_found("test").code(), "E001");
        assert_eq!(ClassroomError::already_exists("test").code(), "E002");
        assert_eq!(ClassroomError::forbidden("test").code(), "E003");
        assert_eq!(ClassroomError::unprocessable("test").code(), "E005");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            ClassroomError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_with_message_keeps_kind() {
        let err = ClassroomError::not_found("class does not exist")
            .with_message("can not find class with id \"abc\"");
        assert!(err.is_not_found());
        assert_eq!(err.message(), "can not find class with id \"abc\"");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ClassroomError::forbidden("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ClassroomError::unprocessable("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ClassroomError::already_exists("x").status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::validation("name is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("name is required"));
    }
}
