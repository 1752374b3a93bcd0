//! 请求字段校验
//!
//! 校验只做纯计算，不触碰存储，失败统一返回 `Validation` 错误。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ClassroomError, Result};
use crate::models::class_schedules::requests::CreateScheduleRequest;
use crate::models::class_tasks::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9][a-z0-9.]*[a-z0-9]$").expect("Invalid username regex")
});

pub const USERNAME_MAX: usize = 20;
pub const USER_NAME_MAX: usize = 32;
pub const EMAIL_MAX: usize = 254;
pub const CLASS_NAME_MAX: usize = 20;
pub const CLASS_DESCRIPTION_MAX: usize = 255;
pub const TASK_NAME_MAX: usize = 20;
pub const TASK_DESCRIPTION_MAX: usize = 1024;
pub const SCHEDULE_NAME_MAX: usize = 20;
pub const SECONDS_PER_DAY: i32 = 86_400;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn rule_failed(field: &str, rule: &str) -> ClassroomError {
    ClassroomError::validation(format!(
        "failed to validate \"{field}\", because \"{rule}\" rule"
    ))
}

fn check_required(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(rule_failed(field, "required"));
    }
    Ok(())
}

// 局部更新中空字符串视为未修改
fn patch_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn check_max(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(rule_failed(field, &format!("max={max}")));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.len() > USERNAME_MAX || !USERNAME_RE.is_match(username) {
        return Err(rule_failed("username", "username"));
    }
    Ok(())
}

pub fn validate_day(day: i16) -> Result<()> {
    if !(0..=6).contains(&day) {
        return Err(rule_failed("day", "min=0,max=6"));
    }
    Ok(())
}

impl Validate for CreateClassRequest {
    fn validate(&self) -> Result<()> {
        check_required("name", &self.name)?;
        check_max("name", &self.name, CLASS_NAME_MAX)?;
        if let Some(description) = &self.description {
            check_max("description", description, CLASS_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

impl Validate for UpdateClassRequest {
    fn validate(&self) -> Result<()> {
        if let Some(name) = patch_value(&self.name) {
            check_max("name", name, CLASS_NAME_MAX)?;
        }
        if let Some(description) = patch_value(&self.description) {
            check_max("description", description, CLASS_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

impl Validate for CreateTaskRequest {
    fn validate(&self) -> Result<()> {
        check_required("name", &self.name)?;
        check_max("name", &self.name, TASK_NAME_MAX)?;
        if let Some(description) = &self.description {
            check_max("description", description, TASK_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

impl Validate for UpdateTaskRequest {
    fn validate(&self) -> Result<()> {
        if let Some(name) = patch_value(&self.name) {
            check_max("name", name, TASK_NAME_MAX)?;
        }
        if let Some(description) = patch_value(&self.description) {
            check_max("description", description, TASK_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

impl Validate for CreateScheduleRequest {
    fn validate(&self) -> Result<()> {
        check_required("name", &self.name)?;
        check_max("name", &self.name, SCHEDULE_NAME_MAX)?;
        if !(0..SECONDS_PER_DAY).contains(&self.start_at) {
            return Err(rule_failed("startAt", "min=0,max=86399"));
        }
        if self.duration <= 0 {
            return Err(rule_failed("duration", "gt=0"));
        }
        validate_day(self.day)
    }
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<()> {
        check_required("userId", &self.user_id)?;
        validate_username(&self.username)?;
        check_max("name", &self.name, USER_NAME_MAX)?;
        check_max("email", &self.email, EMAIL_MAX)
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<()> {
        if let Some(username) = patch_value(&self.username) {
            validate_username(username)?;
        }
        if let Some(name) = patch_value(&self.name) {
            check_max("name", name, USER_NAME_MAX)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice.Smith01").is_ok());
        assert!(validate_username("a1").is_ok());
        assert!(validate_username("a").is_err());
        assert!(validate_username(".alice").is_err());
        assert!(validate_username("alice.").is_err());
        assert!(validate_username("al_ice").is_err());
        assert!(validate_username("abcdefghijklmnopqrstu").is_err());
    }

    #[test]
    fn test_class_name_rules() {
        let ok = CreateClassRequest {
            name: "Math 101".to_string(),
            description: None,
        };
        assert!(ok.validate().is_ok());

        let empty = CreateClassRequest {
            name: String::new(),
            description: None,
        };
        let err = empty.validate().unwrap_err();
        assert_eq!(
            err,
            ClassroomError::validation("failed to validate \"name\", because \"required\" rule")
        );

        let long = CreateClassRequest {
            name: "x".repeat(21),
            description: None,
        };
        assert!(long.validate().is_err());

        let long_description = CreateClassRequest {
            name: "ok".to_string(),
            description: Some("d".repeat(256)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_empty_patch_fields_are_skipped() {
        let patch = UpdateClassRequest {
            name: Some(String::new()),
            description: Some("x".to_string()),
        };
        assert!(patch.validate().is_ok());
        assert!(UpdateClassRequest::default().validate().is_ok());

        let patch = UpdateClassRequest {
            name: Some("x".repeat(21)),
            description: None,
        };
        assert!(patch.validate().is_err());

        let patch = UpdateUserRequest {
            username: Some(String::new()),
            name: Some(String::new()),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_schedule_rules() {
        let mut req = CreateScheduleRequest {
            name: "Physics".to_string(),
            start_at: 8 * 3600,
            duration: 45,
            day: 1,
        };
        assert!(req.validate().is_ok());

        req.day = 7;
        assert!(req.validate().is_err());
        req.day = -1;
        assert!(req.validate().is_err());

        req.day = 0;
        req.start_at = SECONDS_PER_DAY;
        assert!(req.validate().is_err());

        req.start_at = 0;
        req.duration = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_multibyte_name_counts_chars() {
        let req = CreateClassRequest {
            name: "高等数学".repeat(5),
            description: None,
        };
        assert!(req.validate().is_ok());
    }
}
