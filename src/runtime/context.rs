//! 请求上下文
//!
//! 每个存储与服务操作都接收 `&RequestContext`，其中携带取消令牌和可选的截止时间。
//! 内存实现在写入前检查上下文；关系型实现让每次 SQL 往返与令牌、截止时间赛跑。

use std::future::Future;
use std::time::Duration;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::StorageConfig;
use crate::errors::{ClassroomError, Result};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// 无截止时间、未取消的上下文
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// 从存储配置构造，request_timeout_ms 为 0 时不设截止时间
    pub fn from_config(config: &StorageConfig) -> Self {
        match config.request_timeout_ms {
            0 => Self::background(),
            ms => Self::with_timeout(Duration::from_millis(ms)),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 已取消或已超时则返回对应错误
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ClassroomError::cancelled("request was cancelled"));
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(ClassroomError::deadline_exceeded("request deadline exceeded"));
        }
        Ok(())
    }

    /// 运行一个存储操作，取消或超时时提前返回并丢弃该 future
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.ensure_active()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                Err(ClassroomError::cancelled("request was cancelled"))
            }
            _ = deadline => {
                Err(ClassroomError::deadline_exceeded("request deadline exceeded"))
            }
            res = fut => res,
        }
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req
            .app_data::<web::Data<StorageConfig>>()
            .map(|config| RequestContext::from_config(config))
            .unwrap_or_default();
        ready(Ok(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_runs_future() {
        let ctx = RequestContext::background();
        let value = ctx.run(async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancelled_before_run() {
        let ctx = RequestContext::background();
        ctx.cancel();
        let err = ctx.run(async { Ok(()) }).await.unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(ctx.is_cancelled());
        assert!(ctx.ensure_active().is_err());
    }

    #[tokio::test]
    async fn test_cancel_during_run() {
        let ctx = RequestContext::background();
        let token = ctx.cancel_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::DeadlineExceeded(_)));
    }

    #[test]
    fn test_zero_timeout_means_unbounded() {
        let config = StorageConfig::default();
        assert!(RequestContext::from_config(&config).deadline().is_none());
    }
}
