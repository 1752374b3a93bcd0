use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    #[serde(default)]
    pub email: String,
    pub exp: usize, // Expiration time (时间戳)
    #[serde(default)]
    pub iat: usize, // Issued at (签发时间)
}

/// HS256 令牌工具
///
/// 令牌由外部身份提供方签发，这里只负责校验；签发接口供测试与本地调试使用。
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtUtils {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret)
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        &self,
        user_id: &str,
        email: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify() {
        let jwt = JwtUtils::new("test-secret");
        let token = jwt
            .generate_token_with_expiry("user-1", "u1@example.com", chrono::Duration::minutes(5))
            .unwrap();
        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "u1@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::new("secret-a")
            .generate_token_with_expiry("user-1", "", chrono::Duration::minutes(5))
            .unwrap();
        assert!(JwtUtils::new("secret-b").verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtUtils::new("test-secret");
        let token = jwt
            .generate_token_with_expiry("user-1", "", chrono::Duration::minutes(-10))
            .unwrap();
        assert!(jwt.verify_token(&token).is_err());
    }
}
