use anyhow::Context;

/// Longest token lifetime accepted from the environment: 30 days.
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expires_in_secs: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://products.db".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "product-api".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "product-api-users".into()),
            expires_in_secs: check_token_ttl(parse_var("JWT_EXPIRES_IN", 300)?)?,
        };
        Ok(Self {
            database_url,
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("APP_PORT", 8000)?,
        })
    }
}

fn check_token_ttl(secs: i64) -> anyhow::Result<i64> {
    anyhow::ensure!(
        (1..=MAX_TOKEN_TTL_SECS).contains(&secs),
        "JWT_EXPIRES_IN must be between 1 and {MAX_TOKEN_TTL_SECS} seconds, got {secs}"
    );
    Ok(secs)
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let v: i64 = parse_var("PRODUCT_API_TEST_SURELY_UNSET", 42).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        std::env::set_var("PRODUCT_API_TEST_BAD_NUMBER", "ten");
        let err = parse_var::<u16>("PRODUCT_API_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("PRODUCT_API_TEST_BAD_NUMBER"));
    }

    #[test]
    fn token_ttl_must_be_positive_and_bounded() {
        assert_eq!(check_token_ttl(300).unwrap(), 300);
        assert_eq!(check_token_ttl(MAX_TOKEN_TTL_SECS).unwrap(), MAX_TOKEN_TTL_SECS);
        assert!(check_token_ttl(0).is_err());
        assert!(check_token_ttl(-3600).is_err());
        assert!(check_token_ttl(MAX_TOKEN_TTL_SECS + 1).is_err());
        let err = check_token_ttl(i64::MAX).unwrap_err();
        assert!(err.to_string().contains("JWT_EXPIRES_IN"));
    }

    #[test]
    fn parse_var_reads_value() {
        std::env::set_var("PRODUCT_API_TEST_GOOD_NUMBER", " 9000 ");
        let v: u16 = parse_var("PRODUCT_API_TEST_GOOD_NUMBER", 1).unwrap();
        assert_eq!(v, 9000);
    }
}
