//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Shared secret used to sign cookies and verify identity tokens.
    pub secret: String,
    /// Platform service issuing identity tokens; admins sign in there.
    pub auth_service_url: String,
    /// Send session cookies over HTTPS only.
    #[serde(default)]
    pub secure_cookies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_cookies_default_off() {
        let mut value = serde_json::json!({
            "domain": "localhost",
            "address": "127.0.0.1",
            "port": 8080,
            "database_url": "app.db",
            "templates_dir": "templates/**/*",
            "secret": "secret",
            "auth_service_url": "http://localhost:8081"
        });
        let config: ServerConfig = serde_json::from_value(value.clone()).unwrap();
        assert!(!config.secure_cookies);

        value["secure_cookies"] = serde_json::Value::Bool(true);
        let config: ServerConfig = serde_json::from_value(value).unwrap();
        assert!(config.secure_cookies);
    }
}
