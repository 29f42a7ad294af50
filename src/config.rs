use std::env;

/// Server settings read from the environment, with defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub model_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let workers = env::var("WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .unwrap_or_else(num_cpus::get);
        let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| "models/iris.onnx".to_string());

        ServerConfig {
            host,
            port,
            workers,
            model_path,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            workers: 1,
            model_path: "models/iris.onnx".to_string(),
        };
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
