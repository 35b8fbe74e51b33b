static HOST: &str = "HOST";
static PORT: &str = "PORT";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `HOST` and `PORT`, honouring a `.env` file. Missing or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_source(|key| dotenvy::var(key).ok())
    }

    fn from_source(var: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            host: var(HOST).unwrap_or(default.host),
            port: var(PORT)
                .and_then(|port| port.parse().ok())
                .unwrap_or(default.port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::Config;

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::from_source(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_host_and_port() {
        let config = Config::from_source(|key| match key {
            "HOST" => Some("127.0.0.1".to_string()),
            "PORT" => Some("3000".to_string()),
            _ => None,
        });
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn ignores_unparsable_port() {
        let config = Config::from_source(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }
}
