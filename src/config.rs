use serde::Deserialize;

use crate::services::popularity::DEFAULT_WEIGHT_RATING;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding Products.txt, Users.txt and CurrentUserSession.txt
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Weight of the rating component in the popularity score
    #[serde(default = "default_weight_rating")]
    pub weight_rating: f64,

    /// Correlations below this value are not recommended
    #[serde(default = "default_correlation_threshold")]
    pub correlation_threshold: f64,

    /// Number of popular movies returned when a request does not ask for a count
    #[serde(default = "default_n_recommendations")]
    pub n_popular_movies: usize,

    /// Number of similar movies returned when a request does not ask for a count
    #[serde(default = "default_n_recommendations")]
    pub n_similar_movies: usize,

    /// Session picked by the console demo; random when unset
    #[serde(default)]
    pub session_index: Option<usize>,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_weight_rating() -> f64 {
    DEFAULT_WEIGHT_RATING
}

fn default_correlation_threshold() -> f64 {
    0.4
}

fn default_n_recommendations() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            host: default_host(),
            port: default_port(),
            weight_rating: default_weight_rating(),
            correlation_threshold: default_correlation_threshold(),
            n_popular_movies: default_n_recommendations(),
            n_similar_movies: default_n_recommendations(),
            session_index: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.port, 3000);
        assert_eq!(config.weight_rating, 0.85);
        assert_eq!(config.correlation_threshold, 0.4);
        assert_eq!(config.n_popular_movies, 3);
        assert_eq!(config.n_similar_movies, 3);
        assert_eq!(config.session_index, None);
    }

    #[test]
    fn test_overrides_from_env_pairs() {
        let vars = vec![
            ("DATA_DIR".to_string(), "/srv/movies".to_string()),
            ("WEIGHT_RATING".to_string(), "0.5".to_string()),
            ("SESSION_INDEX".to_string(), "2".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.data_dir, "/srv/movies");
        assert_eq!(config.weight_rating, 0.5);
        assert_eq!(config.session_index, Some(2));
    }
}
