use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Where the playback routes are nested, e.g. "/api/spotify".
    pub routes_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3005,
            routes_prefix: "/spotify".to_string(),
        }
    }
}
