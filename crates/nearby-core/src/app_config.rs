#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub default_radius_meters: u32,
    pub photo_max_width: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_radius_meters", &self.default_radius_meters)
            .field("photo_max_width", &self.photo_max_width)
            .finish()
    }
}
