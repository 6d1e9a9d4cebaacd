use super::*;

#[test]
fn from_values_defaults_when_unset() {
    let config = ApiConfig::from_values(None, None);
    assert_eq!(config.backend_url, "http://localhost:8080");
    assert_eq!(config.ai_url, "http://localhost:8000");
}

#[test]
fn from_values_defaults_when_blank() {
    let config = ApiConfig::from_values(Some("   "), Some(""));
    assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.ai_url, DEFAULT_AI_URL);
}

#[test]
fn from_values_strips_trailing_slashes() {
    let config = ApiConfig::from_values(Some("https://api.example.uy//"), Some(" http://ai:9000/ "));
    assert_eq!(config.backend_url, "https://api.example.uy");
    assert_eq!(config.ai_url, "http://ai:9000");
}

#[test]
fn backend_joins_path() {
    let config = ApiConfig::from_values(Some("http://10.0.0.5:8080/"), None);
    assert_eq!(config.backend("/api/auth/login"), "http://10.0.0.5:8080/api/auth/login");
}
