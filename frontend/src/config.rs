//! Runtime API endpoint resolution. A `localStorage` override beats the
//! default so a deployed bundle can be pointed at another backend without a
//! rebuild.

use crate::utils::storage;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const OVERRIDE_KEY: &str = "api_base_url";

pub fn api_base_url() -> String {
    storage::local_storage()
        .ok()
        .and_then(|s| s.get_item(OVERRIDE_KEY).ok().flatten())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Absolute URL for a backend-served asset path like `/uploads/<name>`.
pub fn asset_url(path: &str) -> String {
    format!("{}{}", api_base_url(), path)
}
