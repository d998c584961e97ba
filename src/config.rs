use serde::Deserialize;
use std::fs;

use crate::utils::parse_since_when;

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    #[serde(default = "default_since_when")]
    pub since_when: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_distance")]
    pub distance: u32,
    #[serde(default)]
    pub require_all_keywords: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub github_token: String,
    pub repo: String,
    #[serde(default)]
    pub board_column_id: Option<u64>,
    #[serde(default = "default_status_label")]
    pub status_label: String,
    #[serde(default = "default_spacing")]
    pub request_spacing_seconds: u64,
    #[serde(default = "default_interval")]
    pub check_interval_seconds: u64,
    pub searches: Vec<SearchConfig>,
}

fn default_since_when() -> String {
    "3d".to_string()
}

fn default_distance() -> u32 {
    50
}

fn default_limit() -> u32 {
    25
}

fn default_status_label() -> String {
    "status: to review".to_string()
}

fn default_spacing() -> u64 {
    30
}

fn default_interval() -> u64 {
    21600
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config: AppConfig = serde_json::from_str(content)?;
    for search in &config.searches {
        if parse_since_when(&search.since_when).is_none() {
            return Err(format!(
                "search \"{}\": invalid since_when \"{}\" (expected e.g. \"3d\" or \"2w\")",
                search.name, search.since_when
            )
            .into());
        }
    }
    Ok(config)
}
