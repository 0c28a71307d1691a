use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ts: u64,
}
