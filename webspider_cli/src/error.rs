#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Spider Error: {0}")]
    Spider(#[from] webspider::Error),

    #[error("Config Error: {0}")]
    Config(#[from] webspider::ConfigError),

    #[error("URL Error: {0}")]
    Url(#[from] webspider::UrlError),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation Error: {0}")]
    Validation(String),
}
