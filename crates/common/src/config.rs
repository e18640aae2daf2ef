use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Appwrite-compatible document store endpoint (e.g. https://cloud.appwrite.io/v1)
    pub appwrite_endpoint: String,

    /// Appwrite project identifier
    pub appwrite_project_id: String,

    /// Appwrite API key with documents.read / documents.write scopes
    pub appwrite_api_key: String,

    /// Database holding both evaluation collections
    pub database_id: String,

    /// Collection of post-evaluation status documents (reminder bookkeeping)
    pub status_collection_id: String,

    /// Collection of main evaluation documents (contact details)
    pub detail_collection_id: String,

    /// SMTP relay host (default: smtp.gmail.com)
    pub smtp_host: String,

    /// SMTP relay port (default: 587, STARTTLS)
    pub smtp_port: u16,

    /// SMTP username; dispatch fails with an auth error when absent
    pub smtp_user: Option<String>,

    /// SMTP password; dispatch fails with an auth error when absent
    pub smtp_pass: Option<String>,

    /// Sender mailbox, display name included (default: no-reply team identity)
    pub mail_from: Option<String>,

    /// Base URL the reminder link is built from
    pub domain_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            appwrite_endpoint: std::env::var("APPWRITE_ENDPOINT")
                .map_err(|_| anyhow::anyhow!("APPWRITE_ENDPOINT environment variable is required"))?,
            appwrite_project_id: std::env::var("APPWRITE_PROJECT_ID")
                .map_err(|_| anyhow::anyhow!("APPWRITE_PROJECT_ID environment variable is required"))?,
            appwrite_api_key: std::env::var("APPWRITE_API_KEY")
                .map_err(|_| anyhow::anyhow!("APPWRITE_API_KEY environment variable is required"))?,
            database_id: std::env::var("APPWRITE_DATABASE_ID")
                .unwrap_or_else(|_| "68ba8a9c001f17064e15".to_string()),
            status_collection_id: std::env::var("EVAL_STATUS_COLLECTION_ID")
                .unwrap_or_else(|_| "68bf9d62002b4f5f7f23".to_string()),
            detail_collection_id: std::env::var("EVAL_DETAIL_COLLECTION_ID")
                .unwrap_or_else(|_| "68ba918c0022d2b9a429".to_string()),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_PORT must be a valid u16"))?,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_pass: std::env::var("SMTP_PASS").ok(),
            mail_from: std::env::var("MAIL_FROM").ok(),
            domain_url: std::env::var("DOMAIN_URL")
                .map_err(|_| anyhow::anyhow!("DOMAIN_URL environment variable is required"))?,
        })
    }
}
