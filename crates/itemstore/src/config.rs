use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table name (default: "itemstore")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
    /// Custom store endpoint, e.g. a local DynamoDB at http://localhost:8000
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "itemstore")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint for DynamoDB Local
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "itemstore".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
