use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub table_name: String,
    pub dynamodb_endpoint: String,
    pub aws_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid TCP port")?,
            Err(_) => 3000,
        };
        Ok(Self {
            port,
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "tasks".to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }
}
