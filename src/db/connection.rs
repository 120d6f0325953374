use log::{info, warn};
use mongodb::{bson::doc, Client, Database};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::MongoConfig;

const MAX_RETRIES: u32 = 10;
const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 5000;

pub struct MongoDb {
    pub database: Database,
}

impl MongoDb {
    pub async fn new(config: &MongoConfig) -> mongodb::error::Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        Ok(Self { database })
    }
}

/// Connect to MongoDB with exponential backoff retry logic
pub async fn connect_with_retry(config: &MongoConfig) -> Result<MongoDb, String> {
    let mut retry_count = 0;
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        let attempt = match MongoDb::new(config).await {
            Ok(db) => verify_connection(&db.database).await.map(|_| db),
            Err(e) => Err(format!("connection failed: {}", e)),
        };

        match attempt {
            Ok(db) => return Ok(db),
            Err(e) => {
                retry_count += 1;
                if retry_count >= MAX_RETRIES {
                    return Err(format!(
                        "Failed to connect to MongoDB after {} retries: {}",
                        MAX_RETRIES, e
                    ));
                }
                warn!("MongoDB {}", e);
                info!(
                    "Retrying MongoDB connection in {}ms (attempt {}/{})",
                    backoff_ms,
                    retry_count + 1,
                    MAX_RETRIES
                );
                sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
            }
        }
    }
}

/// Verify MongoDB connection with a ping command
pub async fn verify_connection(database: &Database) -> Result<(), String> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| format!("ping failed: {}", e))
}
