#[cfg(feature = "mongodb")]
use std::time::Duration;

#[cfg(feature = "mongodb")]
use bson::doc;
#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, options::ClientOptions};

/// Configuration for the document database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub url: String,
    /// Database holding the `blogs` collection. Created on first write.
    pub database_name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection to the document database.
///
/// The driver pools connections internally; clones of `main` share the pool.
#[cfg(feature = "mongodb")]
pub struct DatabaseConnections {
    client: Client,
    pub main: Database,
}

#[cfg(not(feature = "mongodb"))]
pub struct DatabaseConnections {
    pub database_name: String,
}

#[cfg(feature = "mongodb")]
impl DatabaseConnections {
    /// Connect to the configured database and make sure the server answers.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(config.url.as_str()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(options)?;
        let main = client.database(&config.database_name);

        // The driver connects lazily, so ping to surface a bad URL at startup.
        main.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            database = %config.database_name,
            pool = config.max_connections,
            "Database connected"
        );

        Ok(Self { client, main })
    }

    pub fn database_name(&self) -> &str {
        self.main.name()
    }

    /// Close the client and its pooled connections.
    pub async fn shutdown(&self) {
        tracing::info!(database = %self.database_name(), "Closing database connection");
        self.client.clone().shutdown().await;
    }
}

#[cfg(not(feature = "mongodb"))]
impl DatabaseConnections {
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub async fn shutdown(&self) {}
}
