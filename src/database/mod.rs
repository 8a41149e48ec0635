use mongodb::{Client, Collection, Database};
use std::env;
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Builds the connection URI from MONGO_* environment variables.
    /// Credentials are included only when both username and password are set.
    pub async fn from_env() -> Result<Self, Box<dyn Error>> {
        let host = env::var("MONGO_HOST").unwrap_or_else(|_| "localhost:27017".to_string());
        let db_name = env::var("MONGO_DATABASE").unwrap_or_else(|_| "user_service".to_string());

        let uri = match (env::var("MONGO_USERNAME"), env::var("MONGO_PASSWORD")) {
            (Ok(username), Ok(password)) => {
                format!("mongodb://{}:{}@{}/{}", username, password, host, db_name)
            }
            _ => format!("mongodb://{}/{}", host, db_name),
        };

        Self::new(&uri).await
    }

    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuning
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("user_service");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
