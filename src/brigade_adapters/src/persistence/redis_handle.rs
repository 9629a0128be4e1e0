use std::sync::Arc;

use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;

/// Process-wide Redis access: one client, one multiplexed connection
/// established lazily on first use and shared by every store.
///
/// A connection failure on first use surfaces to the caller as a store
/// error; it is not retried here.
#[derive(Clone)]
pub struct RedisHandle {
    client: redis::Client,
    connection: Arc<Mutex<Option<MultiplexedConnection>>>,
}

impl RedisHandle {
    pub fn new(url: &str) -> Result<Self, redis::RedisError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            connection: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        let mut guard = self.connection.lock().await;
        if let Some(connection) = guard.as_ref() {
            return Ok(connection.clone());
        }

        let connection = self.client.get_multiplexed_async_connection().await?;
        *guard = Some(connection.clone());
        Ok(connection)
    }

    /// Drop the shared connection. Subsequent calls reconnect lazily.
    pub async fn shutdown(&self) {
        self.connection.lock().await.take();
    }
}
