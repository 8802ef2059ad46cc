use std::time::{Duration, Instant};

use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

use crate::error::{Result, TestInfraError};

const REDIS_PORT: u16 = 6379;

/// Settings for a disposable Redis server.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    /// Tag of the `redis` image to run.
    #[builder(default = "8.6.0".to_string(), setter(into))]
    pub tag: String,

    /// How long to keep probing with `PING` before giving up.
    #[builder(default = Duration::from_secs(10))]
    pub ready_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A single Redis instance running in a container.
///
/// The container is removed when the value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
    url: String,
}

impl RedisServer {
    /// Starts Redis and waits until it answers `PING`.
    pub async fn start(config: RedisConfig) -> Result<Self> {
        let container = GenericImage::new("redis", config.tag.as_str())
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        let host = match container.get_host().await?.to_string().as_str() {
            "localhost" => String::from("127.0.0.1"),
            other => other.to_string(),
        };
        let port = container.get_host_port_ipv4(REDIS_PORT).await?;
        let url = format!("redis://{host}:{port}");

        let server = Self { container, url };
        server.wait_ready(config.ready_timeout).await?;
        Ok(server)
    }

    /// Connection URL usable with `redis::Client::open`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stops the container while keeping the handle, simulating an outage.
    pub async fn stop(&self) -> Result<()> {
        self.container.stop().await?;
        Ok(())
    }

    /// Opens a plain multiplexed connection, for seeding or inspecting keys.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.url.as_str())?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let ping = async {
                let mut conn = self.connection().await?;
                redis::cmd("PING").query_async::<String>(&mut conn).await?;
                Ok::<_, TestInfraError>(())
            };
            match ping.await {
                Ok(()) => return Ok(()),
                Err(_) if Instant::now() < deadline => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                Err(_) => {
                    return Err(TestInfraError::NotReady {
                        service: "redis",
                        seconds: timeout.as_secs(),
                    })
                }
            }
        }
    }
}
