/// Listener configuration.
///
/// The whole CLI surface is one optional port argument; `LISTEN` overrides
/// it with a full address for deployments that bind elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
}

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

impl Config {
    /// Builds the config from the process arguments and environment.
    ///
    /// Precedence: `LISTEN` env var, then the port argument, then the
    /// default. A non-numeric port is an error so the process can exit
    /// non-zero before binding.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(addr) = std::env::var("LISTEN") {
            return Ok(Self { listen_addr: addr });
        }

        let listen_addr = match std::env::args().nth(1) {
            Some(arg) => {
                let port: u16 = arg
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid port argument: {arg}"))?;
                format!("127.0.0.1:{port}")
            }
            None => DEFAULT_ADDR.to_string(),
        };

        Ok(Self { listen_addr })
    }

    /// Config from an explicit address, for tests and embedding.
    pub fn with_addr(addr: impl Into<String>) -> Self {
        Self {
            listen_addr: addr.into(),
        }
    }
}
