use std::time::Duration;

use reqwest::{Client, ClientBuilder, Error};

/// Keep a stable product token so upstream API gateways can whitelist requests.
pub const APP_USER_AGENT: &str = concat!("SportsCatalog/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub fn apply_default_user_agent(builder: ClientBuilder) -> ClientBuilder {
    builder.user_agent(APP_USER_AGENT)
}

pub fn build_http_client(builder: ClientBuilder) -> Result<Client, Error> {
    apply_default_user_agent(builder)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::APP_USER_AGENT;

    #[test]
    fn app_user_agent_matches_package_version() {
        assert_eq!(
            APP_USER_AGENT,
            concat!("SportsCatalog/", env!("CARGO_PKG_VERSION"))
        );
    }
}
