use anyhow::{anyhow, Result};
use reqwest::Url;

pub fn validate_endpoint(value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(anyhow!("endpoint is empty"));
    }
    let url = Url::parse(value.trim()).map_err(|err| anyhow!("invalid endpoint {}: {}", value, err))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("endpoint must be http or https"));
    }
    Ok(url)
}
