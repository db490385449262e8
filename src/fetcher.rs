use crate::config::RegistryConf;
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

// 前缀数据来源
#[allow(async_fn_in_trait)]
pub trait PrefixSource {
    async fn fetch(&self, asn: u32) -> Result<Vec<String>>;
}

#[derive(Debug, Default, Deserialize)]
struct AnnouncedPrefixes {
    #[serde(default)]
    data: Option<AnnouncedData>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnouncedData {
    #[serde(default)]
    prefixes: Vec<AnnouncedPrefix>,
}

#[derive(Debug, Deserialize)]
struct AnnouncedPrefix {
    #[serde(default)]
    prefix: Option<String>,
}

// 解析 announced-prefixes 响应, 缺失字段视为空
pub fn parse_announced(body: &str) -> Result<Vec<String>> {
    let resp: AnnouncedPrefixes =
        serde_json::from_str(body).context("Malformed announced-prefixes response")?;

    Ok(resp
        .data
        .map(|d| d.prefixes)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.prefix)
        .filter(|p| !p.is_empty())
        .collect())
}

// RIPEstat 客户端
pub struct RipeStat {
    client: reqwest::Client,
    url: String,
}

impl RipeStat {
    pub fn build(conf: &RegistryConf) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(conf.timeout))
            .user_agent(conf.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: conf.url.clone(),
        })
    }
}

impl PrefixSource for RipeStat {
    async fn fetch(&self, asn: u32) -> Result<Vec<String>> {
        let resource = format!("AS{}", asn);
        debug!("GET {}?resource={}", self.url, resource);

        let body = self
            .client
            .get(&self.url)
            .query(&[("resource", resource.as_str())])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("Failed to fetch prefixes for {}", resource))?
            .text()
            .await
            .with_context(|| format!("Failed to read response for {}", resource))?;

        parse_announced(&body).with_context(|| format!("Invalid response for {}", resource))
    }
}
