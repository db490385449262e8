use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

// 规则文件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConf {
    pub filepath: String,
}

impl Default for TargetConf {
    fn default() -> Self {
        Self {
            filepath: String::from("surge/CAN-wifi-calling.list"),
        }
    }
}

// RIPEstat 接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConf {
    pub url: String,
    // 秒
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for RegistryConf {
    fn default() -> Self {
        Self {
            url: String::from("https://stat.ripe.net/data/announced-prefixes/data.json"),
            timeout: 30,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

// 分段配置, name 对应文件中的 `# name` 标题行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConf {
    pub name: String,
    pub asns: Vec<u32>,
}

impl SectionConf {
    pub fn new(name: &str, asns: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            asns: asns.to_vec(),
        }
    }
}

// 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConf,
    pub registry: RegistryConf,
    pub sections: Vec<SectionConf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConf::default(),
            registry: RegistryConf::default(),
            sections: vec![
                SectionConf::new("Freedom Mobile", &[20365, 36273]),
                SectionConf::new("Bell Mobility (AS36522)", &[36522]),
                SectionConf::new("Rogers Communications (Rogers/Fido) (AS812)", &[812]),
                SectionConf::new("TELUS Mobility (AS14663)", &[14663]),
            ],
        }
    }
}

impl Config {
    // 从配置文件中读取, 未指定路径且默认文件不存在时使用内置配置
    pub async fn from_file(path: Option<String>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => {
                if !Path::new(DEFAULT_CONFIG_PATH).exists() {
                    info!("{} not found, using built-in configuration", DEFAULT_CONFIG_PATH);
                    return Ok(Self::default());
                }
                String::from(DEFAULT_CONFIG_PATH)
            }
        };

        let conf_string = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration {}", path))?;

        Self::from_toml(&conf_string).with_context(|| format!("Invalid configuration {}", path))
    }

    pub fn from_toml(conf_string: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(conf_string)?)
    }
}
