use anyhow::{anyhow, Result};
use ipnet::IpNet;
use std::net::IpAddr;

// 解析前缀, 主机位清零; 纯地址视为 /32 或 /128
pub fn parse_prefix(prefix: &str) -> Result<IpNet> {
    let prefix = prefix.trim();
    if let Ok(net) = prefix.parse::<IpNet>() {
        return Ok(net.trunc());
    }
    match prefix.parse::<IpAddr>() {
        Ok(addr) => {
            let len = if addr.is_ipv4() { 32 } else { 128 };
            Ok(IpNet::new(addr, len)?)
        }
        Err(_) => Err(anyhow!("Invalid prefix: {:?}", prefix)),
    }
}

fn version(net: &IpNet) -> u8 {
    match net {
        IpNet::V4(_) => 4,
        IpNet::V6(_) => 6,
    }
}

fn numeric(net: &IpNet) -> u128 {
    match net {
        IpNet::V4(n) => u32::from(n.network()) as u128,
        IpNet::V6(n) => u128::from(n.network()),
    }
}

// 去除被已保留网段覆盖的子网, 结果按 (版本, 地址, 前缀长度) 排序
pub fn dedupe(nets: impl IntoIterator<Item = IpNet>) -> Vec<IpNet> {
    let mut candidates: Vec<IpNet> = nets.into_iter().map(|n| n.trunc()).collect();
    candidates.sort_by_key(|n| (version(n), n.prefix_len(), numeric(n)));

    let mut kept: Vec<IpNet> = Vec::with_capacity(candidates.len());
    for net in candidates {
        if !kept.iter().any(|k| k.contains(&net)) {
            kept.push(net);
        }
    }

    kept.sort_by_key(|n| (version(n), numeric(n), n.prefix_len()));
    kept
}

pub fn parse_and_dedupe<S: AsRef<str>>(prefixes: &[S]) -> Result<Vec<IpNet>> {
    let nets = prefixes
        .iter()
        .map(|p| parse_prefix(p.as_ref()))
        .collect::<Result<Vec<IpNet>>>()?;
    Ok(dedupe(nets))
}
