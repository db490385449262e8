use ipnet::IpNet;

// 生成规则行
pub fn format_rule(net: &IpNet) -> String {
    match net {
        IpNet::V4(n) => format!("IP-CIDR,{},no-resolve", n),
        IpNet::V6(n) => format!("IP-CIDR6,{},no-resolve", n),
    }
}

pub fn format_rules(nets: &[IpNet]) -> Vec<String> {
    nets.iter().map(format_rule).collect()
}
