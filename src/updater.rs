use crate::config::{SectionConf, TargetConf};
use crate::fetcher::PrefixSource;
use crate::network::parse_and_dedupe;
use crate::resource::RuleList;
use crate::rule::format_rules;
use anyhow::{Context, Result};
use log::{debug, info};

// 单个分段的更新结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub name: String,
    pub prefixes: usize,
    pub rules: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<SectionReport>,
}

// 规则文件更新
pub struct Updater<S> {
    target: TargetConf,
    sections: Vec<SectionConf>,
    source: S,
}

impl<S: PrefixSource> Updater<S> {
    pub fn build(target: TargetConf, sections: Vec<SectionConf>, source: S) -> Self {
        Self {
            target,
            sections,
            source,
        }
    }

    // 生成一个分段的规则行
    pub async fn section_rules(&self, section: &SectionConf) -> Result<(usize, Vec<String>)> {
        let mut prefixes: Vec<String> = vec![];
        for asn in section.asns.iter() {
            let fetched = self.source.fetch(*asn).await?;
            debug!("AS{}: {} prefixes", asn, fetched.len());
            prefixes.extend(fetched);
        }

        let nets = parse_and_dedupe(prefixes.as_slice())
            .with_context(|| format!("Failed to parse prefixes of section {:?}", section.name))?;
        Ok((prefixes.len(), format_rules(&nets)))
    }

    // 所有分段处理成功后才写回文件
    pub async fn run(&self) -> Result<Report> {
        let filepath = self.target.filepath.as_str();
        let mut list = RuleList::from_file(filepath)?;
        let mut report = Report::default();

        for section in self.sections.iter() {
            info!("Updating section {:?}, asns: {:?}", section.name, section.asns);
            let (prefixes, rules) = self.section_rules(section).await?;
            list.replace_section(&section.name, &rules)?;
            report.sections.push(SectionReport {
                name: section.name.clone(),
                prefixes,
                rules: rules.len(),
            });
        }

        list.write(filepath)?;
        info!("Wrote {}", filepath);
        Ok(report)
    }
}
