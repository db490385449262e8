use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

const HEADER_MARK: &str = "# ";

// 规则文件内容, 按行保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleList {
    pub lines: Vec<String>,
}

impl RuleList {
    pub fn from_file(filepath: &str) -> Result<Self> {
        if !Path::new(filepath).exists() {
            return Err(anyhow!("Missing file: {}", filepath));
        }
        let content =
            fs::read_to_string(filepath).with_context(|| format!("Failed to read {}", filepath))?;
        Ok(Self::from_content(&content))
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.lines().map(|e| e.to_string()).collect(),
        }
    }

    pub fn to_content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }

    pub fn write(&self, filepath: &str) -> Result<()> {
        fs::write(filepath, self.to_content())
            .with_context(|| format!("Failed to write {}", filepath))
    }

    // 替换 `# header` 与下一个标题行之间的内容, 并在其后保留一个空行
    pub fn replace_section(&mut self, header: &str, block: &[String]) -> Result<()> {
        let header_line = format!("{}{}", HEADER_MARK, header);
        let start = self
            .lines
            .iter()
            .position(|l| *l == header_line)
            .ok_or_else(|| anyhow!("Missing section header: {}", header_line))?;

        let end = self.lines[start + 1..]
            .iter()
            .position(|l| l.starts_with(HEADER_MARK))
            .map(|i| start + 1 + i)
            .unwrap_or(self.lines.len());

        let replacement = block.iter().cloned().chain(std::iter::once(String::new()));
        self.lines.splice(start + 1..end, replacement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn replaces_until_next_header() {
        let mut list = RuleList::from_content("# Foo\nold,line\n# Bar\nbar,line\n");
        list.replace_section("Foo", &block(&["new,line"])).unwrap();
        assert_eq!(list.to_content(), "# Foo\nnew,line\n\n# Bar\nbar,line\n");
    }

    #[test]
    fn replaces_until_end_of_file() {
        let mut list = RuleList::from_content("# Foo\na\n# Bar\nb\nc\n\n");
        list.replace_section("Bar", &block(&["x", "y"])).unwrap();
        assert_eq!(list.to_content(), "# Foo\na\n# Bar\nx\ny\n\n");
    }

    #[test]
    fn keeps_preamble_and_other_sections() {
        let content = "// preamble\n#!comment\n\n# Foo\nold\n\n# Bar\nkeep,me\n\n# Baz\nz\n";
        let mut list = RuleList::from_content(content);
        list.replace_section("Bar", &block(&["IP-CIDR,10.0.0.0/8,no-resolve"]))
            .unwrap();
        assert_eq!(
            list.to_content(),
            "// preamble\n#!comment\n\n# Foo\nold\n\n# Bar\nIP-CIDR,10.0.0.0/8,no-resolve\n\n# Baz\nz\n"
        );
    }

    #[test]
    fn empty_block_leaves_single_blank_line() {
        let mut list = RuleList::from_content("# Foo\na\nb\n\n\n# Bar\n");
        list.replace_section("Foo", &[]).unwrap();
        assert_eq!(list.to_content(), "# Foo\n\n# Bar\n");
    }

    #[test]
    fn header_must_match_exactly() {
        let mut list = RuleList::from_content("# Foo Bar\na\n#Foo\nb\n");
        let err = list.replace_section("Foo", &block(&["x"])).unwrap_err();
        assert_eq!(err.to_string(), "Missing section header: # Foo");
        assert_eq!(list.to_content(), "# Foo Bar\na\n#Foo\nb\n");
    }

    #[test]
    fn repeated_replacement_is_stable() {
        let mut list = RuleList::from_content("# Foo\nold\n# Bar\n");
        list.replace_section("Foo", &block(&["new"])).unwrap();
        let once = list.clone();
        list.replace_section("Foo", &block(&["new"])).unwrap();
        assert_eq!(list, once);
    }

    #[test]
    fn missing_file() {
        let err = RuleList::from_file("no/such/rules.list").unwrap_err();
        assert_eq!(err.to_string(), "Missing file: no/such/rules.list");
    }
}
