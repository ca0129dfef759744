//! Markdown table parser for problem lists.
//!
//! # Format
//! ```markdown
//! ### 数组
//! |题目|相关链接|备注|
//! |---|---|---|
//! |[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||
//! |[15. 三数之和](https://leetcode.cn/problems/3sum/)|[题解](https://x.com/a)|经典|
//! ```
//!
//! Older lists carry an extra leading category column; see [`layout`].
//! Parsing never fails. Rows that cannot be read are dropped, so the worst
//! case is an empty result.

pub mod layout;
pub mod link;

use crate::types::{Category, ParseResult, ProblemRecord};
use std::collections::HashMap;

/// Title of the category that collects rows appearing before any heading.
pub const DEFAULT_CATEGORY: &str = "默认分类";

/// Header rows of the known table layouts, compared against the trimmed line.
pub const HEADER_LINES: &[&str] = &[
    "|题目|相关链接|备注|",
    "|题目|视频讲解|备注|",
    "|题目|题解|备注|",
    "|分类|题目|相关链接|备注|",
    "|分类|题目|视频讲解|备注|",
    "|Problem|Video|Note|",
    "|Problem|Solution|Note|",
];

/// Split rows with fewer segments than this are skipped.
const MIN_SEGMENTS: usize = 4;

/// Parse Markdown text into categories of problem records.
pub fn parse(content: &str) -> ParseResult {
    let mut parser = Parser::new();
    for line in content.lines() {
        parser.process_line(line);
    }
    parser.finish()
}

enum LineType<'a> {
    Heading(&'a str),
    Decoration,
    Row(Vec<&'a str>),
    Empty,
    Text,
}

struct Parser {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
    current: Option<usize>,
}

impl Parser {
    fn new() -> Self {
        Self {
            categories: Vec::new(),
            index: HashMap::new(),
            current: None,
        }
    }

    fn process_line(&mut self, line: &str) {
        match Self::parse_line(line) {
            LineType::Heading(title) => {
                self.select(title);
            }
            LineType::Row(cols) => self.handle_row(&cols),
            LineType::Decoration | LineType::Empty | LineType::Text => {}
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            LineType::Empty
        } else if trimmed.starts_with('#') {
            LineType::Heading(trimmed.trim_start_matches('#').trim())
        } else if trimmed.starts_with("|---") || HEADER_LINES.contains(&trimmed) {
            LineType::Decoration
        } else if trimmed.starts_with('|') {
            LineType::Row(trimmed.split('|').map(str::trim).collect())
        } else {
            LineType::Text
        }
    }

    /// Make `title` the current category, creating it on first sight.
    fn select(&mut self, title: &str) -> usize {
        let idx = match self.index.get(title) {
            Some(&idx) => idx,
            None => {
                self.categories.push(Category::new(title));
                let idx = self.categories.len() - 1;
                self.index.insert(title.to_string(), idx);
                idx
            }
        };
        self.current = Some(idx);
        idx
    }

    fn handle_row(&mut self, cols: &[&str]) {
        if cols.len() < MIN_SEGMENTS {
            return;
        }

        let Some(record) = Self::build_record(cols) else {
            return;
        };

        let idx = match self.current {
            Some(idx) => idx,
            None => self.select(DEFAULT_CATEGORY),
        };
        self.categories[idx].problems.push(record);
    }

    fn build_record(cols: &[&str]) -> Option<ProblemRecord> {
        let layout = layout::detect(cols);
        let cell = |i: usize| cols.get(i).copied();

        let primary = link::first_link(cell(layout.primary)?)?;
        let secondary = cell(layout.secondary).and_then(link::first_link);

        Some(ProblemRecord {
            title: primary.label.to_string(),
            url: primary.target.to_string(),
            secondary_url: secondary.as_ref().map(|l| l.target.to_string()),
            secondary_text: secondary.as_ref().map(|l| l.label.to_string()),
            note: cell(layout.note).map(str::to_string),
        })
    }

    fn finish(self) -> ParseResult {
        self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARRAY_BLOCK: &str = "### 数组
|题目|相关链接|备注|
|---|---|---|
|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||
|[15. 三数之和](https://leetcode.cn/problems/3sum/)|[题解](https://x.com/a)|经典|
";

    fn titles(result: &ParseResult) -> Vec<&str> {
        result.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn parse_single_block() {
        let result = parse(ARRAY_BLOCK);
        assert_eq!(titles(&result), vec!["数组"]);

        let problems = &result[0].problems;
        assert_eq!(problems.len(), 2);

        assert_eq!(problems[0].title, "1. 两数之和");
        assert!(problems[0].url.ends_with("two-sum/"));
        assert_eq!(problems[0].secondary_url, None);
        assert_eq!(problems[0].secondary_text, None);

        assert_eq!(problems[1].title, "15. 三数之和");
        assert!(problems[1].url.ends_with("3sum/"));
        assert_eq!(problems[1].secondary_text.as_deref(), Some("题解"));
        assert_eq!(problems[1].secondary_url.as_deref(), Some("https://x.com/a"));
        assert_eq!(problems[1].note.as_deref(), Some("经典"));
    }

    #[test]
    fn parse_legacy_row() {
        let input = "### 数组\n|忽略|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|[笔记](https://note.com)|重点|";
        let result = parse(input);
        assert_eq!(
            result[0].problems,
            vec![ProblemRecord {
                title: "1. 两数之和".to_string(),
                url: "https://leetcode.cn/problems/two-sum/".to_string(),
                secondary_url: Some("https://note.com".to_string()),
                secondary_text: Some("笔记".to_string()),
                note: Some("重点".to_string()),
            }]
        );
    }

    #[test]
    fn keep_row_with_empty_optional_cells() {
        let input = "### 数组\n|[209. 长度最小的子数组](https://leetcode.cn/problems/minimum-size-subarray-sum/)|||";
        let result = parse(input);
        let record = &result[0].problems[0];
        assert_eq!(record.title, "209. 长度最小的子数组");
        assert_eq!(record.secondary_url, None);
        assert_eq!(record.secondary_text, None);
        assert_eq!(record.note.as_deref(), Some(""));
    }

    #[test]
    fn skip_row_with_too_few_columns() {
        let result = parse("### 数组\n|OnlyOneCell|");
        assert_eq!(titles(&result), vec!["数组"]);
        assert!(result[0].problems.is_empty());
    }

    #[test]
    fn drop_row_without_primary_link() {
        let input = "### 数组\n|两数之和|[题解](https://x.com/a)|备注|\n|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||";
        let result = parse(input);
        assert_eq!(result[0].problems.len(), 1);
        assert_eq!(result[0].problems[0].title, "1. 两数之和");
    }

    #[test]
    fn repeated_heading_appends_to_first_category() {
        let input = "### A
|[a1](https://leetcode.cn/problems/a1/)|||
### B
|[b1](https://leetcode.cn/problems/b1/)|||
### A
|[a2](https://leetcode.cn/problems/a2/)|||
";
        let result = parse(input);
        assert_eq!(titles(&result), vec!["A", "B"]);
        let a: Vec<&str> = result[0].problems.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(a, vec!["a1", "a2"]);
        assert_eq!(result[1].problems.len(), 1);
    }

    #[test]
    fn rows_before_heading_use_default_category() {
        let input = "|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||\n### 默认分类\n|[15. 三数之和](https://leetcode.cn/problems/3sum/)|||";
        let result = parse(input);
        assert_eq!(titles(&result), vec![DEFAULT_CATEGORY]);
        assert_eq!(result[0].problems.len(), 2);
    }

    #[test]
    fn blank_lines_keep_current_category() {
        let input = "### 链表\n\n   \n|---|---|---|\n\n|[206. 反转链表](https://leetcode.cn/problems/reverse-linked-list/)|||\n\t\n";
        let result = parse(input);
        assert_eq!(titles(&result), vec!["链表"]);
        assert_eq!(result[0].problems.len(), 1);
    }

    #[test]
    fn bare_heading_yields_empty_title() {
        let result = parse("###\n|[a](https://leetcode.cn/problems/a/)|||");
        assert_eq!(titles(&result), vec![""]);
        assert_eq!(result[0].problems.len(), 1);
    }

    #[test]
    fn heading_strips_markers_and_whitespace() {
        let result = parse("  ##   二叉树  \n# 图");
        assert_eq!(titles(&result), vec!["二叉树", "图"]);
    }

    #[test]
    fn only_first_link_in_primary_cell_is_used() {
        let input = "|[a](https://leetcode.cn/problems/a/) also [b](https://leetcode.cn/problems/b/)|||";
        let record = &parse(input)[0].problems[0];
        assert_eq!(record.title, "a");
        assert_eq!(record.url, "https://leetcode.cn/problems/a/");
    }

    #[test]
    fn pipe_in_note_splits_columns() {
        let input = "|[a](https://leetcode.cn/problems/a/)||x | y|";
        let record = &parse(input)[0].problems[0];
        assert_eq!(record.note.as_deref(), Some("x"));
    }

    #[test]
    fn known_header_lines_are_skipped() {
        let input = "### 视频\n|题目|视频讲解|备注|\n  |Problem|Video|Note|  \n|---|---|---|";
        let result = parse(input);
        assert_eq!(titles(&result), vec!["视频"]);
        assert!(result[0].problems.is_empty());
    }

    #[test]
    fn legacy_row_with_label_in_ignored_column_is_kept() {
        let input = "### 讲解\n|视频|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|[笔记](https://note.com)|重点|";
        let problems = &parse(input)[0].problems;
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].title, "1. 两数之和");
        assert_eq!(problems[0].secondary_text.as_deref(), Some("笔记"));
        assert_eq!(problems[0].note.as_deref(), Some("重点"));
    }

    #[test]
    fn row_with_label_in_first_column_is_read_as_data() {
        let input = "|Video|[v](https://leetcode.cn/problems/v/)|x|";
        let record = &parse(input)[0].problems[0];
        assert_eq!(record.url, "https://leetcode.cn/problems/v/");
        assert_eq!(record.secondary_url, None);
        assert_eq!(record.note.as_deref(), Some(""));
    }

    #[test]
    fn fallback_layout_reads_first_column() {
        let record = &parse("|[a](https://example.com/a)|[b](https://example.com/b)|n|")[0].problems[0];
        assert_eq!(record.url, "https://example.com/a");
        assert_eq!(record.secondary_url.as_deref(), Some("https://example.com/b"));
        assert_eq!(record.note.as_deref(), Some("n"));
    }

    #[test]
    fn count_matches_link_bearing_rows() {
        let mut input = String::from("### 栈\n|题目|相关链接|备注|\n|---|---|---|\n");
        for i in 0..10 {
            if i % 3 == 0 {
                input.push_str(&format!("|第{}题|||\n", i));
            } else {
                input.push_str(&format!("|[{i}](https://leetcode.cn/problems/p{i}/)|||\n"));
            }
        }
        assert_eq!(parse(&input)[0].problems.len(), 6);
    }

    #[test]
    fn parse_is_idempotent() {
        let input = format!("{ARRAY_BLOCK}\n### 字符串\n|忽略|[5. 最长回文子串](https://leetcode.cn/problems/longest-palindromic-substring/)|||");
        assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n\t").is_empty());
        assert!(parse("plain prose\nmore prose").is_empty());
    }
}
