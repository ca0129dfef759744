//! Test fixtures and factory functions for creating test data.

use problemlist_core::ListDraft;

pub const TWO_SUM: &str = "https://leetcode.cn/problems/two-sum/";
pub const THREE_SUM: &str = "https://leetcode.cn/problems/3sum/";

/// Current three-column layout.
pub const ARRAY_LIST: &str = "### 数组
|题目|相关链接|备注|
|---|---|---|
|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||
|[15. 三数之和](https://leetcode.cn/problems/3sum/)|[题解](https://x.com/a)|经典|
";

/// Older four-column layout with a leading category column.
pub const LEGACY_LIST: &str = "### 哈希表
|分类|题目|相关链接|备注|
|---|---|---|---|
|忽略|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|[笔记](https://note.com)|重点|
";

/// Two-sum listed under two categories.
pub const DUPLICATE_LIST: &str = "### 数组
|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||
|[15. 三数之和](https://leetcode.cn/problems/3sum/)|||
### 哈希表
|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||
";

pub fn draft(title: &str, source: &str, priority: i32) -> ListDraft {
    ListDraft {
        priority,
        ..ListDraft::new(title, source)
    }
}
