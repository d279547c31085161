use crate::domain::model::{GroupCount, GroupKey, GroupStatus, GroupSummary, QueueEntry, SizeClass};
use crate::domain::ports::ArtifactResolver;

/// 進佇列的順序：先全部 S-3XL，再全部 4XL-5XL；`Other` 不排版
pub const QUEUED_TIERS: [SizeClass; 2] = [SizeClass::S3xl, SizeClass::Xl4To5];

#[derive(Debug, Clone, Default)]
pub struct QueueBuild {
    pub entries: Vec<QueueEntry>,
    /// 找不到圖稿而整組略過的 key，由呼叫端記 warning
    pub unresolved: Vec<GroupKey>,
}

/// 把計數展開成一張一筆的佇列。
///
/// 每一層內依 group key 字典序；同一 key 的 `count` 筆連續排列。
pub fn build_queue<R>(counts: &GroupCount, resolver: &R) -> QueueBuild
where
    R: ArtifactResolver + ?Sized,
{
    let mut build = QueueBuild::default();

    for tier in QUEUED_TIERS {
        // GroupCount 是 BTreeMap，迭代本身就是排序過的
        for (key, &count) in counts.iter().filter(|(key, _)| key.size_class() == tier) {
            match resolver.resolve(key) {
                Some(artifact) => {
                    let entry = QueueEntry {
                        artifact,
                        size_class: tier,
                    };
                    build.entries.extend(std::iter::repeat(entry).take(count));
                }
                None => build.unresolved.push(key.clone()),
            }
        }
    }

    build
}

/// 每組一行的摘要（依 group key 排序），被略過的組也會列出
pub fn summarize(counts: &GroupCount, unresolved: &[GroupKey]) -> Vec<GroupSummary> {
    counts
        .iter()
        .map(|(key, &count)| {
            let status = if !QUEUED_TIERS.contains(&key.size_class()) {
                GroupStatus::NotQueued
            } else if unresolved.contains(key) {
                GroupStatus::Unresolved
            } else {
                GroupStatus::Queued
            };
            GroupSummary {
                group: key.to_string(),
                count,
                status,
            }
        })
        .collect()
}
