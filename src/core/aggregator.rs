use crate::core::classifier::classify;
use crate::domain::model::{GroupCount, GroupKey};

/// 依 (design key, size class) 計數；解析失敗的 SKU 直接略過
pub fn aggregate<I, S>(identifiers: I) -> GroupCount
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = GroupCount::new();
    for raw in identifiers {
        match classify(raw.as_ref()) {
            Some(parsed) => *counts.entry(GroupKey::from(parsed)).or_insert(0) += 1,
            None => tracing::trace!("Skipping unrecognised SKU: {:?}", raw.as_ref()),
        }
    }
    counts
}

/// 合併兩份部分計數（平行處理時的 reduce）
pub fn merge(mut left: GroupCount, right: GroupCount) -> GroupCount {
    for (key, count) in right {
        *left.entry(key).or_insert(0) += count;
    }
    left
}
