use crate::domain::model::{ArtifactRef, LayoutParams, PlacedEntry, QueueEntry, RowPitch};

/// 依佇列順序把圖排成固定欄數的格子，回傳每張圖的絕對座標。
///
/// 游標從 (0, 0) 開始，每放一張往右移 `width + h_gap`；放滿 `columns` 張就
/// 回到 x = 0 並往下移 `pitch + v_gap`。`RowPitch::LastEntry` 時 pitch 是
/// 該列最後一張的高度（不是整列最高），最後一列不滿也不會多換一次列。
pub fn pack<H>(queue: &[QueueEntry], params: &LayoutParams, mut height_of: H) -> Vec<PlacedEntry>
where
    H: FnMut(&ArtifactRef, f64) -> f64,
{
    let mut placed = Vec::with_capacity(queue.len());
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let mut column = 0;
    let mut row_max = 0.0_f64;

    for entry in queue {
        let width = params.width_of(entry.size_class);
        let height = height_of(&entry.artifact, width);

        placed.push(PlacedEntry {
            artifact: entry.artifact.clone(),
            size_class: entry.size_class,
            x,
            y,
            width,
            height,
        });

        x += width + params.h_gap;
        column += 1;
        row_max = row_max.max(height);

        if column == params.columns {
            let pitch = match params.row_pitch {
                RowPitch::LastEntry => height,
                RowPitch::RowMax => row_max,
            };
            x = 0.0;
            y += pitch + params.v_gap;
            column = 0;
            row_max = 0.0;
        }
    }

    placed
}
