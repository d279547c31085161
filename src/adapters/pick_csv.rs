use crate::domain::model::PickRow;
use crate::utils::error::{Result, SheetError};

/// 解析撿貨單 CSV，只取出 SKU 欄位。
///
/// 標題列沒有 SKU 欄、或某一列缺少該欄位都視為致命錯誤。
pub fn read_pick_rows(data: &[u8], sku_column: &str) -> Result<Vec<PickRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    // 標題重複時以最後一個同名欄位為準
    let sku_index = reader
        .headers()?
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == sku_column)
        .map(|(index, _)| index)
        .last()
        .ok_or_else(|| SheetError::MissingFieldError {
            field: sku_column.to_string(),
            location: "header row".to_string(),
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let sku = record
            .get(sku_index)
            .ok_or_else(|| SheetError::MissingFieldError {
                field: sku_column.to_string(),
                // 標題列是第 1 行
                location: format!("line {}", index + 2),
            })?;
        rows.push(PickRow {
            sku: sku.to_string(),
        });
    }

    tracing::debug!("Read {} pick rows (column '{}')", rows.len(), sku_column);
    Ok(rows)
}
