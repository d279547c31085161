use crate::domain::model::{ParsedSku, SizeClass};

/// 目前支援的產品類型：HD (hoodie)、TS (t-shirt)
pub const TYPE_CODES: [&str; 2] = ["HD", "TS"];

const MIN_TOKENS: usize = 4;

/// 把 `ABC-HD-FOX-S` 這類 SKU 解析成 (design key, size class)。
///
/// 不符合格式（段數不足或類型碼不認得）回傳 `None`，呼叫端直接略過。
/// 超過 5 段時只把第 4 段併入設計名稱，再之後、尺碼之前的段落會被忽略。
pub fn classify(raw: &str) -> Option<ParsedSku> {
    let tokens: Vec<&str> = raw.split('-').collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }

    let type_code = tokens[1];
    if !TYPE_CODES.contains(&type_code) {
        return None;
    }

    let size = tokens[tokens.len() - 1];
    let design = if tokens.len() > 5 {
        format!("{}-{}", tokens[2], tokens[3])
    } else {
        tokens[2].to_string()
    };

    Some(ParsedSku {
        design_key: format!("{}-{}", type_code, design),
        size_class: categorize(size),
    })
}

pub fn categorize(size: &str) -> SizeClass {
    match size {
        "S" | "M" | "L" | "XL" | "2XL" | "3XL" => SizeClass::S3xl,
        "4XL" | "5XL" => SizeClass::Xl4To5,
        _ => SizeClass::Other,
    }
}
