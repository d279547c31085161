use crate::utils::error::{Result, SheetError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SheetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 尺寸類的設定值（寬度、預設高度）必須是大於零的有限數
pub fn validate_positive_length(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_length(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number and not negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SheetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("rip.controller_url", "https://rip.local/api").is_ok());
        assert!(validate_url("rip.controller_url", "http://10.0.0.12:8080/print").is_ok());
        assert!(validate_url("rip.controller_url", "").is_err());
        assert!(validate_url("rip.controller_url", "invalid-url").is_err());
        assert!(validate_url("rip.controller_url", "ftp://rip.local").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("layout.columns", 2, 1).is_ok());
        assert!(validate_positive_number("layout.columns", 0, 1).is_err());
    }

    #[test]
    fn test_validate_lengths() {
        assert!(validate_positive_length("layout.widths.s_3xl", 11.0).is_ok());
        assert!(validate_positive_length("layout.widths.s_3xl", 0.0).is_err());
        assert!(validate_positive_length("layout.widths.s_3xl", f64::NAN).is_err());
        assert!(validate_non_negative_length("layout.h_gap", 0.0).is_ok());
        assert!(validate_non_negative_length("layout.h_gap", -0.25).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("rip.timeout_seconds", 30, 1, 600).is_ok());
        assert!(validate_range("rip.timeout_seconds", 0, 1, 600).is_err());
    }
}
