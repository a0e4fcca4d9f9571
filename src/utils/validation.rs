use crate::utils::error::{FavoritesError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> FavoritesError {
    FavoritesError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 檢查 OMDb 端點：必須是帶主機名稱的 http(s) URL
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "endpoint URL is empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("not a valid URL ({})", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("expected http or https, got {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "endpoint URL has no host"));
    }
    Ok(())
}

/// 檢查收藏檔路徑
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "store path is empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path.escape_default(), "store path contains a NUL byte"));
    }
    if path.ends_with('/') || path.ends_with('\\') {
        return Err(invalid(field_name, path, "store path names a directory, not a file"));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FavoritesError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "must not be blank"));
    }
    Ok(())
}

/// Release years as catalogs report them: `2016`, or a span such as `2019–2020`.
pub fn validate_year(field_name: &str, value: &str) -> Result<()> {
    let year = value.trim();
    let leading_digits = year.chars().take_while(char::is_ascii_digit).count();
    if leading_digits != 4 {
        return Err(invalid(field_name, value, "expected a four-digit year"));
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
        return Err(invalid(
            field_name,
            value,
            format!("must be within {}..={}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("omdb.endpoint", "https://www.omdbapi.com/").is_ok());
        assert!(validate_url("omdb.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("omdb.endpoint", "").is_err());
        assert!(validate_url("omdb.endpoint", "invalid-url").is_err());
        assert!(validate_url("omdb.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.path", "favorites.json").is_ok());
        assert!(validate_path("store.path", "").is_err());
        assert!(validate_path("store.path", "bad\0path").is_err());
        assert!(validate_path("store.path", "data/").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("omdb.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("omdb.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("omdb.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key: Option<String> = None;
        let err = validate_required_field("omdb.api_key", &key).unwrap_err();
        assert!(matches!(err, FavoritesError::MissingConfigError { field } if field == "omdb.api_key"));

        let key = Some("abc123".to_string());
        assert_eq!(validate_required_field("omdb.api_key", &key).unwrap(), "abc123");
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("title", "Dune").is_ok());
        assert!(validate_non_empty_string("title", "   ").is_err());
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year("year", "2016").is_ok());
        assert!(validate_year("year", "2019–2020").is_ok());
        assert!(validate_year("year", "").is_err());
        assert!(validate_year("year", "16").is_err());
        assert!(validate_year("year", "20161").is_err());

        let err = validate_year("year", "soon").unwrap_err();
        assert!(matches!(err, FavoritesError::InvalidConfigValueError { field, .. } if field == "year"));
    }
}
