use crate::utils::error::{PortfolioError, Result};
use std::fmt::Display;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl Display, reason: impl Into<String>) -> PortfolioError {
    PortfolioError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A `${VAR}` left over after substitution means the variable was unset.
pub fn reject_unresolved_placeholder(field_name: &str, value: &str) -> Result<()> {
    if let Some(start) = value.find("${") {
        let name = value[start + 2..].split('}').next().unwrap_or_default();
        return Err(invalid(
            field_name,
            value,
            format!("Environment variable '{}' is not set", name),
        ));
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }
    reject_unresolved_placeholder(field_name, url_str)?;

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// A bare file name with the given extension, such as the bundle name.
pub fn validate_file_name(field_name: &str, name: &str, extension: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if name.contains('/') || name.contains('\\') {
        return Err(invalid(field_name, name, "Must be a file name without directories"));
    }
    let stem = name.strip_suffix(extension).unwrap_or_default();
    if stem.is_empty() || stem.ends_with('.') {
        return Err(invalid(
            field_name,
            name,
            format!("File name must end with {}", extension),
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
