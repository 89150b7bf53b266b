//! Field checks shared by the admin and storefront request handlers.

use sea_orm::sea_query::LikeExpr;

use crate::error::{AppError, AppResult};

pub const LIKE_ESCAPE: char = '\\';

/// Trims `value` and rejects it when empty or longer than `max` characters.
pub fn required(field: &str, value: String, max: usize) -> AppResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    check_length(field, &value, max)?;
    Ok(value)
}

/// Blank strings become `None`.
pub fn optional(field: &str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => {
            check_length(field, &v, max)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

pub fn email(field: &str, value: &str) -> AppResult<()> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("{field} is not a valid email")))
    }
}

pub fn url(field: &str, value: &str) -> AppResult<()> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !value.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(AppError::BadRequest(format!("{field} is not a valid URL"))),
    }
}

pub fn non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// `%term%` for a substring match, with the LIKE wildcards in `term` escaped
/// by [`LIKE_ESCAPE`].
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub fn contains(term: &str) -> LikeExpr {
    LikeExpr::new(contains_pattern(term)).escape(LIKE_ESCAPE)
}
