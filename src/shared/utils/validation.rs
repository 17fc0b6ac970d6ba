use regex::Regex;

use crate::shared::errors::AppError;

const MAX_NAME_LEN: usize = 255;
const MAX_TAG_LEN: usize = 50;

pub struct Validator;

impl Validator {
    pub fn validate_list_name(name: &str) -> Result<(), AppError> {
        Self::validate_name("List", name)
    }

    pub fn validate_entry_name(name: &str) -> Result<(), AppError> {
        Self::validate_name("Entry", name)
    }

    fn validate_name(kind: &str, name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::ValidationError(format!(
                "{} name too long (max {} characters)",
                kind, MAX_NAME_LEN
            )));
        }
        Ok(())
    }

    /// Trim a tag and collapse inner whitespace runs to one space.
    ///
    /// Returns the normalized tag, or a validation error for empty or
    /// oversized tags.
    pub fn normalize_tag(tag: &str) -> Result<String, AppError> {
        let whitespace = Regex::new(r"\s+")
            .map_err(|e| AppError::InternalError(format!("Invalid tag pattern: {}", e)))?;
        let normalized = whitespace.replace_all(tag.trim(), " ").into_owned();

        if normalized.is_empty() {
            return Err(AppError::ValidationError(
                "Tag cannot be empty".to_string(),
            ));
        }
        if normalized.chars().count() > MAX_TAG_LEN {
            return Err(AppError::ValidationError(format!(
                "Tag too long (max {} characters)",
                MAX_TAG_LEN
            )));
        }
        Ok(normalized)
    }

    /// Normalize a whole tag list, dropping duplicates while keeping the
    /// first occurrence order.
    pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, AppError> {
        let mut out: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = Self::normalize_tag(tag)?;
            if !out.contains(&tag) {
                out.push(tag);
            }
        }
        Ok(out)
    }
}
