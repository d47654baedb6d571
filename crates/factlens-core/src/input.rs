use thiserror::Error;

pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("text cannot be empty or only whitespace")]
    Empty,
    #[error("text is too short: {0} characters, at least 10 required")]
    TooShort(usize),
    #[error("text is too long: {0} characters, at most 10000 allowed")]
    TooLong(usize),
}

/// Trims `raw` and checks it is between 10 and 10,000 characters.
pub fn validate_text(raw: &str) -> Result<&str, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(InputError::TooShort(chars));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(InputError::TooLong(chars));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_empty() {
        assert_eq!(validate_text(" \n\t "), Err(InputError::Empty));
    }

    #[test]
    fn text_is_trimmed_before_counting() {
        assert_eq!(validate_text("   short   "), Err(InputError::TooShort(5)));
        assert_eq!(validate_text("  long enough text  "), Ok("long enough text"));
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let text = "ü".repeat(MAX_TEXT_CHARS);
        assert!(validate_text(&text).is_ok());
        let text = "ü".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(validate_text(&text), Err(InputError::TooLong(MAX_TEXT_CHARS + 1)));
    }
}
