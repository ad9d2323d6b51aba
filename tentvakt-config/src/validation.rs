//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate the severity profile name.
pub fn validate_profile(profile: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(primary|compact)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(profile) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_profile"))
    }
}

/// Validate that every blocked-shortcut entry follows the
/// `Ctrl[+Shift]+<key>` / `F<n>` / named-key syntax.
pub fn validate_shortcut_list(shortcuts: &[String]) -> Result<(), ValidationError> {
    let re = regex::Regex::new(r"^(Ctrl\+(Shift\+)?[A-Za-z]|F[0-9]{1,2}|PrintScreen)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;

    if shortcuts.is_empty() {
        return Err(ValidationError::new("empty_shortcut_list"));
    }
    if shortcuts.iter().all(|s| re.is_match(s)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_shortcut"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_accepted() {
        assert!(validate_profile("primary").is_ok());
        assert!(validate_profile("compact").is_ok());
        assert!(validate_profile("full").is_err());
    }

    #[test]
    fn shortcut_syntax() {
        let ok = vec!["Ctrl+C".to_string(), "F12".into(), "PrintScreen".into()];
        assert!(validate_shortcut_list(&ok).is_ok());

        let bad = vec!["Ctrl-C".to_string()];
        assert!(validate_shortcut_list(&bad).is_err());

        assert!(validate_shortcut_list(&[]).is_err());
    }
}
