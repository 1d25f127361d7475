//! Input validation utilities

use crate::constants::{MAX_ELAPSED_SECONDS, MAX_STAGE_POINTS};
use crate::error::{AppError, AppResult};
use crate::utils::crypto::is_sha256_hex;

/// Validate a recorded completion time and narrow it to the stored width
pub fn validate_elapsed_seconds(elapsed_seconds: i64) -> AppResult<i32> {
    if elapsed_seconds <= 0 {
        return Err(AppError::Validation(
            "elapsed_seconds must be a positive number of seconds".to_string(),
        ));
    }
    if elapsed_seconds > MAX_ELAPSED_SECONDS {
        return Err(AppError::Validation(format!(
            "elapsed_seconds must be at most {}",
            MAX_ELAPSED_SECONDS
        )));
    }
    Ok(elapsed_seconds as i32)
}

/// Validate a stage points award
pub fn validate_points(points: i32) -> AppResult<i32> {
    if points < 0 {
        return Err(AppError::Validation("points cannot be negative".to_string()));
    }
    if points > MAX_STAGE_POINTS {
        return Err(AppError::Validation(format!(
            "points must be at most {}",
            MAX_STAGE_POINTS
        )));
    }
    Ok(points)
}

/// Validate an elimination plan fingerprint
pub fn validate_fingerprint(fingerprint: &str) -> AppResult<()> {
    if is_sha256_hex(fingerprint) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "fingerprint must be the 64-character value returned by the plan preview".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_elapsed_seconds() {
        assert_eq!(validate_elapsed_seconds(45).unwrap(), 45);
        assert!(validate_elapsed_seconds(0).is_err());
        assert!(validate_elapsed_seconds(-5).is_err());
        assert!(validate_elapsed_seconds(MAX_ELAPSED_SECONDS).is_ok());
        assert!(validate_elapsed_seconds(MAX_ELAPSED_SECONDS + 1).is_err());
    }

    #[test]
    fn test_validate_points() {
        assert_eq!(validate_points(0).unwrap(), 0);
        assert_eq!(validate_points(25).unwrap(), 25);
        assert!(validate_points(-1).is_err());
        assert!(validate_points(MAX_STAGE_POINTS + 1).is_err());
    }

    #[test]
    fn test_validate_fingerprint() {
        assert!(validate_fingerprint(&"a1".repeat(32)).is_ok());
        assert!(validate_fingerprint("").is_err());
        assert!(validate_fingerprint("not-a-digest").is_err());
    }
}
