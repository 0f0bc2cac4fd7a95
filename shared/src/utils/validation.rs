//! Common validation utilities

/// Length bounds shared by the request DTOs and the domain checks
pub mod limits {
    pub const USERNAME_MIN: u64 = 3;
    pub const USERNAME_MAX: u64 = 16;
    pub const PASSWORD_MIN: u64 = 8;
    pub const PASSWORD_MAX: u64 = 72;
    /// bcrypt ignores everything past this many bytes
    pub const PASSWORD_MAX_BYTES: usize = 72;
}

/// Common validation functions
pub mod validators {
    use super::limits;

    /// Check if a string length in characters is within bounds
    pub fn length_between(value: &str, min: u64, max: u64) -> bool {
        let len = value.chars().count() as u64;
        len >= min && len <= max
    }

    pub fn is_valid_username(username: &str) -> bool {
        length_between(username, limits::USERNAME_MIN, limits::USERNAME_MAX)
    }

    pub fn is_valid_password(password: &str) -> bool {
        length_between(password, limits::PASSWORD_MIN, limits::PASSWORD_MAX)
            && password.len() <= limits::PASSWORD_MAX_BYTES
    }
}
