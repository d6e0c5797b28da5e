use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - always an in-memory database
    Test,
}

/// Resolve the database URL for the given profile.
///
/// - `Test` always uses an in-memory SQLite database so suites cannot touch
///   real data.
/// - `Prod` reads `DATABASE_URL`, falling back to a local SQLite file.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
        DbProfile::Prod => {
            match env::var("DATABASE_URL") {
                Ok(url) if !url.trim().is_empty() => {
                    // Enforce safety: prod must never point at an in-memory database
                    if url.contains(":memory:") {
                        return Err(AppError::config(
                            "DATABASE_URL must not be an in-memory database in the Prod profile",
                        ));
                    }
                    Ok(url)
                }
                _ => Ok("sqlite://tactix.db?mode=rwc".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::{db_url, DbProfile};

    #[test]
    fn test_db_url_test_profile_is_in_memory() {
        let url = db_url(DbProfile::Test).unwrap();
        assert_eq!(url, "sqlite::memory:");
    }

    // The Prod tests mutate DATABASE_URL, which is process-global state.
    #[test]
    #[serial]
    fn test_db_url_prod_defaults_to_file() {
        env::remove_var("DATABASE_URL");
        let url = db_url(DbProfile::Prod).unwrap();
        assert_eq!(url, "sqlite://tactix.db?mode=rwc");
    }

    #[test]
    #[serial]
    fn test_db_url_prod_rejects_in_memory() {
        env::set_var("DATABASE_URL", "sqlite::memory:");
        let result = db_url(DbProfile::Prod);
        env::remove_var("DATABASE_URL");
        assert!(result.is_err());
    }
}
