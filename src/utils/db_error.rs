//! Driver error classification.

/// Column guarded by the unique index on short codes.
const CODE_COLUMN: &str = "urls.shortened_url";

/// Returns true when `e` is a unique violation on the short code column.
///
/// SQLite does not report constraint names, so the column is matched against
/// the driver message (`UNIQUE constraint failed: urls.shortened_url`).
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    match db_err.constraint() {
        Some(constraint) => constraint.contains("shortened_url"),
        None => db_err.message().contains(CODE_COLUMN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }
}
