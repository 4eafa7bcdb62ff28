//! Conversions from external infrastructure errors into domain errors.

use rusqlite::Error as SqlError;
use teambeat_domain::TeamBeatError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TeamBeatError);

impl From<InfraError> for TeamBeatError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TeamBeatError> for InfraError {
    fn from(value: TeamBeatError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → TeamBeatError */
/* -------------------------------------------------------------------------- */

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let mapped = match err {
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match code.code {
                    ErrorCode::DatabaseBusy => TeamBeatError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        TeamBeatError::Database("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation => TeamBeatError::Database(format!(
                        "constraint violation (code {}): {message}",
                        code.extended_code
                    )),
                    _ => TeamBeatError::Database(format!(
                        "sqlite failure {:?} (code {}): {message}",
                        code.code, code.extended_code
                    )),
                }
            }
            RE::QueryReturnedNoRows => TeamBeatError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                TeamBeatError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                TeamBeatError::Database(format!("invalid column type: {ty}"))
            }
            other => TeamBeatError::Database(other.to_string()),
        };
        InfraError(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → TeamBeatError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        InfraError(TeamBeatError::Database(format!("connection pool error: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → TeamBeatError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        InfraError(TeamBeatError::Database(format!("invalid JSON column value: {err}")))
    }
}
