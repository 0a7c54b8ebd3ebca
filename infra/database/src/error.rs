use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when authentication fails.
    #[error("Authentication failed{}: {message}", format_context(context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or invariant violations.
    #[error("Migration error{}: {message}", format_context(context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<surrealdb::Error> for DatabaseError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Surreal { source, context: None }
    }
}

impl From<&'static str> for DatabaseError {
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for DatabaseError {
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

/// Adds `.context(...)` to results carrying [`DatabaseError`] or raw
/// `SurrealDB` errors.
pub trait DatabaseErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError>;
}

impl<T> DatabaseErrorExt<T> for Result<T, DatabaseError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                DatabaseError::Validation { context: c, .. }
                | DatabaseError::Connection { context: c, .. }
                | DatabaseError::Auth { context: c, .. }
                | DatabaseError::Surreal { context: c, .. }
                | DatabaseError::Migration { context: c, .. }
                | DatabaseError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> DatabaseErrorExt<T> for Result<T, surrealdb::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError> {
        self.map_err(|source| DatabaseError::Surreal { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
