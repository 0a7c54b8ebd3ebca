use std::borrow::Cow;

/// Errors that can occur during logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Failure when configuring the rolling file appender (e.g., invalid path).
    #[error("Rolling file appender error{}: {source}", format_context(context))]
    Appender {
        #[source]
        source: tracing_appender::rolling::InitError,
        context: Option<Cow<'static, str>>,
    },

    /// Occurs if a global tracing subscriber has already been initialized in the current process.
    #[error("Tracing subscriber error{}: {source}", format_context(context))]
    Subscriber {
        #[source]
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Internal logic errors.
    #[error("Internal logger error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Invalid configuration supplied to the logger builder.
    #[error("Invalid logger configuration{}: {message}", format_context(context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<tracing_appender::rolling::InitError> for LoggerError {
    fn from(source: tracing_appender::rolling::InitError) -> Self {
        Self::Appender { source, context: None }
    }
}

impl From<tracing_subscriber::util::TryInitError> for LoggerError {
    fn from(source: tracing_subscriber::util::TryInitError) -> Self {
        Self::Subscriber { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
