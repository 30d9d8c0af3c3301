use expense_config::ConfigError;
use expense_core::CoreError;
use thiserror::Error;

/// Unified error type for core, storage and configuration layers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure that ends the CLI session.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::App(AppError::Core(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::App(AppError::Config(err))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, BufRead};

    use super::*;

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    fn first_line(reader: impl BufRead) -> Result<Option<String>, CliError> {
        Ok(reader.lines().next().transpose()?)
    }

    #[test]
    fn script_input_failures_surface_as_io_errors() {
        let err = first_line(io::BufReader::new(FailingReader)).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn core_errors_are_wrapped_in_app_errors() {
        let err = CliError::from(CoreError::RowNotFound(4));
        assert!(matches!(err, CliError::App(AppError::Core(CoreError::RowNotFound(4)))));
    }
}
