use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required option is absent or blank. `field` is the camelCase key (`apiKey`).
    MissingOption { field: &'static str },
    BadAppName { app_name: String },
    DuplicateApp { app_name: String },
    NoApp { app_name: String },
    AppDeleted { app_name: String },
    InvalidConfigSource { message: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingOption { field } => {
                write!(f, "Firebase option '{field}' is required but was not provided")
            }
            AppError::BadAppName { app_name } => {
                write!(f, "Illegal App name: '{app_name}'")
            }
            AppError::DuplicateApp { app_name } => write!(
                f,
                "Firebase App named '{app_name}' already exists with different options or config"
            ),
            AppError::NoApp { app_name } => {
                write!(f, "No Firebase App '{app_name}' has been created - call initialize_app() first")
            }
            AppError::AppDeleted { app_name } => {
                write!(f, "Firebase App named '{app_name}' already deleted")
            }
            AppError::InvalidConfigSource { message } => {
                write!(f, "Unable to read Firebase configuration: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
