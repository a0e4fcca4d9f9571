use thiserror::Error;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Store read failed: {message}")]
    StoreRead { message: String },

    #[error("Store write failed: {message}")]
    StoreWrite { message: String },

    #[error("No favorite movie with id {id}")]
    RecordNotFound { id: u64 },

    #[error("No movie found for '{title}' ({year})")]
    DetailLookupMiss { title: String, year: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No cell registered for identifier '{identifier}'")]
    CellUnavailable { identifier: String },

    #[error("Row {index} is out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Lookup,
    Network,
    Configuration,
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FavoritesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreRead { .. }
            | Self::StoreWrite { .. }
            | Self::RecordNotFound { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::Store,
            Self::DetailLookupMiss { .. } => ErrorCategory::Lookup,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::CellUnavailable { .. } | Self::RowOutOfRange { .. } => {
                ErrorCategory::Presentation
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DetailLookupMiss { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::RowOutOfRange { .. } => ErrorSeverity::Medium,
            Self::StoreRead { .. }
            | Self::StoreWrite { .. }
            | Self::RecordNotFound { .. }
            | Self::CellUnavailable { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Store => {
                "Check that the favorites file exists, is valid JSON and that its directory is writable"
            }
            ErrorCategory::Lookup => "Check the movie title and year, or try again later",
            ErrorCategory::Network => {
                "Check your network connection and the OMDb endpoint/API key, then retry"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and command line flags"
            }
            ErrorCategory::Presentation => "Pick a row number shown by `movie-favorites list`",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StoreRead { .. } => "Could not read your favorites".to_string(),
            Self::StoreWrite { .. } | Self::RecordNotFound { .. } => {
                "Could not update your favorites".to_string()
            }
            Self::DetailLookupMiss { title, year } => {
                format!("No details found for {} ({})", title, year)
            }
            Self::ApiError(_) => "The movie catalog service could not be reached".to_string(),
            Self::MissingConfigError { field } => format!("Missing setting: {}", field),
            Self::RowOutOfRange { index, .. } => format!("There is no favorite at row {}", index + 1),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FavoritesError>;
