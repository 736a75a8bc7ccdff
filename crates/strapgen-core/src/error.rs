use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("please input an API name")]
    MissingApiName,

    #[error("please choose what to generate (gp, p, l or r)")]
    MissingMode,

    #[error("invalid mode '{0}': expected one of gp, p, l, r")]
    InvalidMode(String),

    #[error("api not found: {0}")]
    ApiNotFound(String),

    #[error("invalid api name '{0}'")]
    InvalidApiName(String),

    #[error("please input a policy name")]
    MissingPolicyName,

    #[error("invalid policy name '{0}': use letters, digits, '-' or '_'")]
    InvalidPolicyName(String),

    #[error("please choose a route or lifecycle event")]
    MissingRoute,

    #[error("unknown core route '{0}': expected one of create, find, findOne, update, delete")]
    UnknownCoreRoute(String),

    #[error("unknown lifecycle event '{0}'")]
    UnknownLifecycleEvent(String),

    #[error("invalid custom route '{0}': must be a JavaScript identifier")]
    InvalidCustomRoute(String),

    #[error("'{uid}' not found in {file}")]
    UidNotFound { uid: String, file: String },

    #[error("malformed {file}: {reason}")]
    Malformed { file: String, reason: String },

    #[error("invalid route config in {file}: {reason}")]
    InvalidRouteConfig { file: String, reason: String },

    #[error("lifecycle '{0}' is already defined")]
    LifecycleExists(String),

    #[error("route '{0}' is already registered")]
    RouteExists(String),

    #[error("missing file: {0}")]
    MissingFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Errors caused by what the user asked for rather than by project state.
    /// These are reported without touching any file.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            GenError::MissingApiName
                | GenError::MissingMode
                | GenError::InvalidMode(_)
                | GenError::ApiNotFound(_)
                | GenError::InvalidApiName(_)
                | GenError::MissingPolicyName
                | GenError::InvalidPolicyName(_)
                | GenError::MissingRoute
                | GenError::UnknownCoreRoute(_)
                | GenError::UnknownLifecycleEvent(_)
                | GenError::InvalidCustomRoute(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
