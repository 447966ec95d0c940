use thiserror::Error;

/// Fatal validation failures from the forecast engine.
///
/// Every one of these signals that a structural precondition of the analog
/// algorithm was not met. None are retried; the run aborts on the first one
/// and any forecast days already written stay in place.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("window holds {got} dates, expected {expected}")]
    WindowSize { got: usize, expected: usize },
    #[error("{got} windows produced, expected {expected}")]
    WindowCount { got: usize, expected: usize },
    #[error("input list holds {got} days, expected {expected}")]
    InputSize { got: usize, expected: usize },
    #[error("variation vector lists differ in length, {previous} previous year vs {present} present year")]
    VectorSizeMismatch { previous: usize, present: usize },
    #[error("archive is empty, nothing to predict from")]
    EmptyArchive,
    #[error("forecast date out of calendar range")]
    DateRange,
    #[error("error writing forecast output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Error, Debug)]
#[error("error in configuration: {0}")]
pub struct ConfigError(pub String);

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}
