use thiserror::Error;

/// Reasons a flow-log line is rejected.
///
/// Every variant is a silent skip during aggregation; the type exists so
/// callers and tests can tell rejections apart.
///
/// # Examples
/// ```
/// use flowtag_core::FlowLogError;
///
/// let err = FlowLogError::UnsupportedProtocol {
///     number: "0".to_string(),
/// };
/// assert!(err.to_string().contains("unsupported protocol"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowLogError {
    #[error("line does not match the version 2 flow log format")]
    Malformed,
    #[error("too few fields: need {needed}, got {found}")]
    TooFewFields { needed: usize, found: usize },
    #[error("unsupported flow log version: {version}")]
    UnsupportedVersion { version: String },
    #[error("unsupported protocol number: {number}")]
    UnsupportedProtocol { number: String },
}
