//! Result type alias for the publisher

use super::errors::PublisherError;

/// Result type alias for publisher operations
///
/// # Examples
///
/// ```
/// use smile_publisher::domain::result::Result;
/// use smile_publisher::domain::errors::PublisherError;
///
/// fn failing_function() -> Result<()> {
///     Err(PublisherError::Selection("no mode selected".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PublisherError>;
