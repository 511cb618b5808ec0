use crate::common::error::VcsError;

/// Result alias used across the crate.
///
/// # Examples
///
/// ```
/// use vcsview::common::result::VcsResult;
/// use vcsview::common::error::VcsError;
///
/// fn marker_check(found: bool) -> VcsResult<()> {
///     if found {
///         Ok(())
///     } else {
///         Err(VcsError::path("/srv/project", "marker .git is missing"))
///     }
/// }
///
/// assert!(marker_check(true).is_ok());
/// assert!(marker_check(false).is_err());
/// ```
pub type VcsResult<T> = Result<T, VcsError>;
