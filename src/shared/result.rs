/// Result alias used across the crate.
///
/// Typed failures are `ScanError` values wrapped in `anyhow::Error`, so callers
/// can downcast when they need to tell a configuration problem from an I/O one.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
