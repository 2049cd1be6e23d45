/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// snapshot input, report formatting, report output and console progress.
pub mod outbound;
