use thiserror::Error;

/// Reason an insertion could not be attempted.
///
/// A duplicate key is not an error: `insert` reports it as `Ok(false)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The entry log has reached the ceiling imposed by the index width.
    /// The map is unchanged and remains usable.
    #[error("ordered string map is full (capacity {capacity} entries)")]
    Full {
        /// Maximum number of entries for the map's index type.
        capacity: usize,
    },
}
