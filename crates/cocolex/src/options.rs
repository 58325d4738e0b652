/// Sizing of the in-memory window a [`ByteWindow`](crate::ByteWindow) keeps
/// over its source.
///
/// ```rust
/// use cocolex::WindowOptions;
///
/// let options = WindowOptions {
///     min_capacity: 16,
///     ..Default::default()
/// };
/// assert_eq!(options.max_capacity, 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Initial capacity of the window, in bytes.
    ///
    /// Non-seekable sources start with this many bytes and double the window
    /// each time it fills up. Seekable sources shorter than this still
    /// allocate it.
    ///
    /// # Default
    ///
    /// `1024`
    pub min_capacity: usize,

    /// Largest window kept over a seekable source, in bytes.
    ///
    /// Sources up to this size are loaded whole; longer ones are read through
    /// a window of this size that is reloaded when reading runs past it.
    /// Non-seekable sources ignore this limit because bytes already read
    /// cannot be fetched again.
    ///
    /// # Default
    ///
    /// `65536`
    pub max_capacity: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            min_capacity: 1024,
            max_capacity: 64 * 1024,
        }
    }
}
