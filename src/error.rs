use thiserror::Error;

pub type Result<T, E = BoardError> = std::result::Result<T, E>;

/// Errors surfaced by the board model. All of them are caller contract
/// violations; none is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("cell index {index} is outside 0..50")]
    IndexOutOfRange { index: i64 },
    #[error("board accessed before the first reset")]
    UninitializedAccess,
    #[error("board size must be a positive finite number, got {size}")]
    InvalidSize { size: f64 },
    #[error("grid position ({column}, {row}) is outside the 10x10 grid")]
    PositionOutOfRange { column: i64, row: i64 },
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("layout descriptor disagrees with this board at cell index {index}")]
    LayoutMismatch { index: usize },
}

/// Decoding failures of a layout descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout descriptor too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid layout descriptor magic (expected CKLY)")]
    BadMagic,
    #[error("unsupported layout descriptor version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },
    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },
    #[error("layout payload holds {actual} bytes for {count} cells")]
    BadLength { count: usize, actual: usize },
}
