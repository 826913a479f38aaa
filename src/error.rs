#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage backend failed: {0}")]
    Backend(#[from] sled::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("failed to encode cart lines: {0}")]
    Encode(String),
    #[error("failed to decode persisted cart: {0}")]
    Decode(#[from] minicbor::decode::Error),
    #[error("persisted cart has unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("persisted cart digest does not match its contents")]
    DigestMismatch,
}

/// Raised by mutating cart operations when the change could not be made
/// durable. The in-memory mutation has already been applied.
#[derive(thiserror::Error, Debug)]
pub enum CartError {
    #[error("cart could not be persisted: {0}")]
    Persistence(#[from] StorageError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No product with id {0} in the catalog")]
    UnknownProduct(String),
    #[error("Product id {0} already exists in the catalog")]
    DuplicateProduct(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
