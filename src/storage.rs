//! Durable key-value slot holding the serialized cart
use super::cart::CartLine;
use super::error::{CodecError, StorageError};
use minicbor::bytes::ByteVec;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "shoppingCart";

const FORMAT_VERSION: u8 = 1;

/// A single-slot-per-key durable store.
pub trait CartStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    /// Must not return until the value is durable.
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<S: CartStore + ?Sized> CartStore for &S {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<S: CartStore + ?Sized> CartStore for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

pub struct SledStore {
    instance: Arc<sled::Db>,
}

impl SledStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self::new(Arc::new(db)))
    }
}

impl CartStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self.instance.get(key.as_bytes())?;
        Ok(value.map(|ivec| ivec.to_vec()))
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.instance.insert(key.as_bytes(), value)?;
        self.instance.flush()?;
        Ok(())
    }
}

/// In-process store for tests and throwaway sessions. Reads and writes can
/// be made to fail to simulate a full or broken device store.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Overwrite a slot directly, bypassing the cart encoding.
    pub fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}

impl CartStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("device store unreadable".into()));
        }
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.put_raw(key, value.to_vec())
    }
}

// What actually lands in the slot: the encoded lines plus a digest over them
#[derive(minicbor::Encode, minicbor::Decode, Debug)]
struct PersistedCart {
    #[n(0)]
    version: u8,
    #[n(1)]
    digest: String,
    #[n(2)]
    lines: ByteVec,
}

pub fn encode_cart(lines: &[CartLine]) -> Result<Vec<u8>, CodecError> {
    let encoded = minicbor::to_vec(lines).map_err(|e| CodecError::Encode(e.to_string()))?;
    let digest = sha256::digest(&encoded);

    let envelope = PersistedCart {
        version: FORMAT_VERSION,
        digest,
        lines: ByteVec::from(encoded),
    };

    minicbor::to_vec(&envelope).map_err(|e| CodecError::Encode(e.to_string()))
}

pub fn decode_cart(bytes: &[u8]) -> Result<Vec<CartLine>, CodecError> {
    let envelope: PersistedCart = minicbor::decode(bytes)?;

    if envelope.version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.version));
    }

    let encoded = envelope.lines.to_vec();
    if sha256::digest(&encoded) != envelope.digest {
        return Err(CodecError::DigestMismatch);
    }

    let lines: Vec<CartLine> = minicbor::decode(&encoded)?;
    Ok(lines)
}
