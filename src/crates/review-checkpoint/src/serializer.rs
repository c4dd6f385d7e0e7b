//! Serialization protocol for checkpoints

use crate::checkpoint::Checkpoint;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Protocol for serializing and deserializing checkpoint data
///
/// Durable stores encode through this trait so the on-disk format is chosen
/// in one place.
pub trait SerializerProtocol: Send + Sync {
    /// Serialize a value to bytes
    fn dumps<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    /// Deserialize a value from bytes
    fn loads<T: for<'de> Deserialize<'de>>(&self, data: &[u8]) -> Result<T>;

    /// Decode and validate a checkpoint record
    fn loads_checkpoint(&self, data: &[u8]) -> Result<Checkpoint> {
        let checkpoint: Checkpoint = self.loads(data)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

/// JSON-based serializer (default)
///
/// Pretty-printed so checkpoint files stay readable for audit.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl SerializerProtocol for JsonSerializer {
    fn dumps<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(value)?)
    }

    fn loads<T: for<'de> Deserialize<'de>>(&self, data: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(data)?)
    }
}
