//! Command implementations and the argument groups they share.

use std::error::Error;
use std::fs;
use std::io::{self, Read};

use clap::Args;
use prost_reflect::{DescriptorPool, DynamicMessage};
use protohash::{Digest, HasherConfig, PrimitiveKind, ProtoHasher};

pub mod hash;
pub mod messages;
pub mod verify;

/// Failures specific to the CLI, as opposed to I/O or decoding errors.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The requested type is not in the descriptor set.
    #[error("message type {name} not found in {descriptor_set}")]
    UnknownMessage {
        /// Fully-qualified name that was asked for.
        name: String,
        /// Descriptor set that was searched.
        descriptor_set: String,
    },
    /// The recomputed digest differs from the expected one.
    #[error("digest mismatch: expected {expected}, computed {computed}")]
    Mismatch {
        /// Digest given on the command line.
        expected: Digest,
        /// Digest of the payload.
        computed: Digest,
    },
}

/// Which payload to hash and how to decode it.
#[derive(Args, Debug)]
pub struct Target {
    /// Payload file (or stdin if not provided)
    pub input: Option<String>,
    /// Serialized FileDescriptorSet describing the payload
    #[arg(long)]
    pub descriptor_set: String,
    /// Fully-qualified message type of the payload
    #[arg(long)]
    pub message: String,
    /// Payload is protobuf binary instead of proto3 JSON
    #[arg(long)]
    pub binary: bool,
}

/// Hasher settings; flags override the config file.
#[derive(Args, Debug)]
pub struct HasherOptions {
    /// Digest primitive (fnv1a64 or sha256)
    #[arg(long)]
    pub primitive: Option<PrimitiveKind>,
    /// Maximum message nesting depth
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// JSON hasher configuration file
    #[arg(long)]
    pub config: Option<String>,
}

impl HasherOptions {
    /// Loads the config file, if any, then applies explicit flags.
    pub fn resolve(&self) -> Result<HasherConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config {}: {}", path, e))?;
                serde_json::from_str::<HasherConfig>(&text)
                    .map_err(|e| format!("Invalid config {}: {}", path, e))?
            }
            None => HasherConfig::default(),
        };
        if let Some(primitive) = self.primitive {
            config.primitive = primitive;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        Ok(config)
    }
}

/// Decodes a serialized `FileDescriptorSet`.
pub fn load_pool(path: &str) -> Result<DescriptorPool, Box<dyn Error>> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read file {}: {}", path, e))?;
    let pool = DescriptorPool::decode(bytes.as_slice())
        .map_err(|e| format!("Invalid descriptor set {}: {}", path, e))?;
    Ok(pool)
}

/// Reads and decodes the payload named by `target`.
pub fn load_message(target: &Target) -> Result<DynamicMessage, Box<dyn Error>> {
    let pool = load_pool(&target.descriptor_set)?;
    let descriptor =
        pool.get_message_by_name(&target.message)
            .ok_or_else(|| CliError::UnknownMessage {
                name: target.message.clone(),
                descriptor_set: target.descriptor_set.clone(),
            })?;

    let bytes = read_input(target.input.as_deref())?;
    tracing::debug!(
        message = %target.message,
        bytes = bytes.len(),
        binary = target.binary,
        "decoding payload"
    );

    if target.binary {
        let message = DynamicMessage::decode(descriptor, bytes.as_slice())
            .map_err(|e| format!("Invalid binary payload: {}", e))?;
        return Ok(message);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
    let message = DynamicMessage::deserialize(descriptor, &mut deserializer)
        .map_err(|e| format!("Invalid JSON payload: {}", e))?;
    deserializer
        .end()
        .map_err(|e| format!("Invalid JSON payload: {}", e))?;
    Ok(message)
}

fn read_input(input: Option<&str>) -> Result<Vec<u8>, Box<dyn Error>> {
    match input {
        Some(path) => {
            Ok(fs::read(path).map_err(|e| format!("Failed to read file {}: {}", path, e))?)
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Resolves the settings, loads the payload and hashes it.
pub fn compute(
    target: &Target,
    options: &HasherOptions,
) -> Result<(Digest, HasherConfig), Box<dyn Error>> {
    let config = options.resolve()?;
    let message = load_message(target)?;
    let digest = ProtoHasher::from_config(&config)
        .hash_message(&message)
        .map_err(|e| format!("Hashing failed: {}", e))?;
    tracing::info!(
        message = %target.message,
        primitive = %config.primitive,
        digest = %digest,
        "computed digest"
    );
    Ok((digest, config))
}
