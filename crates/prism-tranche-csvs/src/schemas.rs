/*!
# Allocation & Export Schemas

This module defines the file schemas a tranche moves through:

- **Allocation CSV** (`recipient,amount`): the authored allocation list
- **Allocation JSON** (`{ "<recipient>": "<amount>" }`): the same list as an object
- **Claims JSON**: per-recipient `(amount, proof)` records handed to recipients
- **Manifest JSON**: the root and total used to seed the tranche

Pubkeys are base58, digests are lowercase hex without a `0x` prefix, and base
unit amounts are decimal strings so they survive JSON consumers that only have
doubles.
*/

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use std::str::FromStr;

// ================================================================================================
// Allocation CSV Schema
// ================================================================================================

/// Expected headers for an allocation CSV in exact order
pub const ALLOCATIONS_CSV_HEADERS: &[&str] = &["recipient", "amount"];

/// Row structure for an allocation CSV
///
/// **Purpose**: One recipient's allocation in human-readable token units
/// **Producer**: Allocation authors / upstream reward computations
/// **Consumers**: Tranche compiler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationCsvRow {
    /// Recipient's Solana public key in base58 format
    #[serde(
        deserialize_with = "deserialize_pubkey",
        serialize_with = "serialize_pubkey"
    )]
    pub recipient: Pubkey,

    /// Decimal token amount (e.g. "12.5"), scaled by the configured decimals on load
    pub amount: String,
}

/// A parsed allocation: recipient and amount in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllocationEntry {
    pub recipient: Pubkey,
    pub amount: u128,
}

// ================================================================================================
// Claims JSON Schema
// ================================================================================================

/// What a recipient needs to submit a claim against one tranche.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimExport {
    #[serde(
        deserialize_with = "deserialize_pubkey",
        serialize_with = "serialize_pubkey"
    )]
    pub recipient: Pubkey,

    /// Amount in base units
    #[serde(deserialize_with = "deserialize_u128", serialize_with = "serialize_u128")]
    pub amount: u128,

    /// Sibling hashes from leaf to root
    #[serde(
        deserialize_with = "deserialize_hex_vec",
        serialize_with = "serialize_hex_vec"
    )]
    pub proof: Vec<[u8; 32]>,
}

/// A tranche's claims file: root plus every recipient's export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimsFile {
    pub tranche: String,

    #[serde(deserialize_with = "deserialize_hex", serialize_with = "serialize_hex")]
    pub merkle_root: [u8; 32],

    pub claims: Vec<ClaimExport>,
}

// ================================================================================================
// Manifest JSON Schema
// ================================================================================================

/// Seeding parameters for one compiled tranche.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrancheManifest {
    pub name: String,

    #[serde(deserialize_with = "deserialize_hex", serialize_with = "serialize_hex")]
    pub merkle_root: [u8; 32],

    /// Total allocation in base units
    #[serde(deserialize_with = "deserialize_u128", serialize_with = "serialize_u128")]
    pub total_allocation: u128,

    /// Total allocation in token units, for humans reviewing the manifest
    pub total_allocation_display: String,

    pub decimals: u32,

    pub recipient_count: usize,
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

/// Deserialize base58 string to Pubkey
fn deserialize_pubkey<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}

/// Serialize Pubkey to base58 string
fn serialize_pubkey<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&pubkey.to_string())
}

fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<u128>().map_err(serde::de::Error::custom)
}

fn serialize_u128<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn decode_hash(s: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| format!("Expected 32 bytes, got {}", bytes.len()))
}

/// Deserialize hex string to [u8; 32]
fn deserialize_hex<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_hash(&s).map_err(serde::de::Error::custom)
}

/// Serialize [u8; 32] to hex string
fn serialize_hex<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(bytes))
}

fn deserialize_hex_vec<'de, D>(deserializer: D) -> Result<Vec<[u8; 32]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let hashes = Vec::<String>::deserialize(deserializer)?;
    hashes
        .iter()
        .map(|s| decode_hash(s).map_err(serde::de::Error::custom))
        .collect()
}

fn serialize_hex_vec<S>(hashes: &[[u8; 32]], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(hashes.iter().map(hex::encode))
}

// ================================================================================================
// Tests
// ================================================================================================
