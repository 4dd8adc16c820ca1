/*!
# Allocation Loading & Export I/O

Reads allocation lists (CSV or JSON) into fixed-point [`AllocationEntry`] values
and reads/writes the claims and manifest JSON files a compiled tranche produces.
*/

use crate::{
    amounts::{parse_token_amount, DEFAULT_TOKEN_DECIMALS},
    errors::{CsvError, CsvResult},
    schemas::{
        AllocationCsvRow, AllocationEntry, ClaimsFile, TrancheManifest, ALLOCATIONS_CSV_HEADERS,
    },
};
use csv::{Reader, Writer};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use solana_pubkey::Pubkey;
use std::collections::{btree_map::Entry, BTreeMap};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// How raw allocation amounts are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Implied decimals of the distributed token
    pub decimals: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

/// JSON allocation amounts may be written as strings or as plain integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Integer(u64),
}

impl RawAmount {
    fn into_text(self) -> String {
        match self {
            RawAmount::Text(text) => text,
            RawAmount::Integer(value) => value.to_string(),
        }
    }
}

/// Every `(address, amount)` pair of a JSON allocation object in document order.
///
/// Repeated keys are kept so conflicting amounts reach [`normalize_allocations`]
/// instead of being overwritten by the last occurrence.
struct RawAllocations(Vec<(String, RawAmount)>);

impl<'de> Deserialize<'de> for RawAllocations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = RawAllocations;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping recipient addresses to amounts")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry::<String, RawAmount>()? {
                    pairs.push(pair);
                }
                Ok(RawAllocations(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

// ================================================================================================
// Normalization
// ================================================================================================

/// Parse raw `(address, amount)` text pairs into sorted allocation entries.
///
/// Exact duplicate rows collapse into one entry. The same recipient listed with
/// two different amounts is rejected: it would commit two leaves for one claim
/// flag.
pub fn normalize_allocations<I>(raw: I, config: &LoaderConfig) -> CsvResult<Vec<AllocationEntry>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries: BTreeMap<Pubkey, u128> = BTreeMap::new();
    let mut row_count = 0usize;

    for (address, amount_text) in raw {
        row_count += 1;

        let recipient = Pubkey::from_str(address.trim())
            .map_err(|e| CsvError::InvalidPubkey(format!("'{}': {}", address, e)))?;
        let amount = parse_token_amount(&amount_text, config.decimals)?;

        match entries.entry(recipient) {
            Entry::Vacant(slot) => {
                slot.insert(amount);
            }
            Entry::Occupied(existing) if *existing.get() == amount => {}
            Entry::Occupied(existing) => {
                return Err(CsvError::DataInconsistency(format!(
                    "Recipient {} is listed with amounts {} and {}",
                    recipient,
                    existing.get(),
                    amount
                )));
            }
        }
    }

    if entries.is_empty() {
        return Err(CsvError::SchemaValidation(
            "Allocation list is empty".to_string(),
        ));
    }

    debug!(
        rows = row_count,
        recipients = entries.len(),
        "Normalized allocation list"
    );

    Ok(entries
        .into_iter()
        .map(|(recipient, amount)| AllocationEntry { recipient, amount })
        .collect())
}

/// Checked sum of all allocation amounts.
pub fn total_allocation(entries: &[AllocationEntry]) -> CsvResult<u128> {
    entries.iter().try_fold(0u128, |total, entry| {
        total.checked_add(entry.amount).ok_or_else(|| {
            CsvError::DataInconsistency("Total allocation overflows u128".to_string())
        })
    })
}

// ================================================================================================
// Allocation Reading
// ================================================================================================

/// Read an allocation CSV (`recipient,amount`) from any reader.
pub fn parse_allocations_csv<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> CsvResult<Vec<AllocationEntry>> {
    let mut rdr = Reader::from_reader(reader);

    // Validate headers
    let headers = rdr.headers()?;
    validate_headers(headers.iter(), ALLOCATIONS_CSV_HEADERS, "allocations.csv")?;

    let mut raw = Vec::new();
    for result in rdr.deserialize() {
        let row: AllocationCsvRow = result?;
        raw.push((row.recipient.to_string(), row.amount));
    }

    normalize_allocations(raw, config)
}

/// Read and validate an allocation CSV file
pub fn read_allocations_csv<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> CsvResult<Vec<AllocationEntry>> {
    let file = File::open(path)?;
    parse_allocations_csv(BufReader::new(file), config)
}

/// Read a JSON allocation object (`{ "<recipient>": "<amount>" }`) from any reader.
pub fn parse_allocations_json<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> CsvResult<Vec<AllocationEntry>> {
    let RawAllocations(pairs) = serde_json::from_reader(reader)?;
    normalize_allocations(
        pairs
            .into_iter()
            .map(|(address, amount)| (address, amount.into_text())),
        config,
    )
}

/// Read and validate a JSON allocation file
pub fn read_allocations_json<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> CsvResult<Vec<AllocationEntry>> {
    let file = File::open(path)?;
    parse_allocations_json(BufReader::new(file), config)
}

// ================================================================================================
// Writing
// ================================================================================================

/// Write an allocation CSV (csv crate writes the headers)
pub fn write_allocations_csv<P: AsRef<Path>>(path: P, rows: &[AllocationCsvRow]) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_claims_json<P: AsRef<Path>>(path: P, claims: &ClaimsFile) -> CsvResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, claims)?;
    writer.flush()?;
    Ok(())
}

pub fn read_claims_json<P: AsRef<Path>>(path: P) -> CsvResult<ClaimsFile> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn write_manifest_json<P: AsRef<Path>>(path: P, manifest: &TrancheManifest) -> CsvResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writer.flush()?;
    Ok(())
}

pub fn read_manifest_json<P: AsRef<Path>>(path: P) -> CsvResult<TrancheManifest> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

// ================================================================================================
// Header Validation
// ================================================================================================

fn validate_headers<'a, I>(actual: I, expected: &[&str], file_type: &str) -> CsvResult<()>
where
    I: Iterator<Item = &'a str>,
{
    let actual_headers: Vec<&str> = actual.collect();

    if actual_headers.len() != expected.len() {
        return Err(CsvError::SchemaValidation(format!(
            "{}: expected {} headers, found {}",
            file_type,
            expected.len(),
            actual_headers.len()
        )));
    }

    for (i, (actual, expected)) in actual_headers.iter().zip(expected.iter()).enumerate() {
        if actual != expected {
            return Err(CsvError::SchemaValidation(format!(
                "{}: header {} should be '{}', found '{}'",
                file_type,
                i + 1,
                expected,
                actual
            )));
        }
    }

    Ok(())
}

// ================================================================================================
// Tests
// ================================================================================================
