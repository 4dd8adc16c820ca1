/*!
# Prism Tranche File Schemas

This crate is the **single source of truth** for the files a tranche moves
through before it is seeded:

- **Allocation lists** (producer: allocation authors, consumer: tranche compiler)
- **Claims files** (producer: tranche compiler, consumer: recipients / claim frontends)
- **Manifests** (producer: tranche compiler, consumer: whoever seeds the registry)

## Allocation CSV (`allocations.csv`)
- `recipient`: Solana public key (base58)
- `amount`: Decimal token amount, scaled by the configured decimals (default 18)

## Allocation JSON
An object mapping base58 recipients to decimal amount strings:

```json
{ "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T": "12.5" }
```

## Usage

```rust,no_run
use prism_tranche_csvs::{read_allocations_csv, total_allocation, CsvResult, LoaderConfig};

fn example() -> CsvResult<()> {
    let entries = read_allocations_csv("allocations.csv", &LoaderConfig::default())?;
    let total = total_allocation(&entries)?;
    println!("{} recipients, {} base units", entries.len(), total);
    Ok(())
}
```
*/

pub mod amounts;
pub mod errors;
pub mod loader;
pub mod schemas;

// Re-export main types for convenience
pub use amounts::{format_token_amount, parse_token_amount, DEFAULT_TOKEN_DECIMALS};
pub use errors::{CsvError, CsvResult};
pub use loader::{
    normalize_allocations, parse_allocations_csv, parse_allocations_json, read_allocations_csv,
    read_allocations_json, read_claims_json, read_manifest_json, total_allocation,
    write_allocations_csv, write_claims_json, write_manifest_json, LoaderConfig,
};
pub use schemas::{
    AllocationCsvRow, AllocationEntry, ClaimExport, ClaimsFile, TrancheManifest,
    ALLOCATIONS_CSV_HEADERS,
};
