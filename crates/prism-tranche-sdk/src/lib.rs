/*!
# Prism Tranche SDK

Off-chain tooling for tranche distributions: load allocation lists, compile
them into merkle roots and totals for seeding, and export the per-recipient
proofs that claims are made with.

```rust,no_run
use prism_tranche_sdk::{compile_distribution_file, CompilerResult};
use std::path::Path;

fn example() -> CompilerResult<()> {
    let distribution = compile_distribution_file("distribution.yaml")?;
    for manifest in distribution.manifests() {
        println!("{}: {} tokens", manifest.name, manifest.total_allocation_display);
    }
    distribution.write_to_dir(Path::new("out"))?;
    Ok(())
}
```
*/

mod compiler_error;
mod distribution;
mod tranche_compiler;

pub use compiler_error::{CompilerError, CompilerResult};
pub use distribution::{
    compile_distribution, compile_distribution_file, AllocationFormat, CompiledDistribution,
    DistributionConfig, TrancheSource, MAX_TOKEN_DECIMALS,
};
pub use tranche_compiler::{CompiledTranche, TrancheCompiler, TrancheOutputs};

pub use prism_tranche_csvs::{ClaimExport, ClaimsFile, TrancheManifest};
