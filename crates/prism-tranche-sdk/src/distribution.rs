/*!
# Distributions

A distribution is a named, ordered list of tranches sharing one token. It is
described by a YAML file:

```yaml
name: season-1
decimals: 18
tranches:
  - name: week-1
    allocations_file: allocations/week-1.json
  - name: week-2
    allocations_file: allocations/week-2.csv
    format: csv
```

Relative `allocations_file` paths resolve against the config file's directory.
Tranches compile in listed order, which is also the order they are meant to be
seeded in.
*/

use prism_tranche_csvs::{
    read_allocations_csv, read_allocations_json, LoaderConfig, TrancheManifest,
    DEFAULT_TOKEN_DECIMALS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{CompiledTranche, CompilerError, CompilerResult, TrancheCompiler, TrancheOutputs};

/// Largest decimals whose scale factor fits in u128.
pub const MAX_TOKEN_DECIMALS: u32 = 38;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrancheSource {
    pub name: String,
    pub allocations_file: PathBuf,
    #[serde(default)]
    pub format: AllocationFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub name: String,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    pub tranches: Vec<TrancheSource>,
}

fn default_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

impl DistributionConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> CompilerResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> CompilerResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CompilerResult<()> {
        if self.decimals > MAX_TOKEN_DECIMALS {
            return Err(CompilerError::InvalidConfig(format!(
                "decimals must be at most {}, got {}",
                MAX_TOKEN_DECIMALS, self.decimals
            )));
        }

        if self.tranches.is_empty() {
            return Err(CompilerError::InvalidConfig(format!(
                "distribution '{}' has no tranches",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for tranche in &self.tranches {
            // Tranche names become output file names
            let valid_name = !tranche.name.is_empty()
                && tranche
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid_name {
                return Err(CompilerError::InvalidConfig(format!(
                    "invalid tranche name '{}': use ASCII letters, digits, '-' or '_'",
                    tranche.name
                )));
            }

            if !seen.insert(tranche.name.as_str()) {
                return Err(CompilerError::InvalidConfig(format!(
                    "duplicate tranche name '{}'",
                    tranche.name
                )));
            }
        }

        Ok(())
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            decimals: self.decimals,
        }
    }
}

/// Every tranche of a distribution, compiled in config order.
#[derive(Debug, Clone)]
pub struct CompiledDistribution {
    pub name: String,
    pub decimals: u32,
    pub tranches: Vec<CompiledTranche>,
}

impl CompiledDistribution {
    pub fn tranche(&self, name: &str) -> Option<&CompiledTranche> {
        self.tranches.iter().find(|tranche| tranche.name() == name)
    }

    pub fn manifests(&self) -> Vec<TrancheManifest> {
        self.tranches.iter().map(CompiledTranche::manifest).collect()
    }

    /// Checked sum of every tranche's total allocation.
    pub fn total_allocation(&self) -> CompilerResult<u128> {
        self.tranches.iter().try_fold(0u128, |total, tranche| {
            total.checked_add(tranche.total_allocation()).ok_or_else(|| {
                CompilerError::InvalidConfig(format!(
                    "total allocation of distribution '{}' overflows u128",
                    self.name
                ))
            })
        })
    }

    pub fn write_to_dir(&self, dir: &Path) -> CompilerResult<Vec<TrancheOutputs>> {
        self.tranches
            .iter()
            .map(|tranche| tranche.write_to_dir(dir))
            .collect()
    }
}

/// Load and compile every tranche of `config`, resolving files against `base_dir`.
pub fn compile_distribution(
    config: &DistributionConfig,
    base_dir: &Path,
) -> CompilerResult<CompiledDistribution> {
    config.validate()?;

    let loader_config = config.loader_config();
    let compiler = TrancheCompiler::new(config.decimals);

    let tranches = config
        .tranches
        .iter()
        .map(|source| {
            let path = base_dir.join(&source.allocations_file);
            let entries = match source.format {
                AllocationFormat::Json => read_allocations_json(&path, &loader_config)?,
                AllocationFormat::Csv => read_allocations_csv(&path, &loader_config)?,
            };
            compiler.compile(source.name.clone(), entries)
        })
        .collect::<CompilerResult<Vec<_>>>()?;

    info!(
        distribution = %config.name,
        tranches = tranches.len(),
        "Compiled distribution"
    );

    Ok(CompiledDistribution {
        name: config.name.clone(),
        decimals: config.decimals,
        tranches,
    })
}

/// Load the YAML config at `path` and compile it relative to its own directory.
pub fn compile_distribution_file<P: AsRef<Path>>(path: P) -> CompilerResult<CompiledDistribution> {
    let path = path.as_ref();
    let config = DistributionConfig::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    compile_distribution(&config, base_dir)
}
