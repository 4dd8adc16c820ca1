use solana_pubkey::Pubkey;

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error(transparent)]
    Csv(#[from] prism_tranche_csvs::CsvError),

    #[error(transparent)]
    Merkle(#[from] prism_tranche_merkle::MerkleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Recipient {recipient} is listed with amounts {first} and {second}")]
    ConflictingAllocation {
        recipient: Pubkey,
        first: u128,
        second: u128,
    },

    #[error("Recipient {recipient} is not part of tranche '{tranche}'")]
    RecipientNotFound { tranche: String, recipient: Pubkey },

    #[error("Proof for {0} does not verify against its own root")]
    ProofSelfCheck(Pubkey),
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;
