use thiserror::Error;

/// Failures while building a commitment or generating a proof.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Empty input provided")]
    EmptyInput,
    #[error("Index {index} out of range for tree with {leaves} leaves")]
    IndexOutOfRange { index: usize, leaves: usize },
    #[error("Duplicate address at index {index}: {address}")]
    DuplicateAddress { index: usize, address: String },
    #[error("Arithmetic overflow while summing allocations")]
    ArithmeticOverflow,
}

/// Reasons a ledger operation is rejected. Each variant is a distinct,
/// stable reason that callers can match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Drop already claimed.")]
    AlreadyClaimed,
    #[error("Invalid proof.")]
    InvalidProof,
    #[error("Drop closed.")]
    DropClosed,
    #[error("Unauthorized - caller is not the administrator")]
    Unauthorized,
    #[error("Claim would exceed the committed token total")]
    ExceededMaxClaim,
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}
