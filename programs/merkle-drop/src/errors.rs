use anchor_lang::prelude::*;

#[error_code]
pub enum MerkleDropError {
    #[msg("Drop already claimed.")]
    AlreadyClaimed,

    #[msg("Invalid proof.")]
    InvalidProof,

    #[msg("Drop closed.")]
    DropClosed,

    #[msg("Unauthorized - signer is not the authority")]
    Unauthorized,

    #[msg("Claim would exceed the committed token total")]
    ExceededMaxClaim,

    #[msg("Invalid leaf index - out of bounds")]
    InvalidLeafIndex,

    #[msg("Invalid bitmap size - leaf count must be between 1 and the bitmap limit")]
    InvalidBitmapSize,

    #[msg("Vault mismatch - provided vault does not match distributor vault")]
    VaultMismatch,

    #[msg("Treasury mismatch - provided account is not the distributor treasury")]
    TreasuryMismatch,

    #[msg("Recipient token account is not owned by the claimed address or holds the wrong mint")]
    RecipientMismatch,

    #[msg("Arithmetic overflow occurred")]
    ArithmeticOverflow,
}
