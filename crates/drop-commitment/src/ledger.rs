//! Off-chain claim ledger.
//!
//! Mirrors the state machine of the on-chain program so a commitment can be
//! rehearsed end to end without a cluster. All mutation goes through
//! `&mut self`; share a ledger across threads behind a `Mutex`.

use std::collections::HashMap;

use solana_program::pubkey::Pubkey;

use crate::{
    bitmap::ClaimBitmap,
    commitment::verify_claim,
    error::LedgerError,
    hash::Digest,
};

/// Custody of the distributed token.
pub trait TokenVault {
    fn balance(&self) -> u64;

    /// Moves `amount` out of custody to `to`. Must leave the vault unchanged
    /// on error.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<(), LedgerError>;
}

/// In-memory vault that also tracks what every recipient has received.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    balance: u64,
    credited: HashMap<Pubkey, u64>,
}

impl MemoryVault {
    pub fn funded(balance: u64) -> Self {
        Self {
            balance,
            credited: HashMap::new(),
        }
    }

    pub fn deposit(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn balance_of(&self, address: &Pubkey) -> u64 {
        self.credited.get(address).copied().unwrap_or(0)
    }
}

impl TokenVault for MemoryVault {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })?;
        let credited = self.credited.entry(*to).or_insert(0);
        *credited = credited
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.balance = remaining;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Claimed {
        index: u64,
        address: Pubkey,
        amount: u64,
    },
    AirdropEnded {
        destination: Pubkey,
        amount: u64,
    },
}

/// Creation parameters; fixed for the lifetime of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub root: Digest,
    pub administrator: Pubkey,
    pub treasury: Pubkey,
    /// Upper bound on the sum of all claim payouts.
    pub max_total_claim: u64,
}

#[derive(Debug)]
pub struct ClaimLedger<V: TokenVault> {
    config: LedgerConfig,
    claimed: ClaimBitmap,
    closed: bool,
    total_amount_claimed: u64,
    num_claimed: u64,
    vault: V,
    events: Vec<LedgerEvent>,
}

impl<V: TokenVault> ClaimLedger<V> {
    pub fn new(config: LedgerConfig, vault: V) -> Self {
        Self {
            config,
            claimed: ClaimBitmap::new(),
            closed: false,
            total_amount_claimed: 0,
            num_claimed: 0,
            vault,
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> &Digest {
        &self.config.root
    }

    pub fn is_claimed(&self, index: u64) -> bool {
        self.claimed.is_claimed(index)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn total_amount_claimed(&self) -> u64 {
        self.total_amount_claimed
    }

    pub fn num_claimed(&self) -> u64 {
        self.num_claimed
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Drains the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Redeems allocation `index` for `address`. Anyone may submit a claim;
    /// the tokens always go to `address`.
    pub fn claim(
        &mut self,
        index: u64,
        address: &Pubkey,
        amount: u64,
        proof: &[Digest],
    ) -> Result<(), LedgerError> {
        if self.claimed.is_claimed(index) {
            return Err(LedgerError::AlreadyClaimed);
        }
        if self.closed {
            return Err(LedgerError::DropClosed);
        }
        if !verify_claim(&self.config.root, index, address, amount, proof) {
            return Err(LedgerError::InvalidProof);
        }

        let total_amount_claimed = self
            .total_amount_claimed
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if total_amount_claimed > self.config.max_total_claim {
            return Err(LedgerError::ExceededMaxClaim);
        }

        self.vault.transfer(address, amount)?;

        self.claimed.set_claimed(index);
        self.total_amount_claimed = total_amount_claimed;
        self.num_claimed += 1;
        self.events.push(LedgerEvent::Claimed {
            index,
            address: *address,
            amount,
        });

        Ok(())
    }

    /// Ends the drop: sweeps whatever the vault holds right now to the
    /// treasury and rejects every later claim. Returns the swept amount.
    pub fn close(&mut self, caller: &Pubkey) -> Result<u64, LedgerError> {
        if *caller != self.config.administrator {
            return Err(LedgerError::Unauthorized);
        }
        if self.closed {
            return Err(LedgerError::DropClosed);
        }

        let amount = self.vault.balance();
        let destination = self.config.treasury;
        self.vault.transfer(&destination, amount)?;
        self.closed = true;
        self.events
            .push(LedgerEvent::AirdropEnded { destination, amount });

        Ok(amount)
    }
}
