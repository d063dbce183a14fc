use std::sync::{Arc, Mutex};
use std::thread;

use drop_commitment::{
    ClaimLedger, Commitment, LedgerConfig, LedgerError, MemoryVault, TokenVault,
};
use proptest::prelude::*;
use solana_program::pubkey::Pubkey;

const UNCLAIMED_INDEX: u64 = 3845;

fn allocations(count: usize) -> Vec<(Pubkey, u64)> {
    (0..count)
        .map(|i| {
            // Mix of round and odd base-unit amounts.
            let amount = 1_000_000 + (i as u64 * 7_919) % 250_000;
            (Pubkey::new_unique(), amount)
        })
        .collect()
}

struct Deployment {
    commitment: Commitment,
    ledger: ClaimLedger<MemoryVault>,
    administrator: Pubkey,
    treasury: Pubkey,
}

fn deploy(input: &[(Pubkey, u64)]) -> Deployment {
    let commitment = Commitment::build(input).unwrap();
    let administrator = Pubkey::new_unique();
    let treasury = Pubkey::new_unique();
    let ledger = ClaimLedger::new(
        LedgerConfig {
            root: commitment.root,
            administrator,
            treasury,
            max_total_claim: commitment.token_total,
        },
        MemoryVault::funded(commitment.token_total),
    );
    Deployment {
        commitment,
        ledger,
        administrator,
        treasury,
    }
}

#[test]
fn test_build_is_deterministic() {
    let input = allocations(37);
    let first = Commitment::build(&input).unwrap();
    let second = Commitment::build(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_any_single_mutation_changes_root() {
    let input = allocations(10);
    let root = Commitment::build(&input).unwrap().root;

    let mut reamounted = input.clone();
    reamounted[4].1 += 1;
    assert_ne!(Commitment::build(&reamounted).unwrap().root, root);

    let mut readdressed = input.clone();
    readdressed[4].0 = Pubkey::new_unique();
    assert_ne!(Commitment::build(&readdressed).unwrap().root, root);

    // Swapping two entries changes both of their indices.
    let mut reordered = input.clone();
    reordered.swap(3, 4);
    assert_ne!(Commitment::build(&reordered).unwrap().root, root);

    let mut removed = input.clone();
    removed.pop();
    assert_ne!(Commitment::build(&removed).unwrap().root, root);

    let mut added = input;
    added.push((Pubkey::new_unique(), 1));
    assert_ne!(Commitment::build(&added).unwrap().root, root);
}

#[test]
fn test_every_proof_claims_exactly_once() {
    let mut deployment = deploy(&allocations(25));
    for entry in &deployment.commitment.entries {
        let a = entry.allocation;
        assert!(!deployment.ledger.is_claimed(a.index));
        deployment.ledger
            .claim(a.index, &a.address, a.amount, &entry.proof)
            .unwrap();
        assert!(deployment.ledger.is_claimed(a.index));
        assert_eq!(
            deployment.ledger.claim(a.index, &a.address, a.amount, &entry.proof),
            Err(LedgerError::AlreadyClaimed)
        );
    }
    assert_eq!(deployment.ledger.vault().balance(), 0);
    assert_eq!(deployment.ledger.num_claimed(), 25);
}

#[test]
fn test_mismatched_fields_fail_as_invalid_proof() {
    let mut deployment = deploy(&allocations(8));
    let entry = deployment.commitment.entries[5].clone();
    let other = deployment.commitment.entries[6].clone();
    let a = entry.allocation;

    let attempts = [
        (a.index, Pubkey::new_unique(), a.amount, entry.proof.clone()),
        (a.index, a.address, a.amount + 1, entry.proof.clone()),
        (a.index, a.address, other.allocation.amount, entry.proof.clone()),
        (a.index + 1, a.address, a.amount, entry.proof.clone()),
        (a.index, a.address, a.amount, other.proof.clone()),
        (a.index, a.address, a.amount, Vec::new()),
    ];
    for (index, address, amount, proof) in attempts {
        assert_eq!(
            deployment.ledger.claim(index, &address, amount, &proof),
            Err(LedgerError::InvalidProof)
        );
    }
    assert!(!deployment.ledger.is_claimed(a.index));
    assert!(!deployment.ledger.is_claimed(a.index + 1));
}

#[test]
fn test_relayer_claim_pays_the_committed_address() {
    let mut deployment = deploy(&allocations(4));
    let entry = deployment.commitment.entries[1].clone();
    let a = entry.allocation;

    // No caller identity is involved in claim; a relayer only supplies data.
    deployment.ledger
        .claim(a.index, &a.address, a.amount, &entry.proof)
        .unwrap();
    assert_eq!(deployment.ledger.vault().balance_of(&a.address), a.amount);
}

#[test]
fn test_closed_drop_rejects_claims() {
    let mut deployment = deploy(&allocations(6));
    let claimed = deployment.commitment.entries[0].clone();
    let fresh = deployment.commitment.entries[1].clone();
    deployment.ledger
        .claim(
            claimed.allocation.index,
            &claimed.allocation.address,
            claimed.allocation.amount,
            &claimed.proof,
        )
        .unwrap();

    deployment.ledger.close(&deployment.administrator).unwrap();
    assert!(deployment.ledger.is_closed());
    assert_eq!(deployment.ledger.vault().balance(), 0);

    let f = fresh.allocation;
    assert_eq!(
        deployment.ledger.claim(f.index, &f.address, f.amount, &fresh.proof),
        Err(LedgerError::DropClosed)
    );
    let c = claimed.allocation;
    assert_eq!(
        deployment.ledger.claim(c.index, &c.address, c.amount, &claimed.proof),
        Err(LedgerError::AlreadyClaimed)
    );
    // Still queryable after close.
    assert!(deployment.ledger.is_claimed(c.index));
    assert!(!deployment.ledger.is_claimed(f.index));
}

#[test]
fn test_unclaimed_allocation_is_swept_to_treasury() {
    let input = allocations(4_000);
    let mut deployment = deploy(&input);
    let token_total = deployment.commitment.token_total;

    let mut unclaimed = None;
    for entry in &deployment.commitment.entries {
        let a = entry.allocation;
        if a.index == UNCLAIMED_INDEX {
            unclaimed = Some(a);
            continue;
        }
        deployment.ledger
            .claim(a.index, &a.address, a.amount, &entry.proof)
            .unwrap();
        assert_eq!(deployment.ledger.vault().balance_of(&a.address), input[a.index as usize].1);
    }

    let unclaimed = unclaimed.unwrap();
    assert_eq!(deployment.ledger.vault().balance_of(&unclaimed.address), 0);
    assert_eq!(deployment.ledger.vault().balance(), unclaimed.amount);
    assert!(!deployment.ledger.is_claimed(UNCLAIMED_INDEX));

    let swept = deployment.ledger.close(&deployment.administrator).unwrap();
    assert_eq!(swept, unclaimed.amount);
    assert_eq!(deployment.ledger.vault().balance_of(&deployment.treasury), unclaimed.amount);
    assert_eq!(deployment.ledger.vault().balance(), 0);

    // Conservation: payouts plus sweep equal what was funded.
    assert_eq!(deployment.ledger.total_amount_claimed() + swept, token_total);
}

#[test]
fn test_concurrent_submissions_pay_once() {
    let deployment = deploy(&allocations(5));
    let entry = deployment.commitment.entries[3].clone();
    let ledger = Arc::new(Mutex::new(deployment.ledger));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let entry = entry.clone();
            thread::spawn(move || {
                let a = entry.allocation;
                ledger
                    .lock()
                    .unwrap()
                    .claim(a.index, &a.address, a.amount, &entry.proof)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| *r == Err(LedgerError::AlreadyClaimed)));

    let ledger = ledger.lock().unwrap();
    assert_eq!(
        ledger.vault().balance_of(&entry.allocation.address),
        entry.allocation.amount
    );
}

proptest! {
    #[test]
    fn prop_all_proofs_claim_and_conserve(
        amounts in prop::collection::vec(0u64..1_000_000, 1..40),
        skip in prop::collection::vec(any::<bool>(), 40),
    ) {
        let input: Vec<(Pubkey, u64)> = amounts
            .iter()
            .map(|amount| (Pubkey::new_unique(), *amount))
            .collect();
        let mut deployment = deploy(&input);

        for entry in &deployment.commitment.entries {
            let a = entry.allocation;
            if skip[a.index as usize] {
                continue;
            }
            let claimed = deployment.ledger.claim(a.index, &a.address, a.amount, &entry.proof);
            prop_assert!(claimed.is_ok());
        }
        let swept = deployment.ledger.close(&deployment.administrator).unwrap();
        prop_assert_eq!(
            deployment.ledger.total_amount_claimed() + swept,
            deployment.commitment.token_total
        );
        prop_assert_eq!(deployment.ledger.vault().balance(), 0);
    }

    #[test]
    fn prop_build_is_deterministic(amounts in prop::collection::vec(any::<u32>(), 1..30)) {
        let input: Vec<(Pubkey, u64)> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| (Pubkey::new_from_array([i as u8 + 1; 32]), u64::from(*amount)))
            .collect();
        prop_assert_eq!(Commitment::build(&input).unwrap(), Commitment::build(&input).unwrap());
    }
}
