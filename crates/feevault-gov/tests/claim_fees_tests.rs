use feevault_gov::{FeeSource, TreasuryError, TreasuryEvent};
use feevault_types::{Address, U256};

mod common;

const BOOK_A: Address = Address([0x61; 20]);
const BOOK_B: Address = Address([0x62; 20]);
const BROKEN: Address = Address([0x63; 20]);

#[test]
fn claims_every_source_into_treasury() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.set_fee_source(BOOK_A, FeeSource::Accrued(U256::from_u64(10)));
    h.ledger.set_fee_source(BOOK_B, FeeSource::Accrued(U256::from_u64(5)));

    let caller = h.signer(0);
    let outcome = h
        .treasury
        .claim_fees(&mut h.ledger, &caller, &[BOOK_A, BOOK_B])
        .unwrap();
    assert_eq!(outcome.nonce, None);
    assert_eq!(outcome.events.len(), 2);
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(15));
    assert_eq!(h.treasury.nonce(), 0);
}

#[test]
fn non_signer_cannot_claim() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.set_fee_source(BOOK_A, FeeSource::Accrued(U256::from_u64(10)));
    let outsider = Address([0x05; 20]);
    assert_eq!(
        h.treasury.claim_fees(&mut h.ledger, &outsider, &[BOOK_A]),
        Err(TreasuryError::Unauthorized)
    );
    assert!(h.ledger.balance(&common::AUTHORITY).is_zero());
}

#[test]
fn failing_source_does_not_block_the_rest() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.set_fee_source(BOOK_A, FeeSource::Accrued(U256::from_u64(10)));
    h.ledger.set_fee_source(BROKEN, FeeSource::Failing("paused".to_string()));
    h.ledger.set_fee_source(BOOK_B, FeeSource::Accrued(U256::from_u64(5)));

    let caller = h.signer(1);
    let outcome = h
        .treasury
        .claim_fees(&mut h.ledger, &caller, &[BOOK_A, BROKEN, BOOK_B])
        .unwrap();
    assert_eq!(
        outcome.events,
        vec![
            TreasuryEvent::FeesClaimed {
                source: BOOK_A,
                amount: U256::from_u64(10)
            },
            TreasuryEvent::FeeClaimFailed {
                source: BROKEN,
                reason: "paused".to_string()
            },
            TreasuryEvent::FeesClaimed {
                source: BOOK_B,
                amount: U256::from_u64(5)
            },
        ]
    );
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(15));
}

#[test]
fn zero_entries_are_skipped() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.set_fee_source(BOOK_A, FeeSource::Accrued(U256::from_u64(10)));

    let caller = h.signer(0);
    let outcome = h
        .treasury
        .claim_fees(&mut h.ledger, &caller, &[Address::zero(), BOOK_A, Address::zero()])
        .unwrap();
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(10));
}

#[test]
fn empty_source_list_is_a_no_op() {
    let mut h = common::harness(2, 1, 0);
    let caller = h.signer(0);
    let outcome = h.treasury.claim_fees(&mut h.ledger, &caller, &[]).unwrap();
    assert!(outcome.events.is_empty());
}
