use feevault_gov::{CallFailure, CalleeBehavior, TreasuryError, TreasuryEvent};
use feevault_types::{Address, Call, GovernedAction, U256};

mod common;

const OK_TARGET: Address = Address([0x71; 20]);
const FAIL_TARGET: Address = Address([0x72; 20]);

fn multicall(calls: &[Call]) -> GovernedAction {
    GovernedAction::Multicall {
        calls: calls.to_vec(),
    }
}

#[test]
fn all_calls_run_in_order() {
    let mut h = common::harness(3, 2, 0);
    let calls = vec![
        Call::new(OK_TARGET, vec![1]),
        Call::new(Address([0x73; 20]), vec![2]),
        Call::new(OK_TARGET, vec![3]),
    ];
    let auth = h.authorize(1, &[2], &multicall(&calls));

    let outcome = h.treasury.multicall(&mut h.ledger, &auth, calls).unwrap();
    assert_eq!(outcome.events.len(), 3);
    let data: Vec<_> = h.ledger.call_log().iter().map(|r| r.data.clone()).collect();
    assert_eq!(data, vec![vec![1], vec![2], vec![3]]);
    assert_eq!(h.treasury.nonce(), 1);
}

#[test]
fn failure_rolls_back_the_whole_batch() {
    let mut h = common::harness(2, 1, 0);
    h.ledger
        .set_callee(FAIL_TARGET, CalleeBehavior::Revert("Fail".to_string()));
    h.ledger.deposit(common::AUTHORITY, U256::from_u64(100));

    let calls = vec![
        Call::new(OK_TARGET, vec![]).with_value(U256::from_u64(40)),
        Call::new(FAIL_TARGET, vec![]),
    ];
    let auth = h.authorize(0, &[], &multicall(&calls));

    assert_eq!(
        h.treasury.multicall(&mut h.ledger, &auth, calls),
        Err(TreasuryError::CallFailed(CallFailure::new(FAIL_TARGET, "Fail")))
    );
    assert!(h.ledger.call_log().is_empty());
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(100));
    assert!(h.ledger.balance(&OK_TARGET).is_zero());
    assert_eq!(h.treasury.nonce(), 0);
}

#[test]
fn underfunded_value_call_aborts_batch() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.deposit(common::AUTHORITY, U256::from_u64(10));
    let calls = vec![
        Call::new(OK_TARGET, vec![]).with_value(U256::from_u64(10)),
        Call::new(OK_TARGET, vec![]).with_value(U256::from_u64(1)),
    ];
    let auth = h.authorize(0, &[], &multicall(&calls));

    let err = h.treasury.multicall(&mut h.ledger, &auth, calls).unwrap_err();
    assert!(matches!(err, TreasuryError::CallFailed(ref f) if f.reason == "insufficient balance"));
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(10));
}

#[test]
fn empty_batch_consumes_nonce() {
    let mut h = common::harness(2, 1, 0);
    let auth = h.authorize(0, &[], &multicall(&[]));
    let outcome = h.treasury.multicall(&mut h.ledger, &auth, vec![]).unwrap();
    assert!(outcome.events.is_empty());
    assert_eq!(h.treasury.nonce(), 1);
}

#[test]
fn multicall_approval_does_not_authorize_single_call() {
    let mut h = common::harness(2, 1, 0);
    let call = Call::new(OK_TARGET, vec![]);
    let auth = h.authorize(0, &[1], &multicall(std::slice::from_ref(&call)));
    assert_eq!(
        h.treasury.call(&mut h.ledger, &auth, call),
        Err(TreasuryError::InvalidSignature)
    );
}

#[test]
fn events_report_each_call() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.deposit(common::AUTHORITY, U256::from_u64(5));
    let calls = vec![Call::new(OK_TARGET, vec![]).with_value(U256::from_u64(5))];
    let auth = h.authorize(0, &[], &multicall(&calls));
    let outcome = h.treasury.multicall(&mut h.ledger, &auth, calls).unwrap();
    assert_eq!(
        outcome.events,
        vec![TreasuryEvent::Called {
            target: OK_TARGET,
            value: U256::from_u64(5),
            return_data: vec![],
        }]
    );
}

#[test]
fn value_sent_to_the_treasury_itself_creates_no_funds() {
    let mut h = common::harness(2, 1, 0);
    h.ledger.deposit(common::AUTHORITY, U256::from_u64(100));
    let calls = vec![
        Call::new(common::AUTHORITY, vec![]).with_value(U256::from_u64(40)),
        Call::new(common::AUTHORITY, vec![]).with_value(U256::from_u64(100)),
    ];
    let auth = h.authorize(0, &[], &multicall(&calls));

    h.treasury.multicall(&mut h.ledger, &auth, calls).unwrap();
    assert_eq!(h.ledger.balance(&common::AUTHORITY), U256::from_u64(100));
    assert_eq!(h.ledger.call_log().len(), 2);
}
