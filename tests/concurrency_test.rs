//! Concurrency Integration Tests
//!
//! Parallel allocation on one account must hand out every index exactly
//! once; work on separate accounts must not interfere.
//!
//! Run with: cargo test --test concurrency_test -- --nocapture

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use blockchain_wallet::{ChainType, Standard, Subchain};
use common::{tx, TestEnvironment};

const THREADS: u32 = 8;
const PER_THREAD: u32 = 5;

#[test]
fn test_parallel_allocation_yields_unique_indices() -> anyhow::Result<()> {
    let env = Arc::new(TestEnvironment::new()?);
    let id = env.chain.new_account(&env.nym, Standard::Bip44, ChainType::Bitcoin)?;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let env = Arc::clone(&env);
            let id = id.clone();
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| {
                        env.chain
                            .allocate_address(&env.nym, &id, "", Subchain::External)
                            .expect("allocation")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut indices = BTreeSet::new();
    let mut addresses = BTreeSet::new();
    for handle in handles {
        for allocated in handle.join().expect("thread panicked") {
            assert!(indices.insert(allocated.index), "index {} handed out twice", allocated.index);
            addresses.insert(allocated.address);
        }
    }

    let total = THREADS * PER_THREAD;
    assert_eq!(indices, (0..total).collect::<BTreeSet<_>>());
    assert_eq!(addresses.len(), total as usize);

    let account = env.chain.account(&env.nym, &id)?;
    assert_eq!(account.external_index, total);
    assert_eq!(account.revision, u64::from(total));
    log::info!("{} parallel allocations all unique", total);
    Ok(())
}

#[test]
fn test_parallel_incoming_on_one_address() -> anyhow::Result<()> {
    let env = Arc::new(TestEnvironment::new()?);
    let id = env.chain.new_account(&env.nym, Standard::Bip44, ChainType::Bitcoin)?;
    env.chain.allocate_address(&env.nym, &id, "", Subchain::External)?;

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let env = Arc::clone(&env);
            let id = id.clone();
            thread::spawn(move || {
                // every thread also records a shared txid
                for txid in [format!("tx-{}", n), "shared".to_string()] {
                    env.chain
                        .store_incoming(&env.nym, &id, 0, Subchain::External, &tx(&txid))
                        .expect("store incoming");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let address = env.chain.load_address(&env.nym, &id, 0, Subchain::External)?;
    assert_eq!(address.incoming.len(), THREADS as usize + 1);
    Ok(())
}

#[test]
fn test_separate_accounts_progress_independently() -> anyhow::Result<()> {
    let env = Arc::new(TestEnvironment::new()?);
    let chains = [
        ChainType::Bitcoin,
        ChainType::Litecoin,
        ChainType::Dogecoin,
        ChainType::Dash,
    ];

    let handles: Vec<_> = chains
        .into_iter()
        .map(|chain| {
            let env = Arc::clone(&env);
            thread::spawn(move || {
                let id = env
                    .chain
                    .new_account(&env.nym, Standard::Bip44, chain)
                    .expect("account creation");
                for _ in 0..PER_THREAD {
                    env.chain
                        .allocate_address(&env.nym, &id, "", Subchain::Internal)
                        .expect("allocation");
                }
                id
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();

    assert_eq!(ids.iter().collect::<BTreeSet<_>>().len(), chains.len());
    for id in &ids {
        let account = env.chain.account(&env.nym, id)?;
        assert_eq!(account.internal_index, PER_THREAD);
        assert_eq!(account.external_index, 0);
    }
    Ok(())
}
