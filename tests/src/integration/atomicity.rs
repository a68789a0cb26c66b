//! # Atomicity
//!
//! A rejected transition must leave every account byte-for-byte unchanged,
//! wherever in the transition the failure happens. Concurrent callers racing
//! for the same record must see exactly one winner.

#[cfg(test)]
mod tests {
    use crate::fixtures::{keypair, Harness};
    use ek_partnership::prelude::*;
    use proptest::prelude::*;
    use std::thread;

    fn within_total() -> ProgramConfig {
        ProgramConfig::default().with_issuance(IssuancePolicy {
            cap: IssuanceCap::WithinTotal,
            allow_reissue: true,
        })
    }

    // =========================================================================
    // FAILURES LEAVE NO TRACE
    // =========================================================================

    #[test]
    fn test_rent_exhausted_mid_distribution_commits_nothing() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 3);
        let (_, carol) = keypair(0xC3);

        let rent = h.program.config().rent;
        let budget = rent.minimum_balance(MintState::LEN)
            + rent.minimum_balance(TokenAccountState::LEN)
            + 1;
        h.store().set_account(h.authority, Account::wallet(budget));
        let before = h.store().snapshot();
        let events_before = h.program.events().len();

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &h.issue_accounts(&record),
                &[
                    ShareDistribution::new(h.outsider, 1),
                    ShareDistribution::new(carol, 2),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::InsufficientFunds { .. }));
        assert_eq!(h.store().snapshot(), before);
        assert_eq!(h.program.events().len(), events_before);
        assert_eq!(h.share_balance(&h.outsider, &record), 0);
        assert_eq!(h.lamports(&h.authority), budget);
    }

    #[test]
    fn test_unfunded_authority_cannot_initialize() {
        let h = Harness::new();
        let (_, broke) = keypair(0xD4);
        h.store().fund(broke, 1);
        let before = h.store().snapshot();

        let err = h.program.initialize_partnership(&broke, 1, 10).unwrap_err();

        assert!(matches!(err, ProgramError::InsufficientFunds { .. }));
        assert_eq!(h.store().snapshot(), before);
    }

    #[test]
    fn test_rent_free_deployment_needs_no_funding() {
        let h = Harness::with_config(ProgramConfig::default().with_rent(RentConfig::free()));
        let (_, broke) = keypair(0xD4);
        h.store().fund(broke, 0);

        let record = h.program.initialize_partnership(&broke, 1, 10).unwrap();

        assert_eq!(h.lamports(&broke), 0);
        assert_eq!(h.lamports(&record), 0);
        assert_eq!(h.program.fetch_partnership(&record).unwrap().authority, broke);
    }

    #[test]
    fn test_rejected_deposit_keeps_source_and_vault_untouched() {
        let h = Harness::new();
        let record = h.initialize(1, 10);
        let asset = h.mint_unique_asset("held", &h.authority);
        let mut accounts = h.deposit_accounts(&record, &asset);
        accounts.vault = h.program.vault_address(&h.outsider, &asset.mint).unwrap();
        let before = h.store().snapshot();

        let err = h.program.deposit_nft(&h.authority, &accounts).unwrap_err();

        assert!(matches!(err, ProgramError::InvalidTokenAccount(_)));
        assert_eq!(h.store().snapshot(), before);
    }

    #[test]
    fn test_over_issue_leaves_share_mint_uncreated() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let accounts = h.issue_accounts(&record);
        let before = h.store().snapshot();

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &accounts,
                &[ShareDistribution::new(h.authority, 11)],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::InvalidShareDistribution(_)));
        assert_eq!(h.store().snapshot(), before);
        assert!(!h.store().account_exists(&accounts.share_mint).unwrap());
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[test]
    fn test_racing_initializations_have_one_winner() {
        let h = Harness::new();

        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| h.program.initialize_partnership(&h.authority, 42, 100)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        let winners = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .all(|err| matches!(err, ProgramError::DuplicateRecord { .. })));
        assert_eq!(h.program.events().len(), 1);
    }

    #[test]
    fn test_racing_deposits_have_one_winner() {
        let h = Harness::new();
        let record = h.initialize(1, 10);
        let asset = h.mint_unique_asset("contested", &h.authority);
        let accounts = h.deposit_accounts(&record, &asset);

        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| h.program.deposit_nft(&h.authority, &accounts)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert_eq!(h.program.token_balance(&accounts.vault), Ok(1));
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_issuance_commits_fully_or_not_at_all(
            total in 1u64..100,
            amounts in prop::collection::vec(1u64..50, 1..5),
        ) {
            let h = Harness::with_config(within_total());
            let (record, _) = h.custodied_record(1, total);
            let distribution: Vec<_> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| ShareDistribution::new(keypair(0x10 + i as u8).1, *amount))
                .collect();
            let before = h.store().snapshot();
            let sum: u64 = amounts.iter().sum();

            let result = h.program.mint_shares(&h.authority, &h.issue_accounts(&record), &distribution);

            if sum <= total {
                let receipt = result.unwrap();
                prop_assert_eq!(receipt.issued_total, sum);
                for entry in &distribution {
                    prop_assert_eq!(h.share_balance(&entry.recipient, &record), entry.amount);
                }
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(h.store().snapshot(), before);
            }
        }

        #[test]
        fn prop_issued_never_exceeds_total(
            total in 1u64..50,
            batches in prop::collection::vec(1u64..20, 1..6),
        ) {
            let h = Harness::with_config(within_total());
            let (record, _) = h.custodied_record(1, total);
            let accounts = h.issue_accounts(&record);

            for amount in batches {
                let _ = h.program.mint_shares(
                    &h.authority,
                    &accounts,
                    &[ShareDistribution::new(h.outsider, amount)],
                );
                let state = h.program.fetch_partnership(&record).unwrap();
                prop_assert!(state.issued_shares <= state.total_shares);
                prop_assert_eq!(h.share_balance(&h.outsider, &record), state.issued_shares);
            }
        }
    }
}
