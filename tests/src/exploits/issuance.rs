//! # Issuance Attacks
//!
//! Minting more than the record's shares, minting without authority and
//! planting share accounts before the program creates them.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use ek_partnership::prelude::*;

    #[test]
    fn test_outsider_cannot_mint() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let before = h.store().snapshot();

        let err = h
            .program
            .mint_shares(
                &h.outsider,
                &h.issue_accounts(&record),
                &[ShareDistribution::new(h.outsider, 10)],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::Unauthorized(_)));
        assert_eq!(h.store().snapshot(), before);
    }

    #[test]
    fn test_over_issue_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &h.issue_accounts(&record),
                &[
                    ShareDistribution::new(h.authority, 10),
                    ShareDistribution::new(h.outsider, 1),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::InvalidShareDistribution(_)));
    }

    /// Amounts chosen so the naive sum wraps to exactly `total_shares`.
    #[test]
    fn test_wrapping_sum_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &h.issue_accounts(&record),
                &[
                    ShareDistribution::new(h.authority, u64::MAX),
                    ShareDistribution::new(h.outsider, 11),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::InvalidShareDistribution(_)));
        assert_eq!(h.share_balance(&h.authority, &record), 0);
    }

    #[test]
    fn test_second_issuance_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let accounts = h.issue_accounts(&record);
        h.program
            .mint_shares(&h.authority, &accounts, &[ShareDistribution::new(h.authority, 10)])
            .unwrap();

        assert_eq!(
            h.program.mint_shares(
                &h.authority,
                &accounts,
                &[ShareDistribution::new(h.outsider, 10)]
            ),
            Err(ProgramError::SharesAlreadyIssued)
        );
        assert_eq!(h.program.mint_supply(&accounts.share_mint), Ok(10));
    }

    /// Attacker plants a token account of their own at a recipient's share
    /// account address, hoping to capture the credit.
    #[test]
    fn test_squatted_share_account_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let accounts = h.issue_accounts(&record);
        let victim_account = h.program.share_account_address(&h.authority, &record).unwrap();
        h.store().put_token_account(
            victim_account,
            1,
            TokenAccountState::new(accounts.share_mint, h.outsider),
        );
        let before = h.store().snapshot();

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &accounts,
                &[ShareDistribution::new(h.authority, 10)],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::InvalidTokenAccount(_)));
        assert_eq!(h.store().snapshot(), before);
        assert!(!h.store().account_exists(&accounts.share_mint).unwrap());
    }

    /// Attacker plants a mint they control at the share mint address.
    #[test]
    fn test_squatted_share_mint_cannot_be_minted_from() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let accounts = h.issue_accounts(&record);
        h.store()
            .put_mint(accounts.share_mint, 1, MintState::new(h.outsider, 0));
        let before = h.store().snapshot();

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &accounts,
                &[ShareDistribution::new(h.authority, 10)],
            )
            .unwrap_err();

        assert!(matches!(err, ProgramError::Token(TokenError::MintAuthorityMismatch)));
        assert_eq!(h.store().snapshot(), before);
    }

    #[test]
    fn test_zero_amount_entry_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);

        let err = h
            .program
            .mint_shares(
                &h.authority,
                &h.issue_accounts(&record),
                &[
                    ShareDistribution::new(h.authority, 10),
                    ShareDistribution::new(h.outsider, 0),
                ],
            )
            .unwrap_err();

        assert_eq!(
            err,
            ProgramError::InvalidShareDistribution("entry 1 has a zero amount".into())
        );
    }
}
