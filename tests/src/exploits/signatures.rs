//! # Signature Attacks
//!
//! Instructions arrive with the signer's address and an ed25519 signature
//! over `(program_id, instruction)`. The signer becomes the caller of the
//! transition, so every way of lying about the signer must fail before any
//! state is read.

#[cfg(test)]
mod tests {
    use crate::fixtures::{keypair, Harness};
    use ek_partnership::prelude::*;

    fn init(partnership_id: u64, total_shares: u64) -> Instruction {
        Instruction::InitializePartnership {
            partnership_id,
            total_shares,
        }
    }

    // =========================================================================
    // IMPERSONATION
    // =========================================================================

    /// Attacker signs with their own key but claims the authority's address.
    #[test]
    fn test_impersonated_signer_rejected() {
        let h = Harness::new();
        let program_id = h.program.config().program_id;
        let mut signed = SignedInstruction::sign(&h.outsider_key, &program_id, init(1, 10)).unwrap();
        signed.signer = h.authority;
        let before = h.store().snapshot();

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
        assert_eq!(h.store().snapshot(), before);
        assert!(h.program.events().is_empty());
    }

    /// Attacker replays the authority's signature under their own address.
    #[test]
    fn test_swapped_signer_rejected() {
        let h = Harness::new();
        let program_id = h.program.config().program_id;
        let mut signed = SignedInstruction::sign(&h.authority_key, &program_id, init(1, 10)).unwrap();
        signed.signer = h.outsider;

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
    }

    #[test]
    fn test_zeroed_signature_rejected() {
        let h = Harness::new();
        let program_id = h.program.config().program_id;
        let mut signed = SignedInstruction::sign(&h.authority_key, &program_id, init(1, 10)).unwrap();
        signed.signature = [0u8; 64];

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
    }

    // =========================================================================
    // TAMPERING
    // =========================================================================

    #[test]
    fn test_tampered_total_shares_rejected() {
        let h = Harness::new();
        let program_id = h.program.config().program_id;
        let mut signed = SignedInstruction::sign(&h.authority_key, &program_id, init(1, 10)).unwrap();
        signed.instruction = init(1, 10_000);

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
        assert!(h.store().snapshot().values().all(|a| a.as_partnership().is_none()));
    }

    /// A relayer redirects a signed distribution to itself.
    #[test]
    fn test_redirected_distribution_rejected() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let program_id = h.program.config().program_id;
        let mut signed = SignedInstruction::sign(
            &h.authority_key,
            &program_id,
            Instruction::MintShares {
                accounts: h.issue_accounts(&record),
                distribution: vec![ShareDistribution::new(h.authority, 10)],
            },
        )
        .unwrap();
        if let Instruction::MintShares { distribution, .. } = &mut signed.instruction {
            distribution[0].recipient = h.outsider;
        }
        let before = h.store().snapshot();

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
        assert_eq!(h.store().snapshot(), before);
    }

    // =========================================================================
    // CROSS-DEPLOYMENT REPLAY
    // =========================================================================

    #[test]
    fn test_signature_for_other_deployment_rejected() {
        let h = Harness::new();
        let other_program = keypair(0xEE).1;
        let signed = SignedInstruction::sign(&h.authority_key, &other_program, init(1, 10)).unwrap();

        assert_eq!(h.program.process(&signed), Err(ProgramError::InvalidSignature));
        assert_eq!(h.program.stats().transitions_rejected, 1);
    }

    // =========================================================================
    // VALID SIGNATURE, WRONG PRINCIPAL
    // =========================================================================

    /// A correctly signed instruction still runs as its signer, who has no
    /// authority over someone else's record.
    #[test]
    fn test_valid_outsider_signature_gains_no_authority() {
        let h = Harness::new();
        let (record, _) = h.custodied_record(1, 10);
        let program_id = h.program.config().program_id;
        let signed = SignedInstruction::sign(
            &h.outsider_key,
            &program_id,
            Instruction::MintShares {
                accounts: h.issue_accounts(&record),
                distribution: vec![ShareDistribution::new(h.outsider, 10)],
            },
        )
        .unwrap();

        assert!(matches!(
            h.program.process(&signed),
            Err(ProgramError::Unauthorized(_))
        ));
        assert_eq!(h.share_balance(&h.outsider, &record), 0);
    }
}
