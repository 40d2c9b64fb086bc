//! Property-based tests for session tokens
//!
//! Uses proptest to generate identities, clocks and arbitrary strings.

use devconnect::backend::auth::{TokenCodec, TokenError};
use devconnect::shared::Identity;
use proptest::prelude::*;
use std::time::Duration;

fn codec(secret: &str) -> TokenCodec {
    TokenCodec::new(secret, Duration::from_secs(3600))
}

proptest! {
    #[test]
    fn test_verify_inverts_issue_before_expiry(
        id in "[A-Za-z0-9-]{1,40}",
        now in 1_000_000i64..2_000_000_000,
        ttl in 1u64..1_000_000,
        elapsed_frac in 0.0f64..1.0,
    ) {
        let codec = codec("prop-secret");
        let token = codec.issue_at(&Identity::new(id.clone()), Duration::from_secs(ttl), now).unwrap();
        let elapsed = ((ttl as f64) * elapsed_frac) as i64;
        let verified = codec.verify_at(&token, now + elapsed.min(ttl as i64 - 1));
        prop_assert_eq!(verified, Ok(Identity::new(id)));
    }

    #[test]
    fn test_expired_once_ttl_elapses(
        id in "[a-z0-9]{1,20}",
        now in 1_000_000i64..2_000_000_000,
        ttl in 0u64..100_000,
        extra in 0i64..100_000,
    ) {
        let codec = codec("prop-secret");
        let token = codec.issue_at(&Identity::new(id), Duration::from_secs(ttl), now).unwrap();
        prop_assert_eq!(codec.verify_at(&token, now + ttl as i64 + extra), Err(TokenError::Expired));
    }

    #[test]
    fn test_other_key_never_yields_identity(
        id in "[a-z0-9]{1,20}",
        secret in "[a-zA-Z0-9]{1,32}",
    ) {
        prop_assume!(secret != "prop-secret");
        let token = codec(&secret).issue(&Identity::new(id)).unwrap();
        prop_assert_eq!(codec("prop-secret").verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_arbitrary_strings_never_panic(input in ".*") {
        let result = codec("prop-secret").verify(&input);
        prop_assert!(result.is_err());
    }

    #[test]
    fn test_wrong_segment_count_is_malformed(
        segments in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 0..6),
    ) {
        prop_assume!(segments.len() != 3);
        let token = segments.join(".");
        prop_assert_eq!(codec("prop-secret").verify(&token), Err(TokenError::Malformed));
    }
}
