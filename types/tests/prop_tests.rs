use proptest::prelude::*;

use ballot_types::{PublicKey, SlotAddress, Timestamp};

proptest! {
    /// SlotAddress hex text parses back to the same address.
    #[test]
    fn slot_address_text_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let addr = SlotAddress::new(bytes);
        let parsed: SlotAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// PublicKey hex text parses back to the same key.
    #[test]
    fn public_key_text_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey(bytes);
        let parsed: PublicKey = key.to_string().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in any::<i64>(), b in any::<i64>()) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamps encode as 8 little-endian bytes on the ledger.
    #[test]
    fn timestamp_borsh_is_i64_le(secs in any::<i64>()) {
        let bytes = borsh::to_vec(&Timestamp::new(secs)).unwrap();
        prop_assert_eq!(bytes, secs.to_le_bytes().to_vec());
    }

    /// secs_until counts down to zero and never goes negative.
    #[test]
    fn timestamp_secs_until(base in -1_000_000i64..1_000_000, offset in -1_000_000i64..1_000_000) {
        let deadline = Timestamp::new(base + offset);
        let now = Timestamp::new(base);
        let expected = if offset > 0 { offset as u64 } else { 0 };
        prop_assert_eq!(deadline.secs_until(now), expected);
    }

    /// plus_secs saturates instead of wrapping.
    #[test]
    fn timestamp_plus_secs_saturates(secs in any::<i64>(), delta in any::<i64>()) {
        let shifted = Timestamp::new(secs).plus_secs(delta);
        prop_assert_eq!(shifted.as_secs(), secs.saturating_add(delta));
    }
}
