//! Proptest generators for property-based testing.

use proptest::prelude::*;

use putsig::core::{SALT_MAX_SIZE, SALT_MIN_SIZE};
use putsig::{EncodingMode, KeyPair, SignOptions, VALUE_MAX_SIZE};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    any::<[u8; 32]>().prop_map(|seed| KeyPair::from_seed(&seed))
}

/// Generate a value within the size limit.
pub fn value() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=VALUE_MAX_SIZE)
}

/// Generate a value just over the size limit.
pub fn oversized_value() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), VALUE_MAX_SIZE + 1..=VALUE_MAX_SIZE + 100)
}

/// Generate a salt accepted by raw mode (16 to 64 bytes).
pub fn raw_salt() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), SALT_MIN_SIZE..=SALT_MAX_SIZE)
}

/// Generate a salt accepted by versioned and bencode modes (0 to 64 bytes).
pub fn versioned_salt() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=SALT_MAX_SIZE)
}

/// Generate a salt longer than any mode accepts.
pub fn oversized_salt() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), SALT_MAX_SIZE + 1..=SALT_MAX_SIZE + 64)
}

/// Generate a sequence number.
pub fn seq() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate an encoding mode.
pub fn encoding_mode() -> impl Strategy<Value = EncodingMode> {
    prop_oneof![
        Just(EncodingMode::Raw),
        Just(EncodingMode::Versioned),
        Just(EncodingMode::Bencode),
    ]
}

/// Generate an optional salt valid for `mode`.
pub fn salt_for(mode: EncodingMode) -> BoxedStrategy<Option<Vec<u8>>> {
    match mode {
        EncodingMode::Raw => prop::option::of(raw_salt()).boxed(),
        EncodingMode::Versioned | EncodingMode::Bencode => {
            prop::option::of(versioned_salt()).boxed()
        }
    }
}

/// Parameters for a valid signing request.
#[derive(Debug, Clone)]
pub struct SignableParams {
    pub seed: [u8; 32],
    pub mode: EncodingMode,
    pub value: Vec<u8>,
    pub salt: Option<Vec<u8>>,
    pub seq: Option<u64>,
}

impl SignableParams {
    pub fn keypair(&self) -> KeyPair {
        KeyPair::from_seed(&self.seed)
    }

    /// Build sign options carrying the parameters and the seeded keypair.
    pub fn sign_options(&self) -> SignOptions {
        let mut opts = SignOptions::with_keypair(self.keypair()).encoding(self.mode);
        if let Some(salt) = &self.salt {
            opts = opts.salt(salt.clone());
        }
        if let Some(seq) = self.seq {
            opts = opts.seq(seq);
        }
        opts
    }
}

impl Arbitrary for SignableParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        encoding_mode()
            .prop_flat_map(|mode| {
                (
                    Just(mode),
                    any::<[u8; 32]>(),
                    value(),
                    salt_for(mode),
                    prop::option::of(seq()),
                )
            })
            .prop_map(|(mode, seed, value, salt, seq)| SignableParams {
                seed,
                mode,
                value,
                salt,
                seq,
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use putsig::SignableCodec;

    proptest! {
        #[test]
        fn test_generated_params_are_accepted(params: SignableParams) {
            let codec = SignableCodec::new();
            let opts = params.sign_options();
            prop_assert!(codec.signable(&params.value, &opts.signable).is_ok());
        }

        #[test]
        fn test_signable_deterministic(params: SignableParams) {
            let codec = SignableCodec::new();
            let opts = params.sign_options();

            let b1 = codec.signable(&params.value, &opts.signable).unwrap();
            let b2 = codec.signable(&params.value, &opts.signable).unwrap();

            prop_assert_eq!(b1, b2);
        }

        #[test]
        fn test_signature_deterministic(params: SignableParams) {
            let codec = SignableCodec::new();
            let opts = params.sign_options();

            let s1 = codec.sign(&params.value, Some(&opts)).unwrap();
            let s2 = codec.sign(&params.value, Some(&opts)).unwrap();

            prop_assert_eq!(s1, s2);
        }
    }
}
