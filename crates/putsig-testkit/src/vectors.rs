//! Golden test vectors for deterministic verification.
//!
//! Ed25519 signatures are deterministic, so a signature over the signable
//! bytes pins those bytes exactly. Every implementation must reproduce these
//! signatures from the same seed and inputs.

use putsig::{EncodingMode, KeyPair, SignOptions, SignableCodec};

/// Expected output for one encoding mode.
#[derive(Debug, Clone)]
pub struct ModeVector {
    pub mode: EncodingMode,
    /// Length of the signable bytes.
    pub signable_len: usize,
    /// Expected detached signature (hex).
    pub signature: &'static str,
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Value bytes.
    pub value: Vec<u8>,
    /// Salt, if any.
    pub salt: Option<Vec<u8>>,
    /// Sequence number, if any.
    pub seq: Option<u64>,
    /// Expected public key (hex).
    pub public_key: &'static str,
    /// Expected results under raw, versioned and bencode.
    pub modes: [ModeVector; 3],
}

impl GoldenVector {
    /// The keypair derived from the vector's seed.
    pub fn keypair(&self) -> KeyPair {
        KeyPair::from_seed(&self.seed)
    }

    /// Sign options for this vector under `mode`.
    pub fn sign_options(&self, mode: EncodingMode) -> SignOptions {
        let mut opts = SignOptions::with_keypair(self.keypair()).encoding(mode);
        if let Some(salt) = &self.salt {
            opts = opts.salt(salt.clone());
        }
        if let Some(seq) = self.seq {
            opts = opts.seq(seq);
        }
        opts
    }
}

fn modes(lens: [usize; 3], signatures: [&'static str; 3]) -> [ModeVector; 3] {
    [
        ModeVector {
            mode: EncodingMode::Raw,
            signable_len: lens[0],
            signature: signatures[0],
        },
        ModeVector {
            mode: EncodingMode::Versioned,
            signable_len: lens[1],
            signature: signatures[1],
        },
        ModeVector {
            mode: EncodingMode::Bencode,
            signable_len: lens[2],
            signature: signatures[2],
        },
    ]
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "unsalted test value",
            seed: [0x42; 32],
            value: b"test".to_vec(),
            salt: None,
            seq: None,
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            modes: modes(
                [4, 13, 25],
                [
                    "22e0eadeebdb0c5529b2e64c98eb7f7ba5e94f094b23462ceb75744a857a8aa84697b41a80cdecc92b4c6d545483c08b7f3b1dbc5f49e956cd252ce47d44a502",
                    "bd967b584058dc76758f5f3cd9fa6315aaf879695feed28357edee30952d0c0dbb0c78cce3e03b9d786fb4226ef80883d9d6314fff0e46898e50f9e452391e0c",
                    "b3595087f5fa12c409b2c84f98498c4610ed55a7592698928657c9f544c7120ec66c4bc2896582235b4919eeab716b3512f37ce09e8b57e9173d3a3179fa800c",
                ],
            ),
        },
        GoldenVector {
            name: "salted hello world at seq 1",
            seed: [0x01; 32],
            value: b"hello world".to_vec(),
            salt: Some((0u8..32).collect()),
            seq: Some(1),
            public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            modes: modes(
                [44, 52, 66],
                [
                    "fb7b76d0b6bd518bc520a61310023b41edb5403e5cb69f8344e44daf95ece911fa0bba1ea43e92f1393f7b4c11538050c4f8b336adc2a191e0cc52bcb267c707",
                    "8338f618b81c52fc33afa1af5315b2be5e26f18e04732ddb3e80ff6231e52b54b235f05720e3feae1e132a7170059c2fe37839be8d4e19e5eb4c9dcaf6e5370c",
                    "0010975843d34a4202304e82015f1f27353bc2998cfe373de01b8428f1c1172fdcc710b42056a37d1164b0e6d981aeefb96069d5441fecf96c00995d8d942001",
                ],
            ),
        },
        GoldenVector {
            name: "maximum value, salt and seq",
            seed: [0x07; 32],
            value: vec![0x42; 1000],
            salt: Some(vec![0xaa; 64]),
            seq: Some(u64::MAX),
            public_key: "ea4a6c63e29c520abef5507b132ec5f9954776aebebe7b92421eea691446d22c",
            modes: modes(
                [1065, 1073, 1108],
                [
                    "950bbd3c77c563ba684c24d910c50680bc2355c1c4fec91ce7129d6e36a89d5b5a57afc2e07849394b829af626ec56289aefccc0f284ffa18b0cd743fe760c09",
                    "08f7647da6dc5fb4c603a77e72cb75ad34d3b0fafccbc6f9a70cd8462c43ac66e03ce6044a73677361ff0b7c886109b2c757f209b6cc6ac4acb0b3e9ca3cc703",
                    "81571b88f13e3b4d83e733600fe609411f21bcd0b2f66fbfe282610f43c931b3dfe6c534f58e6b11e182dd902c3ce4d050ea9d1cdcb9fb308aafb47201495409",
                ],
            ),
        },
        GoldenVector {
            name: "all byte values at seq 256",
            seed: [0x08; 32],
            value: (0u8..=255).collect(),
            salt: Some(vec![0x5a; 16]),
            seq: Some(256),
            public_key: "1398f62c6d1a457c51ba6a4b5f3dbd2f69fca93216218dc8997e416bd17d93ca",
            modes: modes(
                [273, 281, 298],
                [
                    "000fddcf01a12e419746527019eafff6386927a0f6fb64697bc0499fec8d3c287daf071fde42ad752b03ee72002a4c08ecdbf12ecd75be9c1dd33308aa3a1105",
                    "aea330cf03590b6c870c0d879ea4246b820c993fc2950801fd4f977837731161812f241d1d7119037bb344d86899201cc40916b6ea14487edc2ab52e1088c60c",
                    "d80be9a9bee1a2bcc9b99dc6cad2e122cb63ddf0cc87a4d25de25bd7a048e847c75a9ece676c1ff91f17a22230fd0daa5f2ddce4005b85fbb65c6282b69efc0f",
                ],
            ),
        },
        GoldenVector {
            name: "empty value at explicit seq 0",
            seed: [0x00; 32],
            value: Vec::new(),
            salt: None,
            seq: Some(0),
            public_key: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            modes: modes(
                [0, 9, 21],
                [
                    "8f895b3cafe2c9506039d0e2a66382568004674fe8d237785092e40d6aaf483e4fc60168705f31f101596138ce21aa357c0d32a064f423dc3ee4aa3abf53f803",
                    "75842ef6c6a28b339a7635b1264481f16de10bf9f0c62e5c82ab8b9637a0e87164b2d2c044771bfec5fd5569463b690025aac39c0cf4cd58e314cfeadd464207",
                    "c2eff7da144fade5ffbee78572ce880ebff04475d538a0211df18c8414dbefe1ee5d1b9e281a7f59a87d94de6944360ae7021d17e2d9391385b42824925e0d0e",
                ],
            ),
        },
    ]
}

/// The result of checking one vector under one mode.
#[derive(Debug, Clone)]
pub struct VectorResult {
    pub name: &'static str,
    pub mode: EncodingMode,
    pub matches: bool,
    /// The signature actually produced (hex).
    pub signature: String,
}

/// Check every vector under every mode against the stock codec.
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<VectorResult> {
    let codec = SignableCodec::new();
    let mut results = Vec::new();

    for vector in all_vectors() {
        for expected in &vector.modes {
            let opts = vector.sign_options(expected.mode);
            let signable = codec.signable(&vector.value, &opts.signable);
            let signature = codec.sign(&vector.value, Some(&opts));

            let (matches, signature) = match (signable, signature) {
                (Ok(bytes), Ok(sig)) => (
                    bytes.len() == expected.signable_len && sig.to_hex() == expected.signature,
                    sig.to_hex(),
                ),
                (_, Err(e)) | (Err(e), _) => (false, e.to_string()),
            };

            results.push(VectorResult {
                name: vector.name,
                mode: expected.mode,
                matches,
                signature,
            });
        }
    }

    results
}
