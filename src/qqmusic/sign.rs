use base64::{Engine, engine::general_purpose::STANDARD};
use sha1::{Digest, Sha1};

/// Produces the `sign` query parameter for a serialized request body.
pub trait Signer: Send + Sync {
    fn sign(&self, body: &str) -> String;
}

const PART_1_INDEXES: [usize; 8] = [23, 14, 6, 36, 16, 40, 7, 19];
const PART_2_INDEXES: [usize; 8] = [16, 1, 32, 12, 19, 27, 8, 5];
const SCRAMBLE_VALUES: [u8; 20] = [
    89, 39, 179, 150, 218, 82, 58, 252, 177, 52, 186, 123, 120, 64, 242, 133, 143, 161, 121, 179,
];

/// The `zzc` signature used by the web player for `musics.fcg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZzcSigner;

impl Signer for ZzcSigner {
    fn sign(&self, body: &str) -> String {
        let digest = Sha1::digest(body.as_bytes());
        let hex: Vec<u8> = digest
            .iter()
            .flat_map(|b| format!("{b:02X}").into_bytes())
            .collect();

        // index 40 is out of range for a sha1 hex digest and is skipped
        let part1: String = PART_1_INDEXES
            .iter()
            .filter_map(|&i| hex.get(i).map(|&c| c as char))
            .collect();
        let part2: String = PART_2_INDEXES.iter().map(|&i| hex[i] as char).collect();

        let scrambled: Vec<u8> = SCRAMBLE_VALUES
            .iter()
            .zip(digest.iter())
            .map(|(s, d)| s ^ d)
            .collect();
        let part3: String = STANDARD
            .encode(scrambled)
            .chars()
            .filter(|c| !matches!(c, '/' | '\\' | '+' | '='))
            .collect();

        format!("zzc{part1}{part2}{part3}").to_lowercase()
    }
}
