//! CREATE2 address computation.
//!
//! Preimage: 0xff (1) || deployer (20) || salt (32) || init_code_hash (32) = 85 bytes.
//! Address = keccak256(preimage)[12..32].

use tiny_keccak::{Hasher, Keccak};

use super::{keccak256, Address, Salt};

/// Computes the CREATE2 address for an arbitrary 32-byte salt.
pub fn create2_address(deployer: &Address, salt: &Salt, init_code_hash: &[u8; 32]) -> Address {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(deployer.as_bytes());
    preimage[21..53].copy_from_slice(salt.as_bytes());
    preimage[53..85].copy_from_slice(init_code_hash);

    address_from_hash(&keccak256(&preimage))
}

/// Per-worker hashing context for salts drawn from `[0, 2^64)`.
///
/// The first 45 bytes of the preimage (prefix, deployer and the 24 zero bytes
/// above a `u64` salt) never change, so they are absorbed once and the sponge
/// state is cloned for every salt.
#[derive(Clone)]
pub struct Create2Hasher {
    prefix: Keccak,
    init_code_hash: [u8; 32],
}

impl Create2Hasher {
    pub fn new(deployer: &Address, init_code_hash: &[u8; 32]) -> Self {
        let mut prefix = Keccak::v256();
        prefix.update(&[0xff]);
        prefix.update(deployer.as_bytes());
        prefix.update(&[0u8; 24]);

        Self {
            prefix,
            init_code_hash: *init_code_hash,
        }
    }

    /// Address for `Salt::from_u64(salt)`.
    #[inline]
    pub fn address(&self, salt: u64) -> Address {
        let mut hasher = self.prefix.clone();
        hasher.update(&salt.to_be_bytes());
        hasher.update(&self.init_code_hash);

        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);
        address_from_hash(&hash)
    }
}

#[inline]
fn address_from_hash(hash: &[u8; 32]) -> Address {
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::from_bytes(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eip1014(deployer: &str, salt: &str, init_code: &str) -> Address {
        let deployer: Address = deployer.parse().unwrap();
        let salt: Salt = salt.parse().unwrap();
        let init_code = hex::decode(init_code.trim_start_matches("0x")).unwrap();
        create2_address(&deployer, &salt, &keccak256(&init_code))
    }

    const ZERO_SALT: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_eip1014_zero_inputs() {
        let addr = eip1014("0x0000000000000000000000000000000000000000", ZERO_SALT, "0x00");
        assert_eq!(addr.to_checksum(), "0x4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38");
    }

    #[test]
    fn test_eip1014_empty_init_code() {
        let addr = eip1014("0x0000000000000000000000000000000000000000", ZERO_SALT, "0x");
        assert_eq!(addr.to_checksum(), "0xE33C0C7F7df4809055C3ebA6c09CFe4BaF1BD9e0");
    }

    #[test]
    fn test_eip1014_deployer_and_salt() {
        let addr = eip1014("0xdeadbeef00000000000000000000000000000000", ZERO_SALT, "0x00");
        assert_eq!(addr.to_checksum(), "0xB928f69Bb1D91Cd65274e3c79d8986362984fDA3");

        let addr = eip1014(
            "0xdeadbeef00000000000000000000000000000000",
            "0x000000000000000000000000feed000000000000000000000000000000000000",
            "0x00",
        );
        assert_eq!(addr.to_checksum(), "0xD04116cDd17beBE565EB2422F2497E06cC1C9833");
    }

    #[test]
    fn test_eip1014_init_code() {
        let addr = eip1014("0x0000000000000000000000000000000000000000", ZERO_SALT, "0xdeadbeef");
        assert_eq!(addr.to_checksum(), "0x70f2b2914A2a4b783FaEFb75f459A580616Fcb5e");
    }

    #[test]
    fn test_hasher_matches_full_preimage() {
        let deployer: Address = "0x4e59b44847b379578588920ca78fbf26c0b4956c".parse().unwrap();
        let init_code_hash = keccak256(b"\x60\x00");
        let hasher = Create2Hasher::new(&deployer, &init_code_hash);

        for salt in [0u64, 1, 255, 256, 0xdead_beef, u64::MAX] {
            assert_eq!(
                hasher.address(salt),
                create2_address(&deployer, &Salt::from_u64(salt), &init_code_hash),
                "salt {salt}"
            );
        }
    }

    #[test]
    fn test_hasher_zero_salt_vector() {
        let init_code_hash = keccak256(&[0x00]);
        let hasher = Create2Hasher::new(&Address::ZERO, &init_code_hash);
        assert_eq!(
            hasher.address(0).to_hex_prefixed(),
            "0x4d1a2e2bb4f88f0250f26ffff098b0b30b26bf38"
        );
    }
}
