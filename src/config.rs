//! Runtime configuration for the CREATE2 salt miner.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::crypto::{keccak256, keccak256_input, Address, Salt};
use crate::encoding::{decode_hex, parse_fixed};
use crate::error::{Error, Result};
use crate::matcher::Pattern;
use crate::output::DEFAULT_BATCH_SIZE;
use crate::request::{MineInput, MiningRequest};
use crate::worker::worker_count;

/// CREATE2 Vanity Salt Miner
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a salt range for addresses matching a pattern
    Mine(MineArgs),
    /// Compute the CREATE2 address for a single salt
    Predict(PredictArgs),
    /// Keccak-256 of a 0x hex string or of plain text
    Keccak(KeccakArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MineArgs {
    /// Deployer (factory) address, 20 bytes hex
    #[arg(short, long)]
    pub deployer: String,

    /// Keccak-256 of the contract init code, 32 bytes hex
    #[arg(short = 'i', long)]
    pub init_code_hash: String,

    /// First salt to scan (decimal or 0x hex)
    #[arg(long, default_value = "0")]
    pub salt_start: String,

    /// Number of salts to scan (decimal or 0x hex)
    #[arg(short = 'n', long, default_value = "100")]
    pub salt_count: String,

    /// Stop after this many matches (decimal or 0x hex)
    #[arg(short = 'm', long, default_value = "100")]
    pub max_results: String,

    /// Bits of the address that must match, 20 bytes hex
    #[arg(long)]
    pub mask: Option<String>,

    /// Required values of the masked bits, 20 bytes hex (default: zero)
    #[arg(long)]
    pub value: Option<String>,

    /// Hex prefix the address must start with
    #[arg(short, long, conflicts_with = "mask")]
    pub prefix: Option<String>,

    /// Hex suffix the address must end with
    #[arg(short, long, conflicts_with = "mask")]
    pub suffix: Option<String>,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Rows per output batch
    #[arg(short = 'b', long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "1")]
    pub report_interval: u64,
}

impl MineArgs {
    /// Validates the arguments that are not part of the request itself.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }
        Ok(())
    }

    /// Builds the mining request, with `--prefix`/`--suffix` taking the place
    /// of `--mask`/`--value` when given.
    pub fn to_request(&self) -> Result<MiningRequest> {
        let request = MineInput {
            deployer: Some(&self.deployer),
            init_code_hash: Some(&self.init_code_hash),
            salt_start: Some(&self.salt_start),
            salt_count: Some(&self.salt_count),
            mask: self.mask.as_deref(),
            value: self.value.as_deref(),
            max_results: Some(&self.max_results),
        }
        .into_request()?;

        let pattern = match (&self.prefix, &self.suffix) {
            (None, None) => return Ok(request),
            (Some(prefix), None) => Pattern::prefix(prefix)?,
            (None, Some(suffix)) => Pattern::suffix(suffix)?,
            (Some(prefix), Some(suffix)) => Pattern::prefix_and_suffix(prefix, suffix)?,
        };
        Ok(request.with_pattern(pattern))
    }

    /// Returns the number of workers for a scan of `salt_count` salts.
    pub fn worker_count(&self, salt_count: u64) -> usize {
        worker_count(salt_count, self.workers.unwrap_or_else(num_cpus::get))
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval.max(1))
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Deployer (factory) address, 20 bytes hex
    #[arg(short, long)]
    pub deployer: String,

    /// Salt: 0x-prefixed 32 bytes hex, or a decimal integer
    #[arg(short, long)]
    pub salt: String,

    /// Keccak-256 of the contract init code, 32 bytes hex
    #[arg(short = 'i', long, required_unless_present = "init_code")]
    pub init_code_hash: Option<String>,

    /// Contract init code, hex (hashed before use)
    #[arg(long, conflicts_with = "init_code_hash")]
    pub init_code: Option<String>,
}

impl PredictArgs {
    pub fn deployer(&self) -> Result<Address> {
        Address::parse(&self.deployer, "deployer")
    }

    pub fn salt(&self) -> Result<Salt> {
        Salt::parse(&self.salt, "salt")
    }

    /// The init code hash, computed from `--init-code` when that is given.
    pub fn init_code_hash(&self) -> Result<[u8; 32]> {
        match (&self.init_code_hash, &self.init_code) {
            (Some(hash), _) => parse_fixed::<32>(hash, "init_code_hash"),
            (None, Some(code)) => Ok(keccak256(&decode_hex(code, "init_code")?)),
            (None, None) => Err(Error::MissingField {
                field: "init_code_hash",
            }),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct KeccakArgs {
    /// Input: 0x-prefixed hex is hashed as bytes, anything else as text
    pub input: String,
}

impl KeccakArgs {
    pub fn digest(&self) -> Result<[u8; 32]> {
        keccak256_input(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYER: &str = "0x4e59b44847b379578588920ca78fbf26c0b4956c";
    const HASH: &str = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    fn make_test_mine_args() -> MineArgs {
        MineArgs {
            deployer: DEPLOYER.into(),
            init_code_hash: HASH.into(),
            salt_start: "0".into(),
            salt_count: "100".into(),
            max_results: "100".into(),
            mask: None,
            value: None,
            prefix: None,
            suffix: None,
            workers: None,
            batch_size: DEFAULT_BATCH_SIZE,
            report_interval: 1,
        }
    }

    fn parse(args: &[&str]) -> std::result::Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("create2_vanity").chain(args.iter().copied()))
    }

    #[test]
    fn test_valid_mine_args() {
        let args = make_test_mine_args();
        assert!(args.validate().is_ok());
        let request = args.to_request().unwrap();
        assert_eq!(request.salt_count(), 100);
        assert!(request.pattern().is_unfiltered());
    }

    #[test]
    fn test_zero_batch_size() {
        let args = MineArgs {
            batch_size: 0,
            ..make_test_mine_args()
        };
        assert!(matches!(args.validate(), Err(Error::ZeroBatchSize)));
    }

    #[test]
    fn test_prefix_pattern() {
        let args = MineArgs {
            prefix: Some("dead".into()),
            ..make_test_mine_args()
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.pattern().value()[..2], [0xde, 0xad]);
        assert_eq!(request.pattern().mask()[..3], [0xff, 0xff, 0x00]);
    }

    #[test]
    fn test_invalid_prefix() {
        let args = MineArgs {
            prefix: Some("xyz".into()),
            ..make_test_mine_args()
        };
        assert!(args.to_request().is_err());
    }

    #[test]
    fn test_worker_count_clamped_by_work() {
        let args = MineArgs {
            workers: Some(8),
            ..make_test_mine_args()
        };
        assert_eq!(args.worker_count(100), 1);
        assert_eq!(args.worker_count(16_384 * 4), 4);
        assert_eq!(args.worker_count(u64::MAX), 8);
    }

    #[test]
    fn test_parse_mine_command() {
        let config = parse(&[
            "mine",
            "--deployer",
            DEPLOYER,
            "--init-code-hash",
            HASH,
            "--salt-count",
            "0x1000",
            "--mask",
            "0xff00000000000000000000000000000000000000",
            "--value",
            "0x0000000000000000000000000000000000000000",
        ])
        .unwrap();

        let Command::Mine(args) = config.command else {
            panic!("expected mine command");
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.salt_count(), 4096);
        assert_eq!(request.pattern().mask()[0], 0xff);
        assert_eq!(args.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_mask_without_value_accepted() {
        let config = parse(&[
            "mine",
            "--deployer",
            DEPLOYER,
            "--init-code-hash",
            HASH,
            "--mask",
            "0xff00000000000000000000000000000000000000",
        ])
        .unwrap();

        let Command::Mine(args) = config.command else {
            panic!("expected mine command");
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.pattern().mask()[0], 0xff);
        assert_eq!(request.pattern().value(), &[0u8; 20]);
    }

    #[test]
    fn test_value_without_mask_accepted() {
        let config = parse(&[
            "mine",
            "--deployer",
            DEPLOYER,
            "--init-code-hash",
            HASH,
            "--value",
            "0xab00000000000000000000000000000000000000",
        ])
        .unwrap();

        let Command::Mine(args) = config.command else {
            panic!("expected mine command");
        };
        assert!(args.to_request().unwrap().pattern().is_unfiltered());
    }

    #[test]
    fn test_prefix_conflicts_with_mask() {
        let result = parse(&[
            "mine",
            "--deployer",
            DEPLOYER,
            "--init-code-hash",
            HASH,
            "--mask",
            "0xff00000000000000000000000000000000000000",
            "--value",
            "0x0000000000000000000000000000000000000000",
            "--prefix",
            "00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_predict_with_init_code() {
        let config = parse(&[
            "predict",
            "--deployer",
            "0x0000000000000000000000000000000000000000",
            "--salt",
            "0",
            "--init-code",
            "0x00",
        ])
        .unwrap();

        let Command::Predict(args) = config.command else {
            panic!("expected predict command");
        };
        assert_eq!(args.init_code_hash().unwrap(), keccak256(&[0u8]));
        assert_eq!(args.salt().unwrap(), Salt::ZERO);
        assert_eq!(args.deployer().unwrap(), Address::ZERO);
    }

    #[test]
    fn test_predict_requires_init_code() {
        let result = parse(&[
            "predict",
            "--deployer",
            "0x0000000000000000000000000000000000000000",
            "--salt",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_keccak_digest() {
        let args = KeccakArgs {
            input: "0x".into(),
        };
        assert_eq!(args.digest().unwrap(), keccak256(b""));
    }
}
