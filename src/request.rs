//! Validated mining parameters.

use crate::crypto::Address;
use crate::encoding::{parse_fixed, parse_u64_or};
use crate::error::{Error, Result};
use crate::matcher::Pattern;

pub const DEFAULT_SALT_START: u64 = 0;
pub const DEFAULT_SALT_COUNT: u64 = 100;
pub const DEFAULT_MAX_RESULTS: u64 = 100;

/// Immutable parameters of one mining query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningRequest {
    deployer: Address,
    init_code_hash: [u8; 32],
    salt_start: u64,
    salt_count: u64,
    max_results: u64,
    pattern: Pattern,
}

impl MiningRequest {
    pub fn builder(deployer: Address, init_code_hash: [u8; 32]) -> MiningRequestBuilder {
        MiningRequestBuilder {
            deployer,
            init_code_hash,
            salt_start: DEFAULT_SALT_START,
            salt_count: DEFAULT_SALT_COUNT,
            max_results: DEFAULT_MAX_RESULTS,
            pattern: Pattern::any(),
        }
    }

    pub fn deployer(&self) -> &Address {
        &self.deployer
    }

    pub fn init_code_hash(&self) -> &[u8; 32] {
        &self.init_code_hash
    }

    pub fn salt_start(&self) -> u64 {
        self.salt_start
    }

    pub fn salt_count(&self) -> u64 {
        self.salt_count
    }

    /// Exclusive end of the scanned range, saturated at `u64::MAX`.
    pub fn salt_end(&self) -> u64 {
        self.salt_start.saturating_add(self.salt_count)
    }

    /// Number of salts actually reachable once the end is saturated.
    pub fn effective_count(&self) -> u64 {
        self.salt_end() - self.salt_start
    }

    pub fn max_results(&self) -> u64 {
        self.max_results
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Replaces the pattern, keeping every other parameter.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }
}

/// Builder for [`MiningRequest`].
#[derive(Debug, Clone)]
pub struct MiningRequestBuilder {
    deployer: Address,
    init_code_hash: [u8; 32],
    salt_start: u64,
    salt_count: u64,
    max_results: u64,
    pattern: Pattern,
}

impl MiningRequestBuilder {
    pub fn salt_start(mut self, salt_start: u64) -> Self {
        self.salt_start = salt_start;
        self
    }

    pub fn salt_count(mut self, salt_count: u64) -> Self {
        self.salt_count = salt_count;
        self
    }

    pub fn max_results(mut self, max_results: u64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn build(self) -> Result<MiningRequest> {
        if self.max_results == 0 {
            return Err(Error::ZeroMaxResults);
        }

        Ok(MiningRequest {
            deployer: self.deployer,
            init_code_hash: self.init_code_hash,
            salt_start: self.salt_start,
            salt_count: self.salt_count,
            max_results: self.max_results,
            pattern: self.pattern,
        })
    }
}

/// Text form of a mining request, every field optional.
///
/// Blank or absent numeric fields take their defaults. An absent mask (or an
/// all-zero one) means every address matches, and an absent value is zero.
#[derive(Debug, Clone, Default)]
pub struct MineInput<'a> {
    pub deployer: Option<&'a str>,
    pub init_code_hash: Option<&'a str>,
    pub salt_start: Option<&'a str>,
    pub salt_count: Option<&'a str>,
    pub mask: Option<&'a str>,
    pub value: Option<&'a str>,
    pub max_results: Option<&'a str>,
}

impl MineInput<'_> {
    pub fn into_request(self) -> Result<MiningRequest> {
        let deployer = self.deployer.ok_or(Error::MissingField { field: "deployer" })?;
        let init_code_hash = self
            .init_code_hash
            .ok_or(Error::MissingField { field: "init_code_hash" })?;

        let deployer = Address::parse(deployer, "deployer")?;
        let init_code_hash = parse_fixed::<32>(init_code_hash, "init_code_hash")?;

        // An absent mask or value reads as all zeros.
        let pattern = match self.mask {
            None => Pattern::any(),
            Some(mask) => {
                let mask = parse_fixed::<20>(mask, "mask")?;
                let value = match self.value {
                    Some(v) => parse_fixed::<20>(v, "value")?,
                    None => [0u8; 20],
                };
                Pattern::new(mask, value)
            }
        };

        MiningRequest::builder(deployer, init_code_hash)
            .salt_start(parse_u64_or(self.salt_start, DEFAULT_SALT_START, "salt_start")?)
            .salt_count(parse_u64_or(self.salt_count, DEFAULT_SALT_COUNT, "salt_count")?)
            .max_results(parse_u64_or(self.max_results, DEFAULT_MAX_RESULTS, "max_results")?)
            .pattern(pattern)
            .build()
    }
}
