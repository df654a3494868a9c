//! Configuration parsing and validation.

use hamsplit::{ConfigError, Error, IdentityLayout, IndexConfig, XorSplitIndex};

fn config_error(config: IndexConfig) -> ConfigError {
    match XorSplitIndex::new(&config, &[1, 2, 3]) {
        Err(Error::Config(e)) => e,
        Err(other) => panic!("expected a config error, got {}", other),
        Ok(_) => panic!("expected a config error, index built"),
    }
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config: IndexConfig = serde_json::from_str(r#"{"block_count": 8, "combination": 3}"#).unwrap();
    assert_eq!(config.block_count, 8);
    assert_eq!(config.combination, 3);
    assert_eq!(config.chosen_blocks, 1);
    assert_eq!(config.low_width, 32);
    assert_eq!(config.xor_len, 6);

    let widths = config.validate().unwrap();
    assert_eq!(widths.splitter(), 8);
    assert_eq!(widths.mid(), 24);
    assert_eq!(widths.low(), 32);
}

#[test]
fn test_config_json_round_trip() {
    let config = IndexConfig {
        block_count: 16,
        chosen_blocks: 3,
        combination: 100,
        low_width: 20,
        xor_len: 5,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: IndexConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_low_width_bounds() {
    let base = IndexConfig {
        block_count: 8,
        ..IndexConfig::default()
    };
    assert_eq!(
        config_error(IndexConfig { low_width: 0, ..base }),
        ConfigError::InvalidLowWidth(0)
    );
    assert_eq!(
        config_error(IndexConfig { low_width: 33, ..base }),
        ConfigError::InvalidLowWidth(33)
    );
}

#[test]
fn test_xor_len_bounds() {
    let base = IndexConfig {
        block_count: 8,
        ..IndexConfig::default()
    };
    assert_eq!(
        config_error(IndexConfig { xor_len: 0, ..base }),
        ConfigError::InvalidXorLen(0)
    );
    assert_eq!(
        config_error(IndexConfig { xor_len: 17, ..base }),
        ConfigError::InvalidXorLen(17)
    );
}

#[test]
fn test_key_universe_limit() {
    // 2 of 4 blocks is 32 splitter bits; nothing is left for the signature
    let config = IndexConfig {
        block_count: 4,
        chosen_blocks: 2,
        ..IndexConfig::default()
    };
    assert_eq!(config_error(config), ConfigError::KeyUniverseTooLarge { bits: 38 });
}

#[test]
fn test_splitter_overflow_with_custom_layout() {
    let err = XorSplitIndex::with_layout(IdentityLayout::new(40), 32, 4, 0, &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::SplitterOverflow { splitter: 40, low: 32 })
    ));
}

#[test]
fn test_bad_blocks_and_combination() {
    assert_eq!(
        config_error(IndexConfig {
            block_count: 4,
            chosen_blocks: 5,
            ..IndexConfig::default()
        }),
        ConfigError::InvalidBlocks { blocks: 4, chosen: 5 }
    );
    assert_eq!(
        config_error(IndexConfig {
            combination: 4,
            ..IndexConfig::default()
        }),
        ConfigError::CombinationOutOfRange { id: 4, count: 4 }
    );
}

#[test]
fn test_config_error_messages() {
    let err = Error::from(ConfigError::InvalidXorLen(20));
    assert_eq!(
        err.to_string(),
        "invalid configuration: signature width 20 must be in 1..=16"
    );
}
