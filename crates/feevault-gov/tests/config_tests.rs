use std::io::Write;
use std::sync::Arc;

use feevault_crypto::MlDsa44Recovery;
use feevault_gov::{ConfigError, ManualClock, TreasuryConfig, TreasuryError, DEFAULT_MAX_FEE};
use feevault_types::{Address, ChainId, NetworkEnvironment, U256, FEEVAULT_TESTNET_CHAIN_ID};

const CONFIG_JSON: &str = r#"{
    "network": "testnet",
    "authority": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
    "signers": [
        "0x1111111111111111111111111111111111111111",
        "0x2222222222222222222222222222222222222222",
        "0x3333333333333333333333333333333333333333"
    ],
    "signatures_required": 2,
    "execution_delay_secs": 60
}"#;

#[test]
fn parses_with_defaults() {
    let config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    assert_eq!(config.network, NetworkEnvironment::Testnet);
    assert_eq!(config.chain_id(), FEEVAULT_TESTNET_CHAIN_ID);
    assert_eq!(config.domain_name, "FeeVault");
    assert_eq!(config.domain_version, "1");
    assert_eq!(config.max_fee, U256::from_u128(DEFAULT_MAX_FEE));
    assert_eq!(config.signers.len(), 3);
    assert!(config.validate().is_ok());
}

#[test]
fn explicit_chain_id_overrides_network() {
    let mut config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    config.chain_id = Some(31337);
    assert_eq!(config.chain_id(), ChainId(31337));
    assert_eq!(config.domain().chain_id, ChainId(31337));
}

#[test]
fn loads_from_file_and_builds_treasury() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG_JSON.as_bytes()).unwrap();

    let config = TreasuryConfig::from_file(file.path()).unwrap();
    let treasury = config
        .build(Arc::new(ManualClock::new(0)), Arc::new(MlDsa44Recovery))
        .unwrap();
    assert_eq!(treasury.threshold(), 2);
    assert_eq!(treasury.execution_delay(), 60);
    assert_eq!(treasury.authority(), Address([0xAA; 20]));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TreasuryConfig::from_file(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(
        TreasuryConfig::from_json("{ not json"),
        Err(ConfigError::ParseError(_))
    ));
    let bad_address = CONFIG_JSON.replace("0x1111111111111111111111111111111111111111", "0x11");
    assert!(matches!(
        TreasuryConfig::from_json(&bad_address),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn validation_reports_signer_errors() {
    let mut config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    config.signatures_required = 3;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(TreasuryError::NotEnoughSigners))
    ));

    let mut config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    config.signers.swap(0, 1);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(TreasuryError::SignersOutOfOrder))
    ));

    let mut config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    config.authority = Address::zero();
    assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
}

#[test]
fn pretty_json_roundtrips() {
    let config = TreasuryConfig::from_json(CONFIG_JSON).unwrap();
    let json = config.to_json_pretty().unwrap();
    assert_eq!(TreasuryConfig::from_json(&json).unwrap(), config);
}
