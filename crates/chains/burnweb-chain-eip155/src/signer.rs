//! secp256k1 transaction signing and the signature wire format.

use alloy_primitives::{Address, B256, Signature, U256, hex};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use burnweb_types::ChainParameters;
use std::fmt;

use crate::transaction::UnsignedTransaction;

const PRIVATE_KEY_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Signing failed: {0}")]
    Signing(String),
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
}

/// Parses a hex private key into a signer.
///
/// Accepts an optional `0x` prefix followed by exactly 64 hex digits.
pub(crate) fn parse_private_key(key: &str) -> Result<PrivateKeySigner, SignerError> {
    let digits = key.strip_prefix("0x").unwrap_or(key);
    if digits.len() != PRIVATE_KEY_HEX_LEN {
        return Err(SignerError::InvalidPrivateKey(format!(
            "expected {PRIVATE_KEY_HEX_LEN} hex digits, got {}",
            digits.len()
        )));
    }
    let bytes: B256 = digits
        .parse()
        .map_err(|_| SignerError::InvalidPrivateKey("not a hex string".to_string()))?;
    PrivateKeySigner::from_bytes(&bytes)
        .map_err(|_| SignerError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string()))
}

/// Signs ledger transactions with one private key.
#[derive(Clone)]
pub struct LedgerSigner {
    inner: PrivateKeySigner,
}

impl LedgerSigner {
    pub fn from_hex(key: &str) -> Result<Self, SignerError> {
        parse_private_key(key).map(|inner| Self { inner })
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Signs the EIP-155 hash of `tx` under `params`.
    ///
    /// Nonces are RFC 6979 derived, so the same transaction and key always yield the
    /// same signature.
    pub fn sign(
        &self,
        tx: &UnsignedTransaction,
        params: &ChainParameters,
    ) -> Result<TransactionSignature, SignerError> {
        let hash = tx.signing_hash(params);
        let signature = self
            .inner
            .sign_hash_sync(&hash)
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        Ok(TransactionSignature::from_parts(signature, params.chain_id))
    }
}

impl fmt::Debug for LedgerSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// A replay-protected `(v, r, s)` signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSignature {
    /// `y_parity + 35 + 2 * chain_id`.
    pub v: u128,
    pub r: U256,
    pub s: U256,
}

impl TransactionSignature {
    fn from_parts(signature: Signature, chain_id: u64) -> Self {
        let parity = u128::from(signature.v());
        Self {
            v: parity + 35 + 2 * u128::from(chain_id),
            r: signature.r(),
            s: signature.s(),
        }
    }

    /// Recovery bit, accepting both EIP-155 and pre-EIP-155 `v` values.
    pub fn y_parity(&self) -> bool {
        let base = if self.v >= 35 { 35 } else { 27 };
        self.v.saturating_sub(base) % 2 == 1
    }

    /// Minimal-byte `v` in hex followed by `r` and `s` at 64 hex digits each.
    pub fn to_hex(&self) -> String {
        let v_bytes = self.v.to_be_bytes();
        let first = v_bytes
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(v_bytes.len() - 1);
        format!(
            "{}{}{}",
            hex::encode(&v_bytes[first..]),
            hex::encode(self.r.to_be_bytes::<32>()),
            hex::encode(self.s.to_be_bytes::<32>())
        )
    }

    /// Parses the output of [`to_hex`](Self::to_hex).
    pub fn from_hex(text: &str) -> Result<Self, SignerError> {
        const RS_LEN: usize = 128;
        let malformed = |reason: &str| SignerError::MalformedSignature(reason.to_string());
        if !text.is_ascii() || text.len() <= RS_LEN || text.len() - RS_LEN > 32 {
            return Err(malformed("unexpected length"));
        }
        let (v, rs) = text.split_at(text.len() - RS_LEN);
        let v = u128::from_str_radix(v, 16).map_err(|_| malformed("v is not hex"))?;
        let r = U256::from_str_radix(&rs[..64], 16).map_err(|_| malformed("r is not hex"))?;
        let s = U256::from_str_radix(&rs[64..], 16).map_err(|_| malformed("s is not hex"))?;
        Ok(Self { v, r, s })
    }

    /// Address whose key produced this signature over `hash`.
    pub fn recover_address(&self, hash: &B256) -> Result<Address, SignerError> {
        Signature::new(self.r, self.s, self.y_parity())
            .recover_address_from_prehash(hash)
            .map_err(|e| SignerError::Signing(e.to_string()))
    }
}

impl fmt::Display for TransactionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};
    use burnweb_types::{Amount, Nonce};

    // Well-known development key #0 of most local EVM nodes.
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn sample_tx() -> UnsignedTransaction {
        UnsignedTransaction::contract_call(
            address!("0x9999999999999999999999999999999999999999"),
            bytes!("42966c680000000000000000000000000000000000000000000000000000000000000005"),
            Nonce::new(1_571_000_000_000),
        )
    }

    #[test]
    fn test_from_hex_derives_address() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        assert_eq!(signer.address(), KEY_ADDRESS);
        let unprefixed = LedgerSigner::from_hex(&KEY[2..]).unwrap();
        assert_eq!(unprefixed.address(), KEY_ADDRESS);
    }

    #[test]
    fn test_from_hex_rejects_bad_keys() {
        for key in [
            "",
            "0x",
            &KEY[..KEY.len() - 1],
            format!("{KEY}00").as_str(),
            "0xzz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "0x0000000000000000000000000000000000000000000000000000000000000000",
        ] {
            assert!(
                matches!(
                    LedgerSigner::from_hex(key),
                    Err(SignerError::InvalidPrivateKey(_))
                ),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_signature_recovers_signer() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let params = ChainParameters::from_chain_id(1337);
        let tx = sample_tx();
        let signature = signer.sign(&tx, &params).unwrap();
        let recovered = signature.recover_address(&tx.signing_hash(&params)).unwrap();
        assert_eq!(recovered, KEY_ADDRESS);
    }

    #[test]
    fn test_random_keys_recover_through_wire_hex() {
        let tx = sample_tx();
        for chain_id in [1u64, 255, 1337, 42793] {
            let params = ChainParameters::from_chain_id(chain_id);
            let hash = tx.signing_hash(&params);
            for _ in 0..50 {
                let account = crate::wallet::generate_account();
                let signer = LedgerSigner::from_hex(&account.private_key).unwrap();
                let wire = signer.sign(&tx, &params).unwrap().to_hex();
                let parsed = TransactionSignature::from_hex(&wire).unwrap();
                assert_eq!(parsed.recover_address(&hash).unwrap(), account.address);
            }
        }
    }

    #[test]
    fn test_v_binds_chain_id() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let tx = sample_tx();
        for chain_id in [1u64, 1337, 42793] {
            let signature = signer
                .sign(&tx, &ChainParameters::from_chain_id(chain_id))
                .unwrap();
            let base = 35 + 2 * u128::from(chain_id);
            assert!(signature.v == base || signature.v == base + 1);
            assert_eq!(signature.y_parity(), signature.v == base + 1);
        }
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let params = ChainParameters::from_chain_id(1);
        let first = signer.sign(&sample_tx(), &params).unwrap();
        let second = signer.sign(&sample_tx(), &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_native_transfer_signature_recovers() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let params = ChainParameters::from_chain_id(7);
        let tx = UnsignedTransaction::value_transfer(
            address!("0x8888888888888888888888888888888888888888"),
            Amount::parse("1").unwrap(),
            Nonce::new(2),
        );
        let signature = signer.sign(&tx, &params).unwrap();
        assert_eq!(
            signature.recover_address(&tx.signing_hash(&params)).unwrap(),
            KEY_ADDRESS
        );
    }

    #[test]
    fn test_to_hex_pads_r_and_s() {
        let signature = TransactionSignature {
            v: 37,
            r: U256::from(1u64),
            s: U256::from(0xabcu64),
        };
        let hex = signature.to_hex();
        assert_eq!(hex.len(), 2 + 64 + 64);
        assert_eq!(&hex[..2], "25");
        assert_eq!(&hex[2..66], format!("{:0>64}", "1"));
        assert_eq!(&hex[66..], format!("{:0>64}", "abc"));
    }

    #[test]
    fn test_to_hex_multibyte_v() {
        // chain 1337: v = 2709 or 2710, two bytes
        let signature = TransactionSignature {
            v: 2709,
            r: U256::MAX,
            s: U256::MAX,
        };
        let hex = signature.to_hex();
        assert!(hex.starts_with("0a95"));
        assert_eq!(hex.len(), 4 + 128);
        assert!(hex[4..].chars().all(|c| c == 'f'));
    }

    #[test]
    fn test_from_hex_parses_serialized_form() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let params = ChainParameters::from_chain_id(1337);
        let signature = signer.sign(&sample_tx(), &params).unwrap();
        let parsed = TransactionSignature::from_hex(&signature.to_hex()).unwrap();
        assert_eq!(parsed, signature);

        assert!(TransactionSignature::from_hex("25").is_err());
        assert!(TransactionSignature::from_hex(&"g".repeat(130)).is_err());
    }

    #[test]
    fn test_signed_hex_layout() {
        let signer = LedgerSigner::from_hex(KEY).unwrap();
        let signature = signer
            .sign(&sample_tx(), &ChainParameters::from_chain_id(1))
            .unwrap();
        let hex = signature.to_hex();
        // v is 37 or 38 on chain 1
        assert_eq!(hex.len(), 2 + 128);
        assert!(hex.starts_with("25") || hex.starts_with("26"));
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
