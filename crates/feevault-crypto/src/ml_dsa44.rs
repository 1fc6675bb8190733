//! ML-DSA-44 approval signature backend.
//!
//! Uses the `fips204` crate, a pure Rust implementation of FIPS 204.
//!
//! - Public key: 1,312 bytes
//! - Secret key: 2,560 bytes
//! - Signature: 2,420 bytes
//!
//! Nothing in this module logs secret key material.

use std::io::Write;
use std::path::Path;

use fips204::ml_dsa_44;
use fips204::traits::{SerDes, Signer, Verifier};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use feevault_types::{Address, Hash32};

use crate::error::CryptoError;
use crate::recovery::{address_from_public_key, ApprovalSignature};

pub const ML_DSA_44_PUBLIC_KEY_SIZE: usize = 1312;
pub const ML_DSA_44_SECRET_KEY_SIZE: usize = 2560;
pub const ML_DSA_44_SIGNATURE_SIZE: usize = 2420;

/// Stateless ML-DSA-44 operations over raw byte slices.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlDsa44Backend;

impl MlDsa44Backend {
    /// Generate a new keypair, returned as `(public_key, secret_key)`.
    pub fn generate_keypair() -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let (pk, sk) = ml_dsa_44::try_keygen().map_err(|_| CryptoError::Backend("keygen"))?;
        Ok((pk.into_bytes().to_vec(), sk.into_bytes().to_vec()))
    }

    fn parse_secret_key(sk: &[u8]) -> Result<ml_dsa_44::PrivateKey, CryptoError> {
        let sk_array: [u8; ML_DSA_44_SECRET_KEY_SIZE] = sk
            .try_into()
            .map_err(|_| CryptoError::MalformedKey("secret key has wrong length"))?;
        ml_dsa_44::PrivateKey::try_from_bytes(sk_array)
            .map_err(|_| CryptoError::MalformedKey("secret key rejected"))
    }

    pub fn derive_public_key(sk: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let secret_key = Self::parse_secret_key(sk)?;
        Ok(secret_key.get_public_key().into_bytes().to_vec())
    }

    /// Sign a message with an empty context string.
    pub fn sign(sk: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let secret_key = Self::parse_secret_key(sk)?;
        let signature = secret_key
            .try_sign(message, &[])
            .map_err(|_| CryptoError::Backend("signing"))?;
        Ok(signature.to_vec())
    }

    pub fn verify(pk: &[u8], message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let pk_array: [u8; ML_DSA_44_PUBLIC_KEY_SIZE] = pk
            .try_into()
            .map_err(|_| CryptoError::MalformedKey("public key has wrong length"))?;
        let public_key = ml_dsa_44::PublicKey::try_from_bytes(pk_array)
            .map_err(|_| CryptoError::MalformedKey("public key rejected"))?;
        let sig_array: [u8; ML_DSA_44_SIGNATURE_SIZE] = signature.try_into().map_err(|_| {
            CryptoError::MalformedSignature(format!(
                "signature must be {} bytes, got {}",
                ML_DSA_44_SIGNATURE_SIZE,
                signature.len()
            ))
        })?;

        if public_key.verify(message, &sig_array, &[]) {
            Ok(())
        } else {
            Err(CryptoError::InvalidSignature)
        }
    }
}

/// Approver signing key, zeroized on drop.
///
/// Not `Clone`, and `Debug` never prints the key bytes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ApprovalSigningKey {
    secret: Vec<u8>,
    #[zeroize(skip)]
    public: Vec<u8>,
}

impl ApprovalSigningKey {
    pub fn generate() -> Result<Self, CryptoError> {
        let (public, secret) = MlDsa44Backend::generate_keypair()?;
        Ok(ApprovalSigningKey { secret, public })
    }

    /// Wrap existing secret key bytes, deriving the public half. The input
    /// is wiped on every path, including rejection.
    pub fn from_secret_bytes(mut secret: Zeroizing<Vec<u8>>) -> Result<Self, CryptoError> {
        let public = MlDsa44Backend::derive_public_key(&secret)?;
        Ok(ApprovalSigningKey {
            secret: std::mem::take(&mut *secret),
            public,
        })
    }

    /// Load a hex-encoded secret key file.
    pub fn read_from_file(path: &Path) -> Result<Self, CryptoError> {
        let text = Zeroizing::new(
            std::fs::read_to_string(path)
                .map_err(|e| CryptoError::KeyFile(format!("read {}: {}", path.display(), e)))?,
        );
        let secret = Zeroizing::new(
            hex::decode(text.trim())
                .map_err(|e| CryptoError::KeyFile(format!("decode {}: {}", path.display(), e)))?,
        );
        Self::from_secret_bytes(secret)
    }

    /// Write the secret hex-encoded to `path`, readable by the owner only.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CryptoError> {
        let io_err = |e: std::io::Error| CryptoError::KeyFile(format!("write {}: {}", path.display(), e));
        let encoded = Zeroizing::new(hex::encode(&self.secret));

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path).map_err(io_err)?;
        // An existing file keeps its old mode on open.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }
        file.write_all(encoded.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)
    }

    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    /// Signer address this key approves as.
    pub fn address(&self) -> Address {
        address_from_public_key(&self.public)
    }

    /// Sign an approval digest and wrap it in the wire envelope.
    pub fn sign_approval(&self, digest: &Hash32) -> Result<Vec<u8>, CryptoError> {
        let signature = MlDsa44Backend::sign(&self.secret, digest)?;
        Ok(ApprovalSignature::new(self.public.clone(), signature).to_bytes())
    }
}

impl std::fmt::Debug for ApprovalSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalSigningKey")
            .field("address", &self.address())
            .field("secret", &format!("<redacted:{}>", self.secret.len()))
            .finish()
    }
}
