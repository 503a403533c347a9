//! JSON records exchanged between the command-line tools.
//!
//! Scalars and integers travel as decimal strings and points as hex of
//! their uncompressed SEC1 encoding:
//!
//! ```json
//! { "dictator": { "priv": "7", "pub": "04…" }, "alice": { "priv": "11", "pub": "04…" } }
//! { "c0": "1234…", "c1": "04…" }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ark_ec::short_weierstrass::SWCurveConfig;
use ark_ff::PrimeField;
use num_bigint::BigInt;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::encryption::Ciphertext;
use crate::error::DeniableError;
use crate::group::GroupContext;
use crate::keygen::{KeyPair, RoleKeys, SecretKey};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeyPairRecord {
    /// Decimal private scalar
    #[serde(rename = "priv")]
    pub private: String,
    /// Hex uncompressed public point
    #[serde(rename = "pub")]
    pub public: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeysRecord {
    pub dictator: KeyPairRecord,
    pub alice: KeyPairRecord,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CiphertextRecord {
    /// Decimal integer
    pub c0: String,
    /// Hex uncompressed point
    pub c1: String,
}

impl KeyPairRecord {
    pub fn from_keypair<C: SWCurveConfig>(ctx: &GroupContext<C>, pair: &KeyPair<C>) -> Self
    where
        C::BaseField: PrimeField,
    {
        KeyPairRecord {
            private: pair.secret.to_decimal(ctx),
            public: hex::encode(ctx.encode_uncompressed(&pair.public)),
        }
    }

    /// Parses the record and checks that `pub` is `priv * G`.
    pub fn to_keypair<C: SWCurveConfig>(&self, ctx: &GroupContext<C>) -> Result<KeyPair<C>, DeniableError>
    where
        C::BaseField: PrimeField,
    {
        let secret = SecretKey::from_decimal(ctx, &self.private)?;
        let public = ctx.decode_hex(&self.public)?;
        let pair = KeyPair::from_secret(ctx, secret);
        if pair.public != public {
            return Err(DeniableError::InvalidParameter(
                "public key does not match private key".to_string(),
            ));
        }
        Ok(pair)
    }
}

impl KeysRecord {
    pub fn from_keys<C: SWCurveConfig>(ctx: &GroupContext<C>, keys: &RoleKeys<C>) -> Self
    where
        C::BaseField: PrimeField,
    {
        KeysRecord {
            dictator: KeyPairRecord::from_keypair(ctx, &keys.dictator),
            alice: KeyPairRecord::from_keypair(ctx, &keys.alice),
        }
    }

    pub fn to_keys<C: SWCurveConfig>(&self, ctx: &GroupContext<C>) -> Result<RoleKeys<C>, DeniableError>
    where
        C::BaseField: PrimeField,
    {
        Ok(RoleKeys {
            dictator: self.dictator.to_keypair(ctx)?,
            alice: self.alice.to_keypair(ctx)?,
        })
    }
}

impl CiphertextRecord {
    pub fn from_ciphertext<C: SWCurveConfig>(ctx: &GroupContext<C>, ct: &Ciphertext<C>) -> Self
    where
        C::BaseField: PrimeField,
    {
        CiphertextRecord {
            c0: ct.c0.to_string(),
            c1: hex::encode(ctx.encode_uncompressed(&ct.c1)),
        }
    }

    /// Parses `c0` and decodes `c1`.
    ///
    /// # Errors
    /// Returns an error if `c0` is not a decimal integer or `c1` is not a
    /// valid point encoding
    pub fn to_ciphertext<C: SWCurveConfig>(
        &self,
        ctx: &GroupContext<C>,
    ) -> Result<Ciphertext<C>, DeniableError>
    where
        C::BaseField: PrimeField,
    {
        let c0 = parse_integer(&self.c0)?;
        let c1 = ctx.decode_hex(&self.c1)?;
        Ok(Ciphertext::new(c0, c1))
    }
}

/// Parses a signed decimal integer of any size.
pub fn parse_integer(decimal: &str) -> Result<BigInt, DeniableError> {
    let trimmed = decimal.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeniableError::InvalidInteger(format!(
            "'{}' is not a decimal integer",
            decimal
        )));
    }
    BigInt::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(|| {
        DeniableError::InvalidInteger(format!("'{}' is not a decimal integer", decimal))
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DeniableError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes `value` as two-space indented JSON followed by a newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DeniableError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decryption::decrypt_dictator, encryption::encrypt, keygen::generate_keys_with_rng};

    type K256 = ark_secp256k1::Config;

    #[test]
    fn test_keys_record_format() {
        let ctx = GroupContext::<K256>::new();
        let pair = KeyPair::from_secret(&ctx, SecretKey::from_decimal(&ctx, "1").unwrap());
        let record = KeyPairRecord::from_keypair(&ctx, &pair);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["priv"], "1");
        assert_eq!(
            json["pub"],
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_keys_record_through_file() {
        let mut rng = ark_std::test_rng();
        let ctx = GroupContext::<K256>::new();
        let keys = generate_keys_with_rng(&ctx, &mut rng);
        let record = KeysRecord::from_keys(&ctx, &keys);

        let path = std::env::temp_dir().join(format!("deniable-keys-{}.json", std::process::id()));
        write_json(&path, &record).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"dictator\": {\n    \"priv\": "));

        let loaded: KeysRecord = read_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, record);

        let parsed = loaded.to_keys(&ctx).unwrap();
        assert_eq!(parsed.dictator.secret, keys.dictator.secret);
        assert_eq!(parsed.alice.public, keys.alice.public);
    }

    #[test]
    fn test_mismatched_keypair_record_is_rejected() {
        let ctx = GroupContext::<K256>::new();
        let pair = KeyPair::from_secret(&ctx, SecretKey::from_decimal(&ctx, "2").unwrap());
        let mut record = KeyPairRecord::from_keypair(&ctx, &pair);
        record.private = "3".to_string();

        assert!(matches!(
            record.to_keypair::<K256>(&ctx),
            Err(DeniableError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_ciphertext_record() {
        let ctx = GroupContext::<K256>::new();
        let sk = SecretKey::from_decimal(&ctx, "7").unwrap();
        let t = SecretKey::from_decimal(&ctx, "11").unwrap();
        let ct = encrypt(&ctx, &sk, &t, &BigInt::from(42), 5).unwrap();

        let record = CiphertextRecord::from_ciphertext(&ctx, &ct);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: CiphertextRecord = serde_json::from_str(&json).unwrap();
        let decoded = parsed.to_ciphertext(&ctx).unwrap();

        assert_eq!(decoded, ct);
        assert_eq!(decrypt_dictator(&ctx, &sk, &decoded).unwrap(), BigInt::from(42));
    }

    #[test]
    fn test_malformed_ciphertext_record() {
        let ctx = GroupContext::<K256>::new();
        let good_c1 = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                       483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

        let bad_c0 = CiphertextRecord {
            c0: "12x".to_string(),
            c1: good_c1.to_string(),
        };
        assert!(matches!(
            bad_c0.to_ciphertext::<K256>(&ctx),
            Err(DeniableError::InvalidInteger(_))
        ));

        let bad_hex = CiphertextRecord {
            c0: "12".to_string(),
            c1: "04not-hex".to_string(),
        };
        assert!(matches!(
            bad_hex.to_ciphertext::<K256>(&ctx),
            Err(DeniableError::InvalidHex(_))
        ));

        let zero_point = CiphertextRecord {
            c0: "12".to_string(),
            c1: "00".repeat(65),
        };
        assert!(matches!(
            zero_point.to_ciphertext::<K256>(&ctx),
            Err(DeniableError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42").unwrap(), BigInt::from(42));
        assert_eq!(parse_integer("-5").unwrap(), BigInt::from(-5));
        for bad in ["", "-", "+5", "4 2", "1e3"] {
            assert!(parse_integer(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("deniable-does-not-exist.json");
        assert!(matches!(
            read_json::<CiphertextRecord>(&path),
            Err(DeniableError::Io(_))
        ));
    }
}
