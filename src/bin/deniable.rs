//! Command-line front end for deniable dual-recipient encryption.
//!
//! ```bash
//! deniable keygen --out keys.json
//! deniable encrypt --dict-priv <DEC> --alice-priv <DEC> --x 5 --cm 99 --out cipher.json
//! deniable decrypt-dictator --dict-priv <DEC> --cipher cipher.json
//! deniable decrypt-alice --alice-priv <DEC> --cipher cipher.json --max 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use ark_ec::short_weierstrass::SWCurveConfig;
use ark_ff::PrimeField;
use clap::{Parser, Subcommand, ValueEnum};
use deniable_encryption::{
    decryption::{decrypt_alice, decrypt_dictator},
    discrete_log::{SearchConfig, DEFAULT_SEARCH_BOUND},
    encryption::encrypt,
    group::GroupContext,
    keygen::{generate_keys, SecretKey},
    record::{parse_integer, read_json, write_json, CiphertextRecord, KeysRecord},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Deniable encryption to a dictator with a hidden index for Alice",
    author,
    version
)]
struct Cli {
    /// Curve to operate on
    #[arg(long, value_enum, global = true, default_value = "secp256k1")]
    curve: CurveArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CurveArg {
    Secp256k1,
    Secp256r1,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate dictator and Alice keypairs
    Keygen {
        /// Output JSON file
        #[arg(long, default_value = "keys.json")]
        out: PathBuf,
    },
    /// Encrypt an integer for the dictator and a hidden index for Alice
    Encrypt {
        /// Dictator private scalar (decimal)
        #[arg(long = "dict-priv")]
        dict_priv: String,
        /// Alice private scalar (decimal)
        #[arg(long = "alice-priv")]
        alice_priv: String,
        /// Dictator message integer
        #[arg(long, default_value = "5", allow_hyphen_values = true)]
        x: String,
        /// Hidden message for Alice (index)
        #[arg(long, default_value_t = 99)]
        cm: u64,
        /// Output JSON file path
        #[arg(long, default_value = "cipher.json")]
        out: PathBuf,
    },
    /// Recover the dictator's integer
    DecryptDictator {
        /// Dictator private scalar (decimal)
        #[arg(long = "dict-priv")]
        dict_priv: String,
        /// Cipher JSON file
        #[arg(long, default_value = "cipher.json")]
        cipher: PathBuf,
    },
    /// Recover Alice's index and the key derived from it
    DecryptAlice {
        /// Alice private scalar (decimal)
        #[arg(long = "alice-priv")]
        alice_priv: String,
        /// Cipher JSON file
        #[arg(long, default_value = "cipher.json")]
        cipher: PathBuf,
        /// Inclusive upper bound for the index search
        #[arg(long)]
        max: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.curve {
        CurveArg::Secp256k1 => run::<ark_secp256k1::Config>(cli.command),
        CurveArg::Secp256r1 => run::<ark_secp256r1::Config>(cli.command),
    }
}

fn run<C: SWCurveConfig>(command: Commands) -> Result<(), Box<dyn std::error::Error>>
where
    C::BaseField: PrimeField,
{
    let ctx = GroupContext::<C>::new();
    match command {
        Commands::Keygen { out } => keygen(&ctx, &out),
        Commands::Encrypt {
            dict_priv,
            alice_priv,
            x,
            cm,
            out,
        } => encrypt_to_file(&ctx, &dict_priv, &alice_priv, &x, cm, &out),
        Commands::DecryptDictator { dict_priv, cipher } => dictator(&ctx, &dict_priv, &cipher),
        Commands::DecryptAlice {
            alice_priv,
            cipher,
            max,
        } => alice(&ctx, &alice_priv, &cipher, max.unwrap_or(DEFAULT_SEARCH_BOUND)),
    }
}

fn keygen<C: SWCurveConfig>(ctx: &GroupContext<C>, out: &Path) -> Result<(), Box<dyn std::error::Error>>
where
    C::BaseField: PrimeField,
{
    let keys = generate_keys(ctx)?;
    write_json(out, &KeysRecord::from_keys(ctx, &keys))?;
    println!("Keys written to {}", out.display());
    Ok(())
}

fn encrypt_to_file<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    dict_priv: &str,
    alice_priv: &str,
    x: &str,
    cm: u64,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>>
where
    C::BaseField: PrimeField,
{
    let dictator = SecretKey::from_decimal(ctx, dict_priv)?;
    let alice = SecretKey::from_decimal(ctx, alice_priv)?;
    let x = parse_integer(x)?;

    let ct = encrypt(ctx, &dictator, &alice, &x, cm)?;
    let record = CiphertextRecord::from_ciphertext(ctx, &ct);
    write_json(out, &record)?;
    info!(path = %out.display(), "ciphertext written");

    println!("Encrypted (c0): {}", record.c0);
    println!("Encrypted (c1): {}", record.c1);
    println!(
        "IndexPub (compressed): {}",
        hex::encode(ctx.encode_compressed(&ct.c1))
    );
    println!("SHA256(IndexPub): {}", hex::encode(ct.index_fingerprint(ctx)));
    Ok(())
}

fn dictator<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    dict_priv: &str,
    cipher: &Path,
) -> Result<(), Box<dyn std::error::Error>>
where
    C::BaseField: PrimeField,
{
    let record: CiphertextRecord = read_json(cipher)?;
    let ct = record.to_ciphertext(ctx)?;
    let sk = SecretKey::from_decimal(ctx, dict_priv)?;

    let start = Instant::now();
    let x = decrypt_dictator(ctx, &sk, &ct)?;
    println!("Dictator recovered: {} (in {:?})", x, start.elapsed());
    Ok(())
}

fn alice<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    alice_priv: &str,
    cipher: &Path,
    bound: u64,
) -> Result<(), Box<dyn std::error::Error>>
where
    C::BaseField: PrimeField,
{
    let record: CiphertextRecord = read_json(cipher)?;
    let ct = record.to_ciphertext(ctx)?;
    let t = SecretKey::from_decimal(ctx, alice_priv)?;

    let start = Instant::now();
    let outcome = decrypt_alice(ctx, &t, &ct, &SearchConfig::with_bound(bound))?;
    let elapsed = start.elapsed();

    let Some(recovery) = outcome else {
        println!("Alice index not found in range 0..{} (time: {:?})", bound, elapsed);
        return Ok(());
    };

    println!("Alice recovered index (cm): {} (in {:?})", recovery.index, elapsed);
    println!(
        "Derived private key: {}",
        hex::encode(recovery.derived.secret_bytes(ctx))
    );
    println!(
        "Derived public key (comp): {}",
        hex::encode(recovery.derived.public_compressed(ctx))
    );
    println!("SHA256(pub): {}", hex::encode(recovery.derived.fingerprint(ctx)));
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .with_writer(std::io::stderr)
            .try_init();
    });
}
