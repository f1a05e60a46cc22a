use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rsa_interop::rsa::{HashAlg, PaddingScheme};
use rsa_interop::util::config::{VerifierConfig, DEFAULT_KEY_PATH};
use rsa_interop::util::encoding::{encode_ciphertext, CiphertextEncoding};
use rsa_interop::util::file_ops::write_file;
use rsa_interop::verify::{Vector, Verifier};

#[derive(Parser)]
#[command(version, about = "Check RSA ciphertexts from mobile clients against a private key")]
struct Cli {
    /// PEM private key (PKCS#1 or PKCS#8)
    #[arg(long, short, env = "RSA_INTEROP_KEY", default_value = DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// Ciphertext text encoding: base64 or hex
    #[arg(long, default_value = "base64")]
    encoding: CiphertextEncoding,

    /// Do not log recovered plaintext
    #[arg(long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decrypt a ciphertext and optionally compare it with the expected plaintext
    Decrypt {
        #[command(flatten)]
        padding: PaddingArgs,
        /// Fail unless the plaintext equals this string
        #[arg(long)]
        expect: Option<String>,
        /// Write the plaintext to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        ciphertext: String,
    },
    /// Encrypt a message with the public half of the key and check it decrypts
    Encrypt {
        #[command(flatten)]
        padding: PaddingArgs,
        message: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PaddingKind {
    /// PKCS#1 v1.5
    #[value(alias = "pkcs1v15")]
    Pkcs1,
    Oaep,
}

#[derive(Args)]
struct PaddingArgs {
    #[arg(long, value_enum, default_value_t = PaddingKind::Oaep)]
    padding: PaddingKind,
    /// OAEP digest
    #[arg(long, default_value = "sha256")]
    hash: HashAlg,
    /// OAEP label
    #[arg(long)]
    label: Option<String>,
}

impl PaddingArgs {
    fn scheme(&self) -> PaddingScheme {
        match (self.padding, &self.label) {
            (PaddingKind::Pkcs1, _) => PaddingScheme::Pkcs1v15,
            (PaddingKind::Oaep, Some(label)) => {
                PaddingScheme::oaep_with_label(self.hash, label.as_str())
            }
            (PaddingKind::Oaep, None) => PaddingScheme::oaep(self.hash),
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = VerifierConfig::default()
        .with_key_path(cli.key)
        .with_encoding(cli.encoding)
        .with_log_plaintext(!cli.quiet);
    let verifier = Verifier::from_config(config)
        .with_context(|| "sorry. can't read private key")?;

    match cli.command {
        Command::Decrypt {
            padding,
            expect,
            out,
            ciphertext,
        } => {
            let padding = padding.scheme();
            let plaintext = match &expect {
                Some(expected) => {
                    let vector = Vector {
                        name: "command line",
                        ciphertext: &ciphertext,
                        encoding: cli.encoding,
                        padding,
                        expected,
                    };
                    verifier.verify(&vector)?
                }
                None => verifier.decrypt_text(&ciphertext, &padding)?,
            };
            match out {
                Some(path) => write_file(&path, &plaintext)
                    .with_context(|| format!("unable to write {}", path.display()))?,
                None => println!("{}", String::from_utf8_lossy(&plaintext)),
            }
        }
        Command::Encrypt { padding, message } => {
            let padding = padding.scheme();
            let ciphertext = verifier.round_trip(message.as_bytes(), &padding)?;
            println!("{}", encode_ciphertext(&ciphertext, cli.encoding));
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
