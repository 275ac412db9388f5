use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use imgcrypt::cli::{
    build_context, handle_config, handle_decrypt, handle_encrypt, handle_history, handle_init,
    handle_keygen, parse_key_size, prompt_request, Action,
};
use imgcrypt::config::{ImgcryptPaths, Settings};
use imgcrypt::crypto::KeySize;
use imgcrypt::display;

#[derive(Parser)]
#[command(
    name = "imgcrypt",
    version,
    about = "Encrypt and decrypt image files with AES-CBC",
    long_about = "imgcrypt encrypts a single file into an IV-prefixed AES-CBC envelope \
                  and decrypts it again. The key is read from $IMGCRYPT_KEY (base64) \
                  or a key file. Run without a command for interactive mode."
)]
struct Cli {
    /// File containing the base64 key (overrides $IMGCRYPT_KEY)
    #[arg(short, long, global = true, value_name = "FILE")]
    key_file: Option<PathBuf>,

    /// Don't print the banner
    #[arg(long, global = true)]
    no_banner: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file to <path>.enc
    #[command(alias = "e")]
    Encrypt {
        /// File to encrypt
        path: PathBuf,
        /// Accept files that aren't recognised images
        #[arg(long)]
        any_file: bool,
    },

    /// Decrypt a .enc file
    #[command(alias = "d")]
    Decrypt {
        /// Encrypted file, must end with .enc
        path: PathBuf,
    },

    /// Generate a random base64 key
    Keygen {
        /// Key size in bytes (16, 24 or 32)
        #[arg(short, long, default_value = "16", value_parser = parse_key_size)]
        size: KeySize,
    },

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Show recent encrypt/decrypt operations
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", display::failure(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ImgcryptPaths::new()?;
    let key_file = cli.key_file.as_deref();

    match cli.command {
        Some(Commands::Encrypt { path, any_file }) => {
            banner(cli.no_banner);
            let settings = Settings::load_or_create(&paths)?;
            encrypt(&paths, &settings, key_file, any_file, &path)?;
        }
        Some(Commands::Decrypt { path }) => {
            banner(cli.no_banner);
            let settings = Settings::load_or_create(&paths)?;
            decrypt(&paths, &settings, key_file, &path)?;
        }
        Some(Commands::Keygen { size }) => handle_keygen(size)?,
        Some(Commands::Init) => handle_init(&paths, &Settings::load_or_create(&paths)?)?,
        Some(Commands::Config) => {
            handle_config(&paths, &Settings::load_or_create(&paths)?, key_file)?
        }
        Some(Commands::History { limit }) => handle_history(&paths, limit)?,
        None => {
            banner(cli.no_banner);
            println!("{}", display::info("Interactive Mode Enabled"));

            let settings = Settings::load_or_create(&paths)?;
            let request = prompt_request(&mut io::stdin().lock(), &mut io::stdout())?;
            match request.action {
                Action::Encrypt => encrypt(&paths, &settings, key_file, false, &request.path)?,
                Action::Decrypt => decrypt(&paths, &settings, key_file, &request.path)?,
            }
        }
    }

    Ok(())
}

fn banner(hidden: bool) {
    if !hidden {
        println!("{}", display::banner());
    }
}

fn encrypt(
    paths: &ImgcryptPaths,
    settings: &Settings,
    key_file: Option<&Path>,
    any_file: bool,
    path: &Path,
) -> Result<()> {
    let ctx = build_context(paths, settings, key_file, any_file)?;
    handle_encrypt(&ctx, path).with_context(|| format!("Could not encrypt {}", path.display()))?;
    Ok(())
}

fn decrypt(
    paths: &ImgcryptPaths,
    settings: &Settings,
    key_file: Option<&Path>,
    path: &Path,
) -> Result<()> {
    let ctx = build_context(paths, settings, key_file, false)?;
    handle_decrypt(&ctx, path).with_context(|| format!("Could not decrypt {}", path.display()))?;
    Ok(())
}
