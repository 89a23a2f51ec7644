use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;
use std::process;
use tracing::debug;

use ztesms_lib::{
    AuthSession, ChangeResult, FileStore, HttpTransport, PasswordEncoding, RouterError, SmsList,
    SmsSync, sms,
};

/// Log in to a ZTE router's web interface and report newly arrived SMS.
#[derive(Parser, Debug)]
#[command(name = "ztesms", version, about, long_about = None)]
struct Cli {
    /// IP address of the modem, e.g. 192.168.0.1
    modem_ip: String,
    /// Web interface login password
    password: String,
    /// Password encoding expected by the firmware's LOGIN handler.
    ///
    /// The firmware does not advertise which one it wants, so this defaults
    /// to the challenge-salted variant seen on current builds.
    #[arg(long, value_enum, default_value_t = EncodingArg::DoubleSha256)]
    encoding: EncodingArg,
    /// Directory for the persisted change-detection state
    /// (default: the per-user data directory)
    #[arg(long)]
    state_dir: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum EncodingArg {
    Sha256Base64,
    DoubleSha256,
    PlainBase64,
}

impl From<EncodingArg> for PasswordEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Sha256Base64 => PasswordEncoding::Sha256Base64,
            EncodingArg::DoubleSha256 => PasswordEncoding::DoubleSha256WithChallenge,
            EncodingArg::PlainBase64 => PasswordEncoding::PlainBase64,
        }
    }
}

fn run(cli: &Cli) -> Result<(), RouterError> {
    let transport = HttpTransport::new(&cli.modem_ip)?;

    let auth = AuthSession::new(&transport);
    let challenge = auth.fetch_challenge()?;
    auth.login(&cli.password, &challenge, cli.encoding.into())?;

    let sync = SmsSync::new(&transport);
    println!("{}", sync.fetch_capacity_info()?);

    let messages = match sync.fetch_messages()? {
        SmsList::Available(messages) => messages,
        SmsList::Unavailable => {
            println!("Messages are not available.");
            return Ok(());
        }
    };

    // Fingerprint over the raw list before decoding touches the content
    let fingerprint = sms::compute_fingerprint(&messages);
    debug!(%fingerprint, "computed change fingerprint");

    for message in sms::present(messages) {
        println!("ID: {}", message.id);
        println!("Number: {}", message.number);
        println!("Content: {}", message.content);
        println!("Tag: {}", message.tag);
        println!("Date: {}", message.date);
        println!();
    }

    let mut store = match &cli.state_dir {
        Some(dir) => FileStore::open(dir)?,
        None => FileStore::open_default()?,
    };
    if sms::detect_and_record_change(&fingerprint, &mut store)? == ChangeResult::New {
        println!("New messages detected.");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_target(false)
        .init();

    if let Err(err) = run(&cli) {
        match err {
            RouterError::ChallengeUnavailable
            | RouterError::AccountLocked
            | RouterError::LoginFailed { .. } => eprintln!("{err}"),
            other => eprintln!("Error: {other}"),
        }
        process::exit(1);
    }
}
