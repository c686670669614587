use std::io::{self, Write};
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser};

use passgen::allocator::allocate;
use passgen::{Form, Generator, Scheme};

#[derive(Parser)]
#[command(about = "Generate random passwords")]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Log more details to stderr; repeat for even more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Print how long generating the password took to stderr.
    #[arg(long, global = true)]
    time: bool,
    /// Print an estimate of the password's entropy, in bits, to stderr.
    #[arg(long, global = true)]
    entropy: bool,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a password from one of the standard encoding alphabets.
    Scheme {
        /// The desired password length.
        #[arg(short, default_value_t = 8)]
        l: usize,
        /// The encoding scheme to draw from: hexadecimal, base32, base58 or base64.
        #[arg(short, default_value = "base64")]
        s: String,
    },
    /// Generate a password with exact numbers of upper-case letters, digits and special
    /// characters; the rest is lower-case letters.
    Form {
        /// The desired password length.
        #[arg(short, default_value_t = 8)]
        l: usize,
        /// The number of upper-case letters.
        #[arg(short = 'C', default_value_t = 0)]
        capitals: usize,
        /// The number of digits.
        #[arg(short = 'D', default_value_t = 0)]
        digits: usize,
        /// The number of special characters.
        #[arg(short = 'S', default_value_t = 0)]
        special: usize,
    },
}

fn run(args: Args) -> Result<(), ProgError> {
    let generator = Generator::new();
    let started = Instant::now();

    let plan = match args.command {
        Command::Scheme { l, s } => {
            let scheme = s.parse::<Scheme>()?;
            allocate(l, &[], scheme.alphabet())?
        }
        Command::Form {
            l,
            capitals,
            digits,
            special,
        } => {
            let form = Form {
                length: l,
                uppercase: capitals,
                digits,
                special,
            };
            form.plan()?
        }
    };
    let password = generator.generate_planned(&plan)?;

    if args.time {
        eprintln!("{:?}", started.elapsed());
    }
    if args.entropy {
        eprintln!("~{:.1} bits of entropy", plan.entropy_bits());
    }
    writeln!(io::stdout(), "{}", password.as_str())
        .context("failed to write the password to stdout")?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        log::debug!("{err:?}");
        eprintln!("{err}");
        process::exit(2);
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Passgen(#[from] passgen::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
