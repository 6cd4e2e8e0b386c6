use bigint_words::{BigIntError, JsBigInt, parse_bigint_literal};

#[derive(clap::Parser)]
#[command(name = "bigint", version, about = "Inspect BigInt word layout and 64-bit conversions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Truncate to a signed 64-bit integer
    Int64 {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Truncate to an unsigned 64-bit integer
    Uint64 {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the sign bit and magnitude words
    Words {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the number of 64-bit words, optionally after shifting left
    WordCount {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, default_value_t = 0)]
        shift: usize,
    },
    /// Shift left by the given number of bits
    Shl {
        #[arg(allow_hyphen_values = true)]
        value: String,
        bits: usize,
    },
    /// BigInt.asIntN(bits, value)
    AsIntN {
        bits: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// BigInt.asUintN(bits, value)
    AsUintN {
        bits: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // Initialize logger (controlled by RUST_LOG)
    env_logger::init();

    let cli = <Cli as clap::Parser>::parse();
    let Some(command) = cli.command else {
        run_persistent_repl()?;
        return Ok(());
    };

    match run_command(&command) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {}", err.user_message());
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_command(command: &Command) -> Result<String, BigIntError> {
    log::debug!("running {command:?}");
    let output = match command {
        Command::Int64 { value } => {
            let (result, lossless) = parse_bigint_literal(value)?.to_i64_wrapping();
            format!("{result} lossless={lossless}")
        }
        Command::Uint64 { value } => {
            let (result, lossless) = parse_bigint_literal(value)?.to_u64_wrapping();
            format!("{result} lossless={lossless}")
        }
        Command::Words { value } => {
            let value = parse_bigint_literal(value)?;
            let mut words = vec![0u64; value.word_count()];
            let (sign_bit, words) = value.to_words_array(&mut words);
            let words: Vec<String> = words.iter().map(|w| format!("{w:#018x}")).collect();
            format!("sign_bit={sign_bit} words=[{}]", words.join(", "))
        }
        Command::WordCount { value, shift } => {
            let value = parse_bigint_literal(value)?.checked_shift_left(*shift)?;
            value.word_count().to_string()
        }
        Command::Shl { value, bits } => parse_bigint_literal(value)?.checked_shift_left(*bits)?.to_string(),
        Command::AsIntN { bits, value } => parse_bigint_literal(value)?.as_int_n(*bits).to_string(),
        Command::AsUintN { bits, value } => parse_bigint_literal(value)?.as_uint_n(*bits)?.to_string(),
    };
    Ok(output)
}

// Persistent rustyline-powered REPL; each line is parsed with the same grammar as the command line.
#[allow(clippy::println_empty_string)]
fn run_persistent_repl() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use rustyline::Editor;
    use rustyline::error::ReadlineError;
    use std::path::PathBuf;

    let ver = clap::crate_version!();
    println!("BigInt REPL v{ver}. Type 'help' for commands, 'exit' or Ctrl-D to quit.");

    let mut rl = match Editor::<(), rustyline::history::FileHistory>::new() {
        Ok(e) => e,
        Err(err) => {
            eprintln!("Failed to initialize line editor: {err}");
            std::process::exit(1);
        }
    };

    let history_path: Option<PathBuf> = std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".bigint_repl_history"));
    if let Some(ref p) = history_path
        && let Err(err) = rl.load_history(p)
    {
        log::debug!("no history loaded from {}: {err}", p.display());
    }

    loop {
        match rl.readline("bigint> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "exit" || trimmed == ".exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let args = std::iter::once("bigint").chain(trimmed.split_whitespace());
                let command = match <Cli as clap::Parser>::try_parse_from(args) {
                    Ok(Cli { command: Some(command) }) => command,
                    Ok(Cli { command: None }) => continue,
                    Err(err) => {
                        // clap renders help and usage errors itself
                        let _ = err.print();
                        continue;
                    }
                };
                match run_command(&command) {
                    Ok(output) => println!("{output}"),
                    Err(err) => {
                        eprintln!("{}", err.user_message());
                        eprintln!("  at: {trimmed}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye");
                break;
            }
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    if let Some(ref p) = history_path {
        rl.save_history(p)?;
    }
    Ok(())
}
