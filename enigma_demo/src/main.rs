use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use enigma_core::{EnigmaMachine, MachineConfig};
use env_logger::Env;
use log::{LevelFilter, debug};
use rand::rngs::OsRng;
use std::fs;
use std::io;
use std::path::PathBuf;

mod prompt;

#[derive(Parser)]
#[command(
    name = "enigma",
    author,
    version,
    about = "Three-rotor Enigma simulator. Run without a subcommand for the interactive prompt."
)]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// JSON machine config written by `keygen`.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["rotors", "positions", "rings", "plugboard"]
    )]
    config: Option<PathBuf>,
    /// Wheel order, left to right, e.g. "I II III" or "0 1 2".
    #[arg(long, value_name = "ORDER")]
    rotors: Option<String>,
    /// Start positions, e.g. "0 0 0".
    #[arg(long, value_name = "LIST")]
    positions: Option<String>,
    /// Ring settings, e.g. "0 0 0".
    #[arg(long, value_name = "LIST")]
    rings: Option<String>,
    /// Plug pairs, e.g. "AB CD".
    #[arg(long, value_name = "PAIRS")]
    plugboard: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt (or, identically, decrypt) a message.
    Encrypt {
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, value_name = "TEXT")]
        message: Option<String>,
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Draw a random key sheet and write it as a JSON config.
    Keygen {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Encrypt a message and decrypt it again with a freshly built machine.
    Demo {
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, default_value = "HELLO")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match cli.command {
        Some(Commands::Encrypt {
            settings,
            message,
            input,
            out,
        }) => cmd_encrypt(&settings, message, input, out),
        Some(Commands::Keygen { out }) => cmd_keygen(out),
        Some(Commands::Demo { settings, message }) => cmd_demo(&settings, &message),
        None => cmd_interactive(),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn cmd_interactive() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let run = prompt::run_interactive(&mut input, &mut stdout)?;
    let mut machine = build_machine(&run.config)?;
    println!("Output: {}", machine.process(&run.message));
    Ok(())
}

fn cmd_encrypt(
    settings: &SettingsArgs,
    message: Option<String>,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(settings)?;
    let text = resolve_text(message, input)?;
    let mut machine = build_machine(&config)?;
    let result = machine.process(&text);
    debug!(
        "encrypt cmd chars={} final_window={}",
        result.chars().count(),
        machine.window()
    );
    match out {
        Some(path) => {
            fs::write(&path, &result)
                .with_context(|| format!("writing output to {}", path.display()))?;
            println!(
                "Wrote {} characters to {}",
                result.chars().count(),
                path.display()
            );
        }
        None => println!("Output: {result}"),
    }
    Ok(())
}

fn cmd_keygen(out: PathBuf) -> Result<()> {
    let config = MachineConfig::random_with_rng(&mut OsRng);
    config
        .save(&out)
        .with_context(|| format!("writing key sheet to {}", out.display()))?;
    println!("Wrote key sheet to {}", out.display());
    debug!(
        "key sheet rotors={:?} positions={:?} rings={:?} plug_pairs={}",
        config.rotors,
        config.positions,
        config.ring_settings,
        config.plugboard.len()
    );
    Ok(())
}

fn cmd_demo(settings: &SettingsArgs, message: &str) -> Result<()> {
    let config = resolve_config(settings)?;
    let cipher = build_machine(&config)?.process(message);
    let plain = build_machine(&config)?.process(&cipher);
    println!("Plaintext:  {message}");
    println!("Ciphertext: {cipher}");
    println!("Decrypted:  {plain}");
    Ok(())
}

fn build_machine(config: &MachineConfig) -> Result<EnigmaMachine> {
    config.build().context("invalid machine settings")
}

fn resolve_config(settings: &SettingsArgs) -> Result<MachineConfig> {
    if let Some(path) = &settings.config {
        return MachineConfig::load(path)
            .with_context(|| format!("loading machine config from {}", path.display()));
    }
    let mut config = MachineConfig::default();
    if let Some(line) = &settings.rotors {
        config.rotors = prompt::parse_rotor_order(line)?;
    }
    let slots = config.rotors.len();
    if let Some(line) = &settings.positions {
        config.positions = prompt::parse_settings(line, "position", slots)?;
    } else {
        config.positions = vec![0; slots];
    }
    if let Some(line) = &settings.rings {
        config.ring_settings = prompt::parse_settings(line, "ring setting", slots)?;
    } else {
        config.ring_settings = vec![0; slots];
    }
    if let Some(line) = &settings.plugboard {
        config.plugboard = prompt::parse_plug_pairs(line);
    }
    config.validate().context("invalid machine settings")?;
    Ok(config)
}

fn resolve_text(message: Option<String>, input: Option<PathBuf>) -> Result<String> {
    match (message, input) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("reading message from {}", path.display())),
        (Some(_), Some(_)) => bail!("Provide either --message or --input, not both."),
        (None, None) => bail!("Provide --message TEXT or --input FILE."),
    }
}
