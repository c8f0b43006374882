use clap::{Parser, Subcommand};
use rust_qrgen::encoder::qr_encoder::QrEncoder;
use rust_qrgen::encoder::tables;
use rust_qrgen::payload::{VCard, WifiConfig, WifiSecurity};
use rust_qrgen::{ECLevel, EncodeError, EncodeOptions, MaskPattern, Result, Symbol, Version};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "RustQRGen CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "M")]
    ec: ECLevel,
    #[arg(long, default_value_t = 1)]
    min_version: u8,
    #[arg(long, default_value_t = 40)]
    max_version: u8,
    /// Force a mask pattern (0-7) instead of scoring all eight
    #[arg(long)]
    mask: Option<u8>,
    /// Raise the EC level while the chosen version still fits
    #[arg(long)]
    boost_ec: bool,
    /// Allow Kanji mode for Shift-JIS byte pairs
    #[arg(long)]
    kanji: bool,
    /// Prefix an ECI designator (e.g. 26 for UTF-8)
    #[arg(long)]
    eci: Option<u32>,
}

impl EncodeArgs {
    fn options(&self) -> Result<EncodeOptions> {
        let mut options = EncodeOptions::new()
            .min_version(self.min_version)
            .max_version(self.max_version)
            .boost_ec(self.boost_ec)
            .kanji(self.kanji);
        if let Some(mask) = self.mask {
            options = options.mask(MaskPattern::from_bits(mask)?);
        }
        if let Some(eci) = self.eci {
            options = options.eci(eci);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and print the symbol
    Encode {
        text: String,
        #[command(flatten)]
        args: EncodeArgs,
    },
    /// Print the penalty of every mask candidate
    Masks {
        text: String,
        #[command(flatten)]
        args: EncodeArgs,
    },
    /// Print the data capacity of a version at each EC level
    Capacity {
        #[arg(long)]
        version: u8,
    },
    /// Encode WiFi credentials
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// WPA, WEP or nopass
        #[arg(long, default_value = "WPA")]
        security: WifiSecurity,
        #[arg(long)]
        hidden: bool,
        #[command(flatten)]
        args: EncodeArgs,
    },
    /// Encode a vCard contact
    Vcard {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        organization: String,
        #[arg(long, default_value = "")]
        address: String,
        #[command(flatten)]
        args: EncodeArgs,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode { text, args } => encode_cmd(&text, &args),
        Command::Masks { text, args } => masks_cmd(&text, &args),
        Command::Capacity { version } => capacity_cmd(version),
        Command::Wifi {
            ssid,
            password,
            security,
            hidden,
            args,
        } => {
            let wifi = WifiConfig {
                ssid,
                password,
                security,
                hidden,
            };
            wifi.to_payload()
                .ok_or_else(|| EncodeError::InvalidPayloadField("--ssid must not be blank".into()))
                .and_then(|payload| encode_cmd(&payload, &args))
        }
        Command::Vcard {
            name,
            phone,
            email,
            organization,
            address,
            args,
        } => {
            let card = VCard {
                name,
                phone,
                email,
                organization,
                address,
            };
            card.to_payload()
                .ok_or_else(|| {
                    EncodeError::InvalidPayloadField(
                        "one of --name, --phone or --email is required".into(),
                    )
                })
                .and_then(|payload| encode_cmd(&payload, &args))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(text: &str, args: &EncodeArgs) -> Result<()> {
    let symbol = rust_qrgen::encode_with_options(text.as_bytes(), args.ec, &args.options()?)?;
    print_symbol(&symbol);
    Ok(())
}

fn print_symbol(symbol: &Symbol) {
    println!(
        "version={} ec={:?} mask={} penalty={} side={}",
        symbol.version(),
        symbol.ec_level(),
        symbol.mask().id(),
        symbol.penalty(),
        symbol.side()
    );
    for seg in symbol.segments() {
        println!("  segment: {} x{}", seg.mode, seg.char_count);
    }
    print!("{symbol}");
}

fn masks_cmd(text: &str, args: &EncodeArgs) -> Result<()> {
    let candidates = QrEncoder::mask_candidates(text.as_bytes(), args.ec, &args.options()?)?;
    let best = candidates
        .iter()
        .min_by_key(|c| (c.penalty, c.mask.id()))
        .map(|c| c.mask);
    for candidate in &candidates {
        let marker = if Some(candidate.mask) == best { " *" } else { "" };
        println!(
            "mask {}: penalty {}{}",
            candidate.mask.id(),
            candidate.penalty,
            marker
        );
    }
    Ok(())
}

fn capacity_cmd(version: u8) -> Result<()> {
    let version = Version::new(version)?;
    println!(
        "version {} ({}x{} modules, {} codewords)",
        version,
        version.size(),
        version.size(),
        tables::total_codewords(version)
    );
    for level in ECLevel::ALL {
        let info = tables::ec_block_info(version, level);
        println!(
            "  {:?}: {} data codewords ({} bits), {} blocks x {} EC codewords",
            level,
            tables::data_codewords(version, level),
            tables::data_capacity_bits(version, level),
            info.num_blocks,
            info.ecc_per_block
        );
    }
    Ok(())
}
