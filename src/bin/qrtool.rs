use clap::{Parser, Subcommand};
use rust_qr_encode::encoder::mask::{PenaltyScore, masked_candidate};
use rust_qr_encode::encoder::verify::read_back;
use rust_qr_encode::render::{
    RenderOptions, overlay_logo, render_luma, render_rgba, to_terminal_string,
};
use rust_qr_encode::{ECLevel, MaskPattern, QrCode, encode, encode_or_placeholder};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "RustQR encoder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write a PNG
    Encode {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "M")]
        level: ECLevel,
        #[arg(long)]
        out: PathBuf,
        /// Pixels per module (defaults to QR_MODULE_PIXELS or 8)
        #[arg(long)]
        module_pixels: Option<u32>,
        /// Quiet zone in modules (defaults to QR_QUIET_ZONE or 4)
        #[arg(long)]
        quiet_zone: Option<u32>,
        /// Image to centre over the symbol
        #[arg(long)]
        logo: Option<PathBuf>,
        /// Write the placeholder cross instead of failing on over-long input
        #[arg(long)]
        placeholder: bool,
    },
    /// Print the symbol to the terminal
    Print {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "M")]
        level: ECLevel,
    },
    /// Show version, mask and per-mask penalties
    Info {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "M")]
        level: ECLevel,
        /// Decode the produced matrix and compare with the input
        #[arg(long)]
        verify: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Encode {
            text,
            level,
            out,
            module_pixels,
            quiet_zone,
            logo,
            placeholder,
        } => encode_cmd(
            &text,
            level,
            &out,
            module_pixels,
            quiet_zone,
            logo.as_deref(),
            placeholder,
        ),
        Command::Print { text, level } => print_cmd(&text, level),
        Command::Info {
            text,
            level,
            verify,
        } => info_cmd(&text, level, verify),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    text: &str,
    level: ECLevel,
    out: &Path,
    module_pixels: Option<u32>,
    quiet_zone: Option<u32>,
    logo: Option<&Path>,
    placeholder: bool,
) -> Result<(), Box<dyn Error>> {
    let qr = if placeholder {
        encode_or_placeholder(text, level)
    } else {
        encode(text, level)?
    };

    let mut options = RenderOptions::default();
    if let Some(px) = module_pixels {
        options.module_pixels = px.max(1);
    }
    if let Some(qz) = quiet_zone {
        options.quiet_zone = qz;
    }

    match logo {
        Some(path) => {
            let logo = image::open(path)?;
            let mut canvas = render_rgba(&qr.modules, &options);
            overlay_logo(&mut canvas, &logo, 0.2, &options);
            canvas.save(out)?;
        }
        None => render_luma(&qr.modules, &options).save(out)?,
    }

    println!(
        "Wrote {} ({}x{} modules, version={}, mask={})",
        out.display(),
        qr.size(),
        qr.size(),
        describe_version(&qr),
        describe_mask(&qr)
    );
    Ok(())
}

fn print_cmd(text: &str, level: ECLevel) -> Result<(), Box<dyn Error>> {
    let qr = encode(text, level)?;
    print!("{}", to_terminal_string(&qr.modules, 4));
    Ok(())
}

fn info_cmd(text: &str, level: ECLevel, verify: bool) -> Result<(), Box<dyn Error>> {
    let qr = encode(text, level)?;
    println!("Input: {} bytes", text.len());
    println!(
        "Size: {}x{}, version={}, level={}, mask={}",
        qr.size(),
        qr.size(),
        describe_version(&qr),
        level,
        describe_mask(&qr)
    );

    if let (Some(version), Some(mask)) = (qr.version, qr.mask_pattern) {
        // Undo the committed mask to recover the pre-mask matrix
        let func = rust_qr_encode::encoder::function_mask::FunctionPatterns::new(version);
        let (unmasked, _) = masked_candidate(&qr.modules, &func, level, mask);
        for candidate in MaskPattern::ALL {
            let (masked, _) = masked_candidate(&unmasked, &func, level, candidate);
            let score = PenaltyScore::evaluate(&masked);
            println!(
                "  mask {}: total={} run={} block={} finder={} balance={}{}",
                candidate.index(),
                score.total(),
                score.run,
                score.block,
                score.finder,
                score.balance,
                if candidate == mask { "  <- selected" } else { "" }
            );
        }
    }

    if verify && qr.version.is_some() {
        let decoded = read_back(&qr.modules).ok_or("read-back failed")?;
        if decoded.payload != text.as_bytes() {
            return Err("read-back payload differs from input".into());
        }
        println!("Verified: payload decodes back to input");
    }
    Ok(())
}

fn describe_version(qr: &QrCode) -> String {
    qr.version
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn describe_mask(qr: &QrCode) -> String {
    qr.mask_pattern
        .map(|m| m.index().to_string())
        .unwrap_or_else(|| "-".to_string())
}
