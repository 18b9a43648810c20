use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use kobo_core::{BankName, MemoryFingerprintStore, ParseError};
use kobo_ingest::{PdfBank, StatementUpload, convert_pdf_statement, import_statement};

#[derive(Parser, Debug)]
#[command(name = "kobo", version, about = "Bank statement import and conversion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a PDF bank statement to a four-column CSV
    Convert {
        /// Path to the PDF statement
        file: PathBuf,

        /// Issuing bank: zenith, gtbank, or kuda
        #[arg(long)]
        bank: String,

        /// Password for protected PDFs
        #[arg(long)]
        password: Option<String>,

        /// Output path (default: <input>_transactions.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Parse a statement (PDF or CSV) and print canonical drafts as JSON
    Import {
        /// Path to the statement file
        file: PathBuf,

        /// Issuing bank; required for PDFs, optional for CSVs
        #[arg(long)]
        bank: Option<String>,

        /// Password for protected PDFs
        #[arg(long)]
        password: Option<String>,

        /// Fingerprint ledger file; re-imports of a listed file are rejected
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            file,
            bank,
            password,
            output,
        } => run_convert(&file, &bank, password.as_deref(), output),
        Command::Import {
            file,
            bank,
            password,
            ledger,
        } => run_import(&file, bank.as_deref(), password, ledger.as_deref()),
    }
}

fn run_convert(
    file: &Path,
    bank: &str,
    password: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(bank) = PdfBank::from_label(bank) else {
        bail!("unsupported bank {bank:?}; supported banks: zenith, gtbank, kuda");
    };
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", file.display());
    }

    let csv = match convert_pdf_statement(&bytes, bank, password) {
        Ok(csv) => csv,
        Err(ParseError::Decryption) => {
            bail!("this PDF is password-protected; pass the correct --password")
        }
        Err(e) => return Err(e.into()),
    };

    let output = output.unwrap_or_else(|| default_output_path(file));
    fs::write(&output, csv).with_context(|| format!("writing {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    input.with_file_name(format!("{stem}_transactions.csv"))
}

fn run_import(
    file: &Path,
    bank: Option<&str>,
    password: Option<String>,
    ledger: Option<&Path>,
) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let is_pdf = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let upload = if is_pdf {
        let label = bank.context("--bank is required for PDF statements")?;
        let Some(pdf_bank) = PdfBank::from_label(label) else {
            bail!("no PDF parser for bank {label:?}; supported: zenith, gtbank, kuda");
        };
        StatementUpload::pdf(bytes, pdf_bank, password)
    } else {
        StatementUpload::csv(bytes, bank.and_then(BankName::from_label))
    };

    let store = load_ledger(ledger)?;
    let output = match import_statement(&upload, &store) {
        Ok(output) => output,
        Err(ParseError::Decryption) => {
            bail!("this PDF is password-protected; pass the correct --password")
        }
        Err(ParseError::DuplicateFile(fp)) => {
            bail!("this file was already imported (fingerprint {fp})")
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&output.drafts)?);
    eprintln!(
        "imported {} transactions (fingerprint {})",
        output.drafts.len(),
        output.fingerprint
    );

    if let Some(path) = ledger {
        append_to_ledger(path, &output.fingerprint)?;
    }
    Ok(())
}

fn load_ledger(path: Option<&Path>) -> Result<MemoryFingerprintStore> {
    let mut store = MemoryFingerprintStore::new();
    let Some(path) = path else {
        return Ok(store);
    };
    if path.exists() {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() {
                store.record(line);
            }
        }
    }
    Ok(store)
}

fn append_to_ledger(path: &Path, fingerprint: &str) -> Result<()> {
    let mut content = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        String::new()
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(fingerprint);
    content.push('\n');
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
