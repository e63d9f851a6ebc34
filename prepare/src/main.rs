use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unicode_normalizing::NormalizationData;

/// файл с таблицами, если путь не передан аргументом
const DEFAULT_OUTPUT: &str = "./../data/nfc.nrm";

fn main() -> ExitCode
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_owned());

    let data = NormalizationData::canonical();
    let bytes = data.to_bytes();

    // записанные данные должны загружаться обратно
    if let Err(e) = NormalizationData::from_bytes(&bytes) {
        error!(%e, "подготовленные таблицы не проходят проверку");
        return ExitCode::FAILURE;
    }

    if let Err(e) = write(&output, &bytes) {
        error!(%e, output = %output, "не удалось записать таблицы");
        return ExitCode::FAILURE;
    }

    info!(output = %output, len = bytes.len(), "таблицы записаны");

    println!("\n{}:\n{}", output, data.statistics());

    ExitCode::SUCCESS
}

fn write(path: &str, bytes: &[u8]) -> std::io::Result<()>
{
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }

    File::create(path)?.write_all(bytes)
}
