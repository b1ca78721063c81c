use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

/// Stock Server - отвечает на запросы котировок по TCP.
///
/// Формат вызова: CSV файлы с котировками, затем TCP порт,
/// например: stock-server MSFT.csv TSLA.csv 30000
#[derive(Parser, Debug, Clone)]
#[command(name = "stock-server", version, about)]
pub(crate) struct Args {
    /// CSV файлы с котировками и TCP порт последним аргументом
    #[arg(value_name = "CSV.. PORT", required = true, num_args = 2..)]
    pub(crate) args: Vec<String>,
}

impl Args {
    /// Разбирает сырые аргументы: всё до последнего — файлы `*.csv`,
    /// последний — порт.
    pub(crate) fn split(&self) -> Result<(Vec<PathBuf>, u16)> {
        // num_args(2..) уже гарантирует минимум, но оставим защиту
        let Some((port_raw, files_raw)) = self.args.split_last() else {
            bail!("at least one .csv data file and a TCP port are required");
        };
        if files_raw.is_empty() {
            bail!("at least one .csv data file and a TCP port are required");
        }

        let port: u16 = port_raw
            .parse()
            .with_context(|| format!("invalid TCP port: {port_raw:?}"))?;

        let mut files = Vec::with_capacity(files_raw.len());
        for raw in files_raw {
            if !raw.ends_with(".csv") {
                bail!("data file must have a .csv extension: {raw:?}");
            }
            files.push(PathBuf::from(raw));
        }

        Ok((files, port))
    }
}
