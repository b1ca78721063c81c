//! Точка входа `stock-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI: CSV файлы с котировками и TCP порт
//! - загрузка каталога в память один раз, дальше только чтение
//! - синхронный accept-цикл: одно соединение, один запрос, один ответ
//! - остановка по команде `quit` (статус 0) или по Ctrl+C

mod cli;
mod config;
mod tcp;

use std::net::SocketAddr;
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use clap::Parser;
use log::info;
use stock_core::StockCatalog;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/trace
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = cli::Args::parse();
    let (files, port) = args.split()?;

    let catalog = StockCatalog::load(&files)?;
    info!("stock-server: loaded {} tickers", catalog.symbols().len());

    let addr = SocketAddr::from((config::BIND_IP, port));
    tcp::run_tcp_listener(addr, &catalog, shutdown)?;

    Ok(())
}
