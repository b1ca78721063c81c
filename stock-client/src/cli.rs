use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{Context, Result, bail};
use clap::Parser;

/// Stock Client - интерактивные запросы котировок к stock-server.
///
/// На каждую команду открывается новое соединение: отправили запрос,
/// прочитали ответ, закрылись. Команда `quit` останавливает сервер,
/// после неё клиент выходит сам.
#[derive(Parser, Debug, Clone)]
#[command(name = "stock-client", version, about)]
pub(crate) struct Args {
    /// Адрес сервера: имя хоста или IP, например localhost
    #[arg(value_name = "HOST")]
    pub(crate) host: String,

    /// TCP порт сервера, например 30000
    #[arg(value_name = "PORT")]
    pub(crate) port: u16,
}

impl Args {
    /// Валидация аргументов поверх clap
    pub(crate) fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("server host is empty");
        }
        Ok(())
    }

    pub(crate) fn server_socket_addr(&self) -> Result<SocketAddr> {
        // Берём первый результат резолвинга
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("resolve {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("no addresses resolved for {}:{}", self.host, self.port))
    }
}
