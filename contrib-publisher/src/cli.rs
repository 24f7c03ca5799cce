use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use contrib_core::topic::service_of;
use contrib_core::{
    AuthOptions, ConfigError, DEFAULT_PORT, DEFAULT_SERVICE, DEFAULT_TOPIC, SessionConfig,
    TlsOptions,
};
use log::info;

use crate::publisher::PublishPlan;

/// Contrib Publisher - публикует синтетические котировки (BID/ASK) на площадку.
///
/// Подключается, при необходимости авторизуется, создаёт топики и раз в
/// 10 секунд публикует по сообщению на каждый созданный топик.
#[derive(Parser, Debug, Clone)]
#[command(name = "contrib-publisher", version, about)]
pub(crate) struct Args {
    /// Имя или IP сервера (можно несколько раз; по умолчанию localhost)
    #[arg(short = 'a', long = "ip", value_name = "ipAddress", conflicts_with = "zfp_port")]
    pub(crate) hosts: Vec<String>,

    /// Порт сервера
    #[arg(short = 'p', value_name = "tcpPort", default_value_t = DEFAULT_PORT)]
    pub(crate) port: u16,

    /// Сервис публикации
    #[arg(short = 's', value_name = "service", default_value = DEFAULT_SERVICE)]
    pub(crate) service: String,

    /// Топик (можно несколько раз)
    #[arg(short = 't', value_name = "topic", default_value = DEFAULT_TOPIC)]
    pub(crate) topics: Vec<String>,

    /// Аутентификация: user|none|app=<app>|userapp=<app>|dir=<property>
    #[arg(long, value_name = "option", default_value = "user")]
    pub(crate) auth: AuthOptions,

    /// PKCS#12 файл с клиентскими credentials
    #[arg(long, value_name = "file")]
    pub(crate) tls_client_credentials: Option<PathBuf>,

    /// Пароль к клиентским credentials
    #[arg(long, value_name = "password", default_value = "")]
    pub(crate) tls_client_credentials_password: String,

    /// PKCS#7 файл с доверенными сертификатами
    #[arg(long, value_name = "file")]
    pub(crate) tls_trust_material: Option<PathBuf>,

    /// Прочитать TLS-файлы заранее и передать транспорту их содержимое
    #[arg(long)]
    pub(crate) read_certificate_files: bool,

    /// ZFP поверх выделенной линии на порту 8194 или 8196 (нельзя вместе с --ip)
    #[arg(long = "zfp-over-leased-line", value_name = "port")]
    pub(crate) zfp_port: Option<u16>,
}

impl Args {
    /// Валидация аргументов, которую не выразить через clap
    pub(crate) fn validate(&self) -> Result<()> {
        if service_of(&self.service) != Some(self.service.as_str()) {
            bail!("-s must look like //<namespace>/<service> (got: {})", self.service);
        }

        for topic in &self.topics {
            if topic.trim().is_empty() {
                bail!("-t must not be empty");
            }
        }

        if self.hosts.iter().any(|h| h.trim().is_empty()) {
            bail!("--ip must not be empty");
        }

        Ok(())
    }

    /// Собирает конфигурацию сессии. Ошибки здесь фатальны: до подключения не доходим.
    pub(crate) fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let tls = TlsOptions::load(
            self.tls_client_credentials.as_deref(),
            &self.tls_client_credentials_password,
            self.tls_trust_material.as_deref(),
            self.read_certificate_files,
        )?;

        if tls.is_some() {
            info!("TlsOptions enabled");
        }

        SessionConfig::build(
            &self.hosts,
            self.port,
            self.zfp_port,
            self.auth.clone(),
            tls,
        )
    }

    pub(crate) fn publish_plan(&self) -> PublishPlan {
        PublishPlan {
            service: self.service.clone(),
            topics: self.topics.clone(),
        }
    }
}
