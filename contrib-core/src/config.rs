use std::fmt;

use crate::auth::AuthOptions;
use crate::constants::DEFAULT_HOST;
use crate::error::ConfigError;
use crate::tls::TlsOptions;

/// Удалённая точка для ZFP поверх выделенной линии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZfpRemote {
    /// порт 8194
    Remote8194,
    /// порт 8196
    Remote8196,
}

impl ZfpRemote {
    /// Номер порта
    pub fn port(self) -> u16 {
        match self {
            ZfpRemote::Remote8194 => 8194,
            ZfpRemote::Remote8196 => 8196,
        }
    }
}

impl TryFrom<u16> for ZfpRemote {
    type Error = ConfigError;

    fn try_from(port: u16) -> Result<Self, Self::Error> {
        match port {
            8194 => Ok(ZfpRemote::Remote8194),
            8196 => Ok(ZfpRemote::Remote8196),
            other => Err(ConfigError::InvalidLeasedLinePort(other)),
        }
    }
}

/// Адрес сервера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    /// хост или IP
    pub host: String,
    /// TCP порт
    pub port: u16,
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Маршрут до площадки: обычные адреса или выделенная линия
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerRoute {
    /// Упорядоченный список адресов, пробуются по очереди
    Direct(Vec<ServerAddress>),
    /// ZFP поверх выделенной линии
    LeasedLine(ZfpRemote),
}

/// Неизменяемая конфигурация сессии
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    route: ServerRoute,
    auth: AuthOptions,
    tls: Option<TlsOptions>,
    auto_restart_on_disconnection: bool,
    num_start_attempts: usize,
}

impl SessionConfig {
    /// Обычная сессия: все хосты на одном порту.
    /// Пустой список хостов означает `localhost`.
    pub fn standard(hosts: &[String], port: u16, auth: AuthOptions, tls: Option<TlsOptions>) -> Self {
        let mut addresses: Vec<ServerAddress> = hosts
            .iter()
            .map(|h| ServerAddress {
                host: h.clone(),
                port,
            })
            .collect();

        if addresses.is_empty() {
            addresses.push(ServerAddress {
                host: DEFAULT_HOST.to_string(),
                port,
            });
        }

        Self {
            num_start_attempts: addresses.len(),
            route: ServerRoute::Direct(addresses),
            auth,
            tls,
            auto_restart_on_disconnection: true,
        }
    }

    /// Сессия поверх выделенной линии. Без TLS не бывает.
    pub fn leased_line(port: u16, auth: AuthOptions, tls: Option<TlsOptions>) -> Result<Self, ConfigError> {
        let Some(tls) = tls else {
            return Err(ConfigError::LeasedLineRequiresTls);
        };
        let remote = ZfpRemote::try_from(port)?;

        Ok(Self {
            route: ServerRoute::LeasedLine(remote),
            auth,
            tls: Some(tls),
            auto_restart_on_disconnection: true,
            num_start_attempts: 1,
        })
    }

    /// Выбирает маршрут: если задан порт выделенной линии, то ZFP, иначе обычные адреса
    pub fn build(
        hosts: &[String],
        port: u16,
        leased_line_port: Option<u16>,
        auth: AuthOptions,
        tls: Option<TlsOptions>,
    ) -> Result<Self, ConfigError> {
        match leased_line_port {
            Some(zfp_port) => Self::leased_line(zfp_port, auth, tls),
            None => Ok(Self::standard(hosts, port, auth, tls)),
        }
    }

    /// Маршрут
    pub fn route(&self) -> &ServerRoute {
        &self.route
    }

    /// Режим аутентификации
    pub fn auth(&self) -> &AuthOptions {
        &self.auth
    }

    /// TLS-параметры, если заданы
    pub fn tls(&self) -> Option<&TlsOptions> {
        self.tls.as_ref()
    }

    /// Переподключаться ли после обрыва (всегда `true`)
    pub fn auto_restart_on_disconnection(&self) -> bool {
        self.auto_restart_on_disconnection
    }

    /// Сколько раз пытаться стартовать
    pub fn num_start_attempts(&self) -> usize {
        self.num_start_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tls() -> Option<TlsOptions> {
        Some(TlsOptions::from_files("c.p12", "", "t.p7"))
    }

    #[test]
    fn standard_defaults_to_localhost() {
        let cfg = SessionConfig::standard(&[], 8194, AuthOptions::None, None);
        assert_eq!(
            cfg.route(),
            &ServerRoute::Direct(vec![ServerAddress {
                host: "localhost".into(),
                port: 8194
            }])
        );
        assert_eq!(cfg.num_start_attempts(), 1);
        assert!(cfg.auto_restart_on_disconnection());
    }

    #[test]
    fn standard_keeps_host_order_and_shared_port() {
        let hosts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let cfg = SessionConfig::standard(&hosts, 9000, AuthOptions::OsLogon, None);

        let ServerRoute::Direct(addrs) = cfg.route() else {
            panic!("expected direct route");
        };
        let rendered: Vec<String> = addrs.iter().map(|a| a.to_string()).collect();
        assert_eq!(rendered, vec!["a:9000", "b:9000", "c:9000"]);
        assert_eq!(cfg.num_start_attempts(), 3);
    }

    #[test]
    fn leased_line_accepts_known_ports() {
        let cfg = SessionConfig::leased_line(8196, AuthOptions::None, tls()).unwrap();
        assert_eq!(cfg.route(), &ServerRoute::LeasedLine(ZfpRemote::Remote8196));
        assert!(cfg.tls().is_some());
        assert!(cfg.auto_restart_on_disconnection());
    }

    #[test]
    fn leased_line_rejects_unknown_port() {
        let err = SessionConfig::leased_line(8195, AuthOptions::None, tls()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLeasedLinePort(8195)));
    }

    #[test]
    fn leased_line_without_tls_fails_first() {
        // TLS проверяется раньше порта
        let err = SessionConfig::leased_line(8195, AuthOptions::None, None).unwrap_err();
        assert!(matches!(err, ConfigError::LeasedLineRequiresTls));
    }

    #[test]
    fn build_picks_route_by_leased_line_port() {
        let hosts = vec!["ignored".to_string()];
        let direct = SessionConfig::build(&hosts, 8194, None, AuthOptions::None, None).unwrap();
        assert!(matches!(direct.route(), ServerRoute::Direct(_)));

        let zfp = SessionConfig::build(&[], 8194, Some(8194), AuthOptions::None, tls()).unwrap();
        assert_eq!(zfp.route(), &ServerRoute::LeasedLine(ZfpRemote::Remote8194));
        assert_eq!(ZfpRemote::Remote8194.port(), 8194);
    }
}
