use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Режим аутентификации сессии.
///
/// Разбирается один раз при старте из строки `--auth` и дальше
/// превращается в строку опций, которую понимает транспорт.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthOptions {
    /// `user`: логин ОС
    #[default]
    OsLogon,
    /// `app=<name>`
    ApplicationOnly(String),
    /// `userapp=<name>`
    UserAndApplication(String),
    /// `dir=<property>`
    DirectoryService(String),
    /// `none`: без авторизации
    None,
}

impl AuthOptions {
    /// Нужна ли авторизация identity перед публикацией
    pub fn requires_authorization(&self) -> bool {
        !matches!(self, AuthOptions::None)
    }

    /// Строка опций для транспорта, `None` если аутентификация выключена
    pub fn to_wire(&self) -> Option<String> {
        match self {
            AuthOptions::OsLogon => Some("AuthenticationType=OS_LOGON".to_string()),
            AuthOptions::ApplicationOnly(app) => Some(format!(
                "AuthenticationMode=APPLICATION_ONLY;\
                 ApplicationAuthenticationType=APPNAME_AND_KEY;\
                 ApplicationName={app}"
            )),
            AuthOptions::UserAndApplication(app) => Some(format!(
                "AuthenticationMode=USER_AND_APPLICATION;\
                 AuthenticationType=OS_LOGON;\
                 ApplicationAuthenticationType=APPNAME_AND_KEY;\
                 ApplicationName={app}"
            )),
            AuthOptions::DirectoryService(property) => Some(format!(
                "AuthenticationType=DIRECTORY_SERVICE;DirSvcPropertyName={property}"
            )),
            AuthOptions::None => None,
        }
    }
}

impl FromStr for AuthOptions {
    type Err = ConfigError;

    /// Парсит `user|none|app=<app>|userapp=<app>|dir=<property>`
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "user" => return Ok(AuthOptions::OsLogon),
            "none" => return Ok(AuthOptions::None),
            _ => {}
        }

        let invalid = || ConfigError::InvalidAuthOption(raw.to_string());

        // пустое значение допустимо, транспорт получит `ApplicationName=`
        let (kind, value) = raw.split_once('=').ok_or_else(invalid)?;

        match kind {
            "app" => Ok(AuthOptions::ApplicationOnly(value.to_string())),
            "userapp" => Ok(AuthOptions::UserAndApplication(value.to_string())),
            "dir" => Ok(AuthOptions::DirectoryService(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOptions::OsLogon => write!(f, "user"),
            AuthOptions::ApplicationOnly(app) => write!(f, "app={app}"),
            AuthOptions::UserAndApplication(app) => write!(f, "userapp={app}"),
            AuthOptions::DirectoryService(property) => write!(f, "dir={property}"),
            AuthOptions::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_form() {
        assert_eq!("user".parse::<AuthOptions>().unwrap(), AuthOptions::OsLogon);
        assert_eq!("none".parse::<AuthOptions>().unwrap(), AuthOptions::None);
        assert_eq!(
            "app=blp:Contrib".parse::<AuthOptions>().unwrap(),
            AuthOptions::ApplicationOnly("blp:Contrib".into())
        );
        assert_eq!(
            "userapp=blp:Contrib".parse::<AuthOptions>().unwrap(),
            AuthOptions::UserAndApplication("blp:Contrib".into())
        );
        assert_eq!(
            "dir=mail".parse::<AuthOptions>().unwrap(),
            AuthOptions::DirectoryService("mail".into())
        );
    }

    #[test]
    fn value_may_contain_equals_sign() {
        // split только по первому '='
        assert_eq!(
            "dir=a=b".parse::<AuthOptions>().unwrap(),
            AuthOptions::DirectoryService("a=b".into())
        );
    }

    #[test]
    fn empty_value_after_equals_is_accepted() {
        assert_eq!(
            "app=".parse::<AuthOptions>().unwrap(),
            AuthOptions::ApplicationOnly(String::new())
        );
        assert_eq!(
            "dir=".parse::<AuthOptions>().unwrap().to_wire().as_deref(),
            Some("AuthenticationType=DIRECTORY_SERVICE;DirSvcPropertyName=")
        );
    }

    #[test]
    fn rejects_garbage_and_missing_values() {
        for raw in ["", "USER", "app", "dir", "=x", "manual=x", "token=abc"] {
            let err = raw.parse::<AuthOptions>().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidAuthOption(ref s) if s == raw),
                "unexpected result for {raw:?}: {err:?}"
            );
        }
    }

    #[test]
    fn wire_strings_match_transport_format() {
        assert_eq!(
            AuthOptions::OsLogon.to_wire().as_deref(),
            Some("AuthenticationType=OS_LOGON")
        );
        assert_eq!(
            AuthOptions::ApplicationOnly("X".into()).to_wire().as_deref(),
            Some(
                "AuthenticationMode=APPLICATION_ONLY;\
                 ApplicationAuthenticationType=APPNAME_AND_KEY;ApplicationName=X"
            )
        );
        assert_eq!(
            AuthOptions::UserAndApplication("X".into()).to_wire().as_deref(),
            Some(
                "AuthenticationMode=USER_AND_APPLICATION;AuthenticationType=OS_LOGON;\
                 ApplicationAuthenticationType=APPNAME_AND_KEY;ApplicationName=X"
            )
        );
        assert_eq!(
            AuthOptions::DirectoryService("mail".into()).to_wire().as_deref(),
            Some("AuthenticationType=DIRECTORY_SERVICE;DirSvcPropertyName=mail")
        );
        assert_eq!(AuthOptions::None.to_wire(), None);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for raw in ["user", "none", "app=a", "userapp=b", "dir=c"] {
            let parsed: AuthOptions = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn only_none_skips_authorization() {
        assert!(!AuthOptions::None.requires_authorization());
        assert!(AuthOptions::OsLogon.requires_authorization());
        assert!(AuthOptions::DirectoryService("p".into()).requires_authorization());
    }
}
