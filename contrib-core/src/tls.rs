use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Откуда транспорт берёт TLS-материал
#[derive(Clone, PartialEq, Eq)]
pub enum TlsSource {
    /// Путь к файлу, транспорт читает его сам
    File(PathBuf),
    /// Содержимое файла, прочитанное заранее
    Blob(Vec<u8>),
}

impl fmt::Debug for TlsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsSource::File(p) => f.debug_tuple("File").field(p).finish(),
            TlsSource::Blob(b) => write!(f, "Blob({} bytes)", b.len()),
        }
    }
}

/// TLS-параметры сессии: PKCS#12 с клиентскими credentials + пароль,
/// PKCS#7 с доверенными сертификатами.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsOptions {
    client_credentials: TlsSource,
    client_credentials_password: String,
    trust_material: TlsSource,
}

impl TlsOptions {
    /// TLS-параметры из путей к файлам
    pub fn from_files(
        client_credentials: impl Into<PathBuf>,
        password: impl Into<String>,
        trust_material: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client_credentials: TlsSource::File(client_credentials.into()),
            client_credentials_password: password.into(),
            trust_material: TlsSource::File(trust_material.into()),
        }
    }

    /// TLS-параметры из содержимого файлов
    pub fn from_blobs(
        client_credentials: Vec<u8>,
        password: impl Into<String>,
        trust_material: Vec<u8>,
    ) -> Self {
        Self {
            client_credentials: TlsSource::Blob(client_credentials),
            client_credentials_password: password.into(),
            trust_material: TlsSource::Blob(trust_material),
        }
    }

    /// Собирает TLS-параметры из пользовательского ввода.
    ///
    /// TLS включается только если заданы оба файла. При `read_files`
    /// файлы читаются сразу и транспорту уходит их содержимое.
    pub fn load(
        client_credentials: Option<&Path>,
        password: &str,
        trust_material: Option<&Path>,
        read_files: bool,
    ) -> Result<Option<Self>, ConfigError> {
        let (Some(credentials), Some(trust)) = (client_credentials, trust_material) else {
            return Ok(None);
        };

        if !read_files {
            return Ok(Some(Self::from_files(credentials, password, trust)));
        }

        let credential_blob = read_blob(credentials)?;
        let trust_blob = read_blob(trust)?;

        Ok(Some(Self::from_blobs(credential_blob, password, trust_blob)))
    }

    /// Клиентские credentials
    pub fn client_credentials(&self) -> &TlsSource {
        &self.client_credentials
    }

    /// Пароль к credentials
    pub fn client_credentials_password(&self) -> &str {
        &self.client_credentials_password
    }

    /// Доверенные сертификаты
    pub fn trust_material(&self) -> &TlsSource {
        &self.trust_material
    }
}

// пароль в логи не пишем
impl fmt::Debug for TlsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsOptions")
            .field("client_credentials", &self.client_credentials)
            .field("client_credentials_password", &"***")
            .field("trust_material", &self.trust_material)
            .finish()
    }
}

fn read_blob(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| ConfigError::ReadTlsFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_requires_both_files() {
        let p = Path::new("creds.p12");
        assert!(TlsOptions::load(Some(p), "pw", None, false).unwrap().is_none());
        assert!(TlsOptions::load(None, "pw", Some(p), false).unwrap().is_none());
        assert!(TlsOptions::load(None, "pw", None, true).unwrap().is_none());
    }

    #[test]
    fn load_without_reading_keeps_paths() {
        let tls = TlsOptions::load(
            Some(Path::new("creds.p12")),
            "pw",
            Some(Path::new("trust.p7")),
            false,
        )
        .unwrap()
        .unwrap();

        assert_eq!(tls.client_credentials(), &TlsSource::File("creds.p12".into()));
        assert_eq!(tls.trust_material(), &TlsSource::File("trust.p7".into()));
        assert_eq!(tls.client_credentials_password(), "pw");
    }

    #[test]
    fn load_with_reading_returns_blobs() {
        let mut creds = tempfile::NamedTempFile::new().unwrap();
        creds.write_all(b"pkcs12-bytes").unwrap();
        let mut trust = tempfile::NamedTempFile::new().unwrap();
        trust.write_all(b"pkcs7").unwrap();

        let tls = TlsOptions::load(Some(creds.path()), "", Some(trust.path()), true)
            .unwrap()
            .unwrap();

        assert_eq!(tls.client_credentials(), &TlsSource::Blob(b"pkcs12-bytes".to_vec()));
        assert_eq!(tls.trust_material(), &TlsSource::Blob(b"pkcs7".to_vec()));
    }

    #[test]
    fn load_reports_missing_file() {
        let trust = tempfile::NamedTempFile::new().unwrap();
        let missing = trust.path().with_extension("does-not-exist");

        let err = TlsOptions::load(Some(&missing), "", Some(trust.path()), true).unwrap_err();
        match err {
            ConfigError::ReadTlsFile { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_hides_password() {
        let tls = TlsOptions::from_blobs(vec![1, 2, 3], "secret", vec![4]);
        let dbg = format!("{tls:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("Blob(3 bytes)"));
    }
}
