//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TALENTLAYER_*` environment variables, an optional
//! configuration file and command-line flags. Every field is optional; the
//! accessors apply defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::inbound::http::ErrorExposure;
use crate::outbound::blob::CloudinaryCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8888";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_BLOB_NAMESPACE: &str = "talentlayer";

/// Runtime settings for the profile service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TALENTLAYER")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. In-memory adapters are used when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Whether internal error messages reach clients.
    pub error_exposure: Option<ErrorExposure>,
    /// Largest accepted request body, in bytes.
    pub upload_limit_bytes: Option<usize>,
    /// Leading path segment for avatar folders in blob storage.
    pub blob_namespace: Option<String>,
    /// Cloudinary cloud name.
    pub cloudinary_cloud_name: Option<String>,
    /// Cloudinary API key.
    pub cloudinary_api_key: Option<String>,
    /// Cloudinary API secret.
    pub cloudinary_api_secret: Option<String>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8888`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8888)))
    }

    /// Return the configured pool size, falling back to the default.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
    }

    /// Return the configured error exposure, defaulting to production.
    pub fn error_exposure(&self) -> ErrorExposure {
        self.error_exposure.unwrap_or_default()
    }

    /// Return the body size limit, falling back to 5 MiB.
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes
            .unwrap_or(DEFAULT_UPLOAD_LIMIT_BYTES)
    }

    /// Return the blob namespace, falling back to `talentlayer`.
    pub fn blob_namespace(&self) -> &str {
        self.blob_namespace
            .as_deref()
            .filter(|ns| !ns.trim().is_empty())
            .unwrap_or(DEFAULT_BLOB_NAMESPACE)
    }

    /// Cloudinary credentials, present only when all three values are set.
    pub fn cloudinary_credentials(&self) -> Option<CloudinaryCredentials> {
        let cloud_name = non_blank(self.cloudinary_cloud_name.as_deref())?;
        let api_key = non_blank(self.cloudinary_api_key.as_deref())?;
        let api_secret = non_blank(self.cloudinary_api_secret.as_deref())?;
        Some(CloudinaryCredentials {
            cloud_name: cloud_name.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: Zeroizing::new(api_secret.to_owned()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "TALENTLAYER_BIND_ADDR",
        "TALENTLAYER_DATABASE_URL",
        "TALENTLAYER_DB_POOL_SIZE",
        "TALENTLAYER_ERROR_EXPOSURE",
        "TALENTLAYER_UPLOAD_LIMIT_BYTES",
        "TALENTLAYER_BLOB_NAMESPACE",
        "TALENTLAYER_CLOUDINARY_CLOUD_NAME",
        "TALENTLAYER_CLOUDINARY_API_KEY",
        "TALENTLAYER_CLOUDINARY_API_SECRET",
    ];

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    fn with_overrides(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(n, _)| n == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("talentlayer-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr().to_string(), DEFAULT_BIND_ADDR);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_pool_size(), DEFAULT_POOL_SIZE);
        assert_eq!(settings.error_exposure(), ErrorExposure::Production);
        assert_eq!(settings.upload_limit_bytes(), 5 * 1024 * 1024);
        assert_eq!(settings.blob_namespace(), "talentlayer");
        assert!(settings.cloudinary_credentials().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_overrides(&[
            ("TALENTLAYER_BIND_ADDR", "127.0.0.1:9000"),
            ("TALENTLAYER_DATABASE_URL", "postgres://localhost/talent"),
            ("TALENTLAYER_DB_POOL_SIZE", "4"),
            ("TALENTLAYER_ERROR_EXPOSURE", "development"),
            ("TALENTLAYER_UPLOAD_LIMIT_BYTES", "1024"),
            ("TALENTLAYER_BLOB_NAMESPACE", "staging"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/talent")
        );
        assert_eq!(settings.db_pool_size(), 4);
        assert_eq!(settings.error_exposure(), ErrorExposure::Development);
        assert_eq!(settings.upload_limit_bytes(), 1024);
        assert_eq!(settings.blob_namespace(), "staging");
    }

    #[rstest]
    #[case(&[
        ("TALENTLAYER_CLOUDINARY_CLOUD_NAME", "demo"),
        ("TALENTLAYER_CLOUDINARY_API_KEY", "key"),
    ], false)]
    #[case(&[
        ("TALENTLAYER_CLOUDINARY_CLOUD_NAME", "demo"),
        ("TALENTLAYER_CLOUDINARY_API_KEY", "key"),
        ("TALENTLAYER_CLOUDINARY_API_SECRET", "  "),
    ], false)]
    #[case(&[
        ("TALENTLAYER_CLOUDINARY_CLOUD_NAME", "demo"),
        ("TALENTLAYER_CLOUDINARY_API_KEY", "key"),
        ("TALENTLAYER_CLOUDINARY_API_SECRET", "secret"),
    ], true)]
    fn cloudinary_needs_every_credential(
        #[case] overrides: &[(&'static str, &str)],
        #[case] expected: bool,
    ) {
        let _guard = lock_env(with_overrides(overrides));

        let credentials = load_from_empty_args().cloudinary_credentials();
        assert_eq!(credentials.is_some(), expected);
        if let Some(credentials) = credentials {
            assert_eq!(credentials.cloud_name, "demo");
            assert_eq!(credentials.api_secret.as_str(), "secret");
        }
    }
}
