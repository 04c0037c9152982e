//! TLS configuration for the HTTPS client.
//!
//! Builds a [`rustls::ClientConfig`] trusting the Mozilla root set shipped
//! with `webpki-roots`, optionally extended with certificates from a PEM
//! bundle (corporate proxies, local test CAs).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store holds the standard web roots
/// plus every certificate found in `extra_ca`, if given.
///
/// # Errors
///
/// Returns [`AaioError::Tls`](crate::AaioError::Tls) if the PEM bundle
/// cannot be read, parsed, or contains no usable certificate.
pub fn build_tls_config(extra_ca: Option<&Path>) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = extra_ca {
        let file = File::open(path).map_err(|e| {
            crate::AaioError::Tls(format!("failed to open {}: {e}", path.display()))
        })?;
        let certs: Vec<_> = rustls_pemfile::certs(&mut BufReader::new(file))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| crate::AaioError::Tls(format!("failed to parse CA PEM: {e}")))?;

        let (added, _ignored) = root_store.add_parsable_certificates(certs);
        if added == 0 {
            return Err(crate::AaioError::Tls(format!(
                "no usable certificates in {}",
                path.display()
            )));
        }
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
