//! Transport setup for SMTP sessions
//!
//! Opens either a plain TCP stream or an implicit-TLS stream whose
//! peer is verified against a CA bundle loaded from disk, then hands
//! the stream to a [`mail_send::SmtpClient`].

use crate::config::MailServer;
use crate::error::{SmtpError, TransportError};
use mail_send::SmtpClient;
use mail_send::smtp::AssertReply;
use rustls::RootCertStore;
use rustls::pki_types::ServerName;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, info};

/// Byte stream an SMTP session can run over.
pub trait MailStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> MailStream for T {}

/// An SMTP session over either transport.
pub type SmtpSession = SmtpClient<Box<dyn MailStream>>;

/// Build a trust store from the PEM certificates in `path`.
///
/// # Errors
///
/// Returns [`TransportError::CaCert`] if the file cannot be read or
/// holds no usable certificate.
pub fn load_ca_cert(path: &Path) -> Result<RootCertStore, TransportError> {
    let pem = std::fs::read(path).map_err(|e| {
        TransportError::CaCert(format!("failed to read {}: {e}", path.display()))
    })?;

    let certs = rustls_pemfile::certs(&mut BufReader::new(pem.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TransportError::CaCert(format!("invalid PEM in {}: {e}", path.display())))?;

    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(certs);
    if added == 0 {
        return Err(TransportError::CaCert(format!(
            "no usable certificate in {} ({ignored} rejected)",
            path.display()
        )));
    }

    debug!("Loaded {} CA certificate(s) from {}", added, path.display());
    Ok(roots)
}

/// Build a TLS connector that only trusts `roots`.
fn tls_connector(roots: RootCertStore) -> Result<TlsConnector, TransportError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| TransportError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

/// Open a fresh SMTP session to `server`.
///
/// With `use_tls` set, the CA bundle is loaded before dialing, the
/// TLS handshake verifies the certificate chain and that it was
/// issued for `server.host`, and the greeting is read over TLS.
///
/// # Errors
///
/// Returns the [`TransportError`] variant of the stage that failed:
/// CA loading, dialing, TLS handshake, or reading the greeting.
pub async fn connect(server: &MailServer) -> Result<SmtpSession, TransportError> {
    let addr = server.addr();

    let stream: Box<dyn MailStream> = if server.use_tls {
        let roots = load_ca_cert(&server.ca_cert_path)?;
        let connector = tls_connector(roots)?;
        let server_name = ServerName::try_from(server.host.clone())
            .map_err(|e| TransportError::Tls(format!("Invalid server name: {e}")))?;

        debug!("Connecting to SMTP server at {} (TLS)", addr);
        let tcp_stream = TcpStream::connect(&addr)
            .await
            .map_err(TransportError::Dial)?;
        let tls_stream = connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| TransportError::Tls(e.to_string()))?;
        Box::new(tls_stream)
    } else {
        debug!("Connecting to SMTP server at {}", addr);
        let tcp_stream = TcpStream::connect(&addr)
            .await
            .map_err(TransportError::Dial)?;
        Box::new(tcp_stream)
    };

    let mut client = SmtpClient {
        stream,
        timeout: server.timeout,
    };
    tokio::time::timeout(server.timeout, client.read())
        .await
        .unwrap_or(Err(SmtpError::Timeout))
        .and_then(AssertReply::assert_positive_completion)
        .map_err(TransportError::Client)?;

    info!("Connected to SMTP server at {}", addr);
    Ok(client)
}
