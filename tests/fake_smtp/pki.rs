//! Throwaway PKI for TLS tests
//!
//! Generates a CA and a server certificate signed by it for
//! `localhost`, and writes the CA certificate to a temporary PEM file
//! the client can be pointed at.

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use rustls::pki_types::PrivatePkcs8KeyDer;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub struct TestPki {
    ca_file: NamedTempFile,
    server_config: Arc<rustls::ServerConfig>,
}

impl TestPki {
    /// A CA plus a `localhost` server certificate issued by it.
    pub fn new() -> Self {
        Self::for_names(&["localhost"])
    }

    pub fn for_names(names: &[&str]) -> Self {
        // Multiple tests may race to install the provider; ignore the
        // error if it's already set.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let ca_key = KeyPair::generate().expect("generate CA key");
        let mut ca_params = CertificateParams::new(Vec::<String>::new()).expect("CA params");
        ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        ca_params
            .distinguished_name
            .push(DnType::CommonName, "vertmailer test CA");
        let ca_cert = ca_params.self_signed(&ca_key).expect("self-sign CA");

        let server_key = KeyPair::generate().expect("generate server key");
        let names: Vec<String> = names.iter().map(ToString::to_string).collect();
        let mut server_params = CertificateParams::new(names).expect("server params");
        server_params
            .distinguished_name
            .push(DnType::CommonName, "fake smtp");
        let server_cert = server_params
            .signed_by(&server_key, &ca_cert, &ca_key)
            .expect("sign server cert");

        let mut ca_file = NamedTempFile::new().expect("create CA file");
        ca_file
            .write_all(ca_cert.pem().as_bytes())
            .expect("write CA file");

        let key_der = PrivatePkcs8KeyDer::from(server_key.serialize_der());
        let server_config = rustls::ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(vec![server_cert.der().clone()], key_der.into())
            .expect("build server TLS config");

        Self {
            ca_file,
            server_config: Arc::new(server_config),
        }
    }

    /// Path of the PEM file holding the CA certificate.
    pub fn ca_path(&self) -> &Path {
        self.ca_file.path()
    }

    pub fn server_config(&self) -> Arc<rustls::ServerConfig> {
        self.server_config.clone()
    }
}
