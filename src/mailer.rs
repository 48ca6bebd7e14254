//! Submission session driver
//!
//! One call to [`MailerService::send_mail`] runs the whole sequence:
//! validate, sanitize, format, connect, authenticate, MAIL FROM,
//! RCPT TO (once per recipient), DATA, QUIT. The first failing step
//! ends the session; nothing is retried.

use crate::config::MailServer;
use crate::connection::{self, SmtpSession};
use crate::error::{Error, Result, SmtpError, Step};
use crate::mail::Mail;
use crate::sanitizer::sanitize_mail;
use crate::validator::validate_mail;
use mail_send::Credentials;
use mail_send::smtp::AssertReply;
use mail_send::smtp::message::Parameters;
use std::future::Future;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Name announced in EHLO.
const LOCAL_NAME: &str = "localhost";

/// Something that can deliver a [`Mail`].
pub trait Mailer {
    /// Deliver `mail`, returning once the server has accepted it and
    /// the session has ended.
    fn send_mail(&self, mail: Mail) -> impl Future<Output = Result<()>> + Send;
}

/// [`Mailer`] backed by a single SMTP server.
#[derive(Debug, Clone)]
pub struct MailerService {
    server: MailServer,
}

impl MailerService {
    #[must_use]
    pub const fn new(server: MailServer) -> Self {
        Self { server }
    }

    #[must_use]
    pub const fn server(&self) -> &MailServer {
        &self.server
    }
}

impl Mailer for MailerService {
    async fn send_mail(&self, mail: Mail) -> Result<()> {
        validate_mail(&mail)?;
        let mail = sanitize_mail(mail);
        let payload = mail.to_wire();

        let mut session = connection::connect(&self.server).await?;
        let result = self.transact(&mut session, &mail, &payload).await;

        if let Err(e) = session.stream.shutdown().await {
            debug!("Closing SMTP connection failed: {}", e);
        }

        match &result {
            Ok(()) => info!("Delivered message to {} recipient(s)", mail.to.len()),
            Err(e) => warn!("Sending mail via {} failed: {}", self.server.addr(), e),
        }
        result
    }
}

impl MailerService {
    /// Run the protocol steps on an open session.
    async fn transact(&self, session: &mut SmtpSession, mail: &Mail, payload: &str) -> Result<()> {
        if self.server.should_authenticate() {
            debug!("Authenticating as {}", self.server.username);
            let capabilities = session.ehlo(LOCAL_NAME).await.map_err(Error::Auth)?;
            let credentials =
                Credentials::new(self.server.username.as_str(), self.server.password.as_str());
            session
                .authenticate(&credentials, &capabilities)
                .await
                .map_err(Error::Auth)?;
        } else {
            debug!("Skipping authentication for {}", self.server.host);
            session
                .ehlo(LOCAL_NAME)
                .await
                .map_err(|source| protocol(Step::MailFrom, source))?;
        }

        let params = Parameters::default();
        session
            .mail_from(&mail.from, &params)
            .await
            .map_err(|source| protocol(Step::MailFrom, source))?;

        for to in &mail.to {
            session
                .rcpt_to(to, &params)
                .await
                .map_err(|source| protocol(Step::RcptTo, source))?;
        }

        session
            .cmd(b"DATA\r\n")
            .await
            .and_then(|reply| reply.assert_code(354))
            .map_err(|source| protocol(Step::Data, source))?;

        // Dot-stuffs the payload and appends the terminating `.` line.
        session
            .write_message(payload.as_bytes())
            .await
            .map_err(|e| protocol(Step::Write, SmtpError::Io(e)))?;

        tokio::time::timeout(session.timeout, session.read())
            .await
            .unwrap_or(Err(SmtpError::Timeout))
            .and_then(AssertReply::assert_positive_completion)
            .map_err(|source| protocol(Step::Close, source))?;

        session
            .cmd(b"QUIT\r\n")
            .await
            .and_then(AssertReply::assert_positive_completion)
            .map_err(|source| protocol(Step::Quit, source))
    }
}

fn protocol(step: Step, source: SmtpError) -> Error {
    Error::Protocol { step, source }
}

/// Send `mail` through `server` in a single session.
///
/// # Errors
///
/// Returns the first failure, wrapped with the phase it came from.
/// See [`Error::is_ambiguous_delivery`] for QUIT failures.
pub async fn send(mail: Mail, server: MailServer) -> Result<()> {
    MailerService::new(server).send_mail(mail).await
}
