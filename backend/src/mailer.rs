//! Best-effort email notifications, decoupled from request handling.
//!
//! Handlers queue a [`Notice`] and move on; a background task owns the SMTP
//! transport and performs one blocking send per message. Nothing here can
//! fail a request: every error path degrades to a log line.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::SmtpConfig;

/// One queued notification: a confirmation to the applicant plus an
/// internal copy to the operations address.
#[derive(Debug, Clone)]
pub struct Notice {
    pub nom: String,
    pub prenom: String,
    pub email: String,
}

/// Cloneable handle handlers use to queue notices.
#[derive(Clone)]
pub struct Mailer {
    tx: mpsc::Sender<Notice>,
}

impl Mailer {
    /// Queues a notice without waiting. A full or closed channel is logged
    /// and dropped; the submission it belongs to is already persisted.
    pub fn notify(&self, notice: Notice) {
        if let Err(e) = self.tx.try_send(notice) {
            warn!("dropping notification: {}", e);
        }
    }
}

/// Spawns the sender task and returns the handle.
pub fn start(smtp: Option<SmtpConfig>, ops_email: String) -> Mailer {
    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(run(smtp, ops_email, rx));
    Mailer { tx }
}

async fn run(smtp: Option<SmtpConfig>, ops_email: String, mut rx: mpsc::Receiver<Notice>) {
    while let Some(notice) = rx.recv().await {
        let Some(cfg) = smtp.clone() else {
            info!(
                "smtp disabled, skipping notification for {} {}",
                notice.prenom, notice.nom
            );
            continue;
        };
        let ops = ops_email.clone();
        // One blocking SMTP round per notice, off the async runtime.
        match tokio::task::spawn_blocking(move || send_notice(&cfg, &ops, &notice)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("notification failed: {}", e),
            Err(e) => warn!("notification task join error: {}", e),
        }
    }
}

/// Builds and sends both messages. Runs on the blocking pool.
fn send_notice(cfg: &SmtpConfig, ops_email: &str, notice: &Notice) -> Result<(), String> {
    let transport = build_transport(cfg)?;
    let reference = Uuid::new_v4();

    let confirmation = Message::builder()
        .from(parse_mailbox(&cfg.from)?)
        .to(parse_mailbox(&notice.email)?)
        .subject("Votre demande de préinscription a bien été reçue")
        .body(format!(
            "Bonjour {},\n\n\
             Nous avons bien reçu votre dossier de préinscription ainsi que les \
             pièces transmises. Il sera examiné dans les meilleurs délais.\n\n\
             Référence : {}\n",
            notice.prenom, reference
        ))
        .map_err(|e| format!("building confirmation: {}", e))?;

    let copy = Message::builder()
        .from(parse_mailbox(&cfg.from)?)
        .to(parse_mailbox(ops_email)?)
        .subject(format!("Nouveau dossier : {} {}", notice.nom, notice.prenom))
        .body(format!(
            "Dossier reçu pour {} {} <{}>.\nRéférence : {}\n",
            notice.nom, notice.prenom, notice.email, reference
        ))
        .map_err(|e| format!("building internal copy: {}", e))?;

    // The two sends are independent; one failing must not cancel the other.
    let mut failures = Vec::new();
    if let Err(e) = transport.send(&confirmation) {
        failures.push(format!("confirmation: {}", e));
    }
    if let Err(e) = transport.send(&copy) {
        failures.push(format!("internal copy: {}", e));
    }
    if failures.is_empty() {
        info!(
            "notification {} sent for {} {}",
            reference, notice.prenom, notice.nom
        );
        Ok(())
    } else {
        Err(failures.join("; "))
    }
}

fn build_transport(cfg: &SmtpConfig) -> Result<SmtpTransport, String> {
    let mut builder = SmtpTransport::relay(&cfg.host)
        .map_err(|e| format!("smtp relay {}: {}", cfg.host, e))?;
    if let (Some(user), Some(pass)) = (&cfg.username, &cfg.password) {
        builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
    }
    Ok(builder.build())
}

fn parse_mailbox(addr: &str) -> Result<Mailbox, String> {
    addr.parse()
        .map_err(|e| format!("address {}: {}", addr, e))
}
