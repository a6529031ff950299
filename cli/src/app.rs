//! Interactive session: reads commands from stdin and drives the wallet
//! workflows against a backend.

use std::sync::Arc;

use anyhow::Context;
use bux_api::WalletBackend;
use bux_types::SystemClock;
use bux_utils::format_sat_as_bsv;
use bux_wallet_core::{
    Autoupdate, Channel, ContactAction, ContactError, ContactsBoard, DraftError, Notice,
    NotificationSurface, Session, SessionState, TransactionHistory, TransactionResult,
    TransferEvent, TransferForm,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::command::{Command, HELP};

pub struct App<B> {
    backend: B,
    input: Lines<BufReader<Stdin>>,
    session: Session,
    form: TransferForm,
    contacts: ContactsBoard,
    history: TransactionHistory,
    surface: NotificationSurface,
}

impl<B: WalletBackend> App<B> {
    pub fn new(backend: B, page_size: u32) -> Self {
        let autoupdate = Autoupdate::new();
        Self {
            backend,
            input: BufReader::new(tokio::io::stdin()).lines(),
            session: Session::new(),
            form: TransferForm::new(Arc::new(SystemClock), autoupdate.clone()),
            contacts: ContactsBoard::new(),
            history: TransactionHistory::new(&autoupdate, page_size),
            surface: NotificationSurface::new(),
        }
    }

    /// Log in (reusing a live session cookie if there is one), then run the
    /// command loop until `quit` or end of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.session.load(&self.backend).await;
        if !self.ensure_logged_in().await? {
            return Ok(());
        }
        println!("type `help` for a list of commands");

        loop {
            print_prompt("> ");
            let Some(line) = self.input.next_line().await? else {
                return Ok(());
            };
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };
            if !self.dispatch(command).await? {
                return Ok(());
            }
        }
    }

    /// Returns `false` when the session should end.
    async fn dispatch(&mut self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Whoami => self.whoami(),
            Command::Send { paymail, amount } => {
                if self.send(&paymail, &amount).await? == Some(TransactionResult::AuthExpired) {
                    self.session.expire();
                    let logged_in = self.ensure_logged_in().await?;
                    self.surface.clear_channel(Channel::Transfer);
                    return Ok(logged_in);
                }
            }
            Command::History { page } => self.history(page).await,
            Command::Tx { id } => self.transaction(&id).await?,
            Command::Contacts => self.list_contacts().await,
            Command::Accept { paymail } => {
                let result = self.contacts.accept(&self.backend, &paymail).await;
                self.after_contact_action(result);
            }
            Command::Reject { paymail } => {
                let result = self.contacts.reject(&self.backend, &paymail).await;
                self.after_contact_action(result);
            }
            Command::Code { paymail } => {
                let result = self.open_code(&paymail).await;
                self.after_contact_action(result);
            }
            Command::Verify { paymail, passcode } => {
                let result = self.verify(&paymail, &passcode).await;
                self.after_contact_action(result);
            }
            Command::Close => {
                self.contacts.close_prompt();
                self.surface.clear_channel(Channel::Contacts);
            }
            Command::Logout => {
                if let Err(err) = self.session.logout(&self.backend).await {
                    tracing::warn!(%err, "logout request failed");
                }
                self.surface.dismiss();
                println!("logged out");
                return self.ensure_logged_in().await;
            }
            Command::Quit => return Ok(false),
            Command::Help => println!("{HELP}"),
        }
        Ok(true)
    }

    /// Prompt for credentials until a session exists. `false` on end of input.
    async fn ensure_logged_in(&mut self) -> anyhow::Result<bool> {
        loop {
            match self.session.state() {
                SessionState::LoggedIn(user) => {
                    println!("logged in as {}", user.paymail);
                    self.surface.clear_channel(Channel::Session);
                    return Ok(true);
                }
                SessionState::Failed(notice) => {
                    self.surface.show(Channel::Session, notice.clone());
                    self.print_banner();
                }
                SessionState::LoggedOut | SessionState::Unknown => {}
            }

            print_prompt("email: ");
            let Some(email) = self.input.next_line().await? else {
                return Ok(false);
            };
            let password = read_password("password: ").await?;
            self.session
                .login(&self.backend, email.trim(), &password)
                .await;
        }
    }

    fn whoami(&self) {
        match self.session.state().user() {
            Some(user) => println!(
                "{} <{}>  balance {} sat ({} BSV)",
                user.paymail,
                user.email,
                user.balance,
                format_sat_as_bsv(user.balance)
            ),
            None => println!("not logged in"),
        }
    }

    /// Fill the form, confirm with a password, and wait out the auto-close.
    ///
    /// Returns the backend outcome, or `None` if nothing was sent.
    async fn send(
        &mut self,
        paymail: &str,
        amount: &str,
    ) -> anyhow::Result<Option<TransactionResult>> {
        self.form.clear()?;
        self.surface.clear_channel(Channel::Transfer);
        self.form.set_paymail(paymail);
        if !self.form.edit_amount(amount) {
            println!("amount must be a whole number of satoshis, at least 1");
            return Ok(None);
        }

        match self.form.submit() {
            Ok(_) => {}
            Err(DraftError::Validation(err)) => {
                self.surface
                    .show(Channel::Transfer, Notice::error(err.to_string()));
                self.print_banner();
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        let dialog = self.form.open_confirmation()?;
        println!("{}", dialog.summary());
        dialog.set_password(read_password("password: ").await?);
        let outcome = dialog.submit(&self.backend).await;

        self.surface.publish(
            Channel::Transfer,
            self.form.dialog().and_then(|d| d.notice()),
        );
        self.print_banner();

        match outcome {
            Ok(TransactionResult::Success) => {
                if let Some(wait) = self.form.time_until_dismiss() {
                    tokio::time::sleep(wait).await;
                }
                if let Some(TransferEvent::Settled(draft)) = self.form.tick() {
                    tracing::debug!(recipient = %draft.recipient, "transfer dialog closed");
                }
                self.surface.clear_channel(Channel::Transfer);
                Ok(Some(TransactionResult::Success))
            }
            Ok(failure) => {
                self.form.cancel_confirmation()?;
                Ok(Some(failure))
            }
            Err(_) => {
                self.form.cancel_confirmation()?;
                Ok(None)
            }
        }
    }

    async fn history(&mut self, page: Option<u32>) {
        if let Some(page) = page {
            self.history.go_to_page(page);
        }
        match self.history.refresh_if_stale(&self.backend).await {
            Ok(_) => self.surface.clear_channel(Channel::History),
            Err(_) => {
                self.surface
                    .publish(Channel::History, self.history.error());
                self.print_banner();
                return;
            }
        }

        println!("page {}", self.history.page());
        if self.history.rows().is_empty() {
            println!("  no transactions");
        }
        for tx in self.history.rows() {
            let counterparty = tx
                .receiver
                .as_deref()
                .or(tx.sender.as_deref())
                .unwrap_or("-");
            println!(
                "  {}  {:<8} {:>16} BSV  {:<10} {}  {}",
                tx.id,
                tx.direction,
                format_sat_as_bsv(tx.total_value),
                tx.status,
                tx.created_at,
                counterparty
            );
        }
    }

    async fn transaction(&mut self, id: &str) -> anyhow::Result<()> {
        match self.history.details(&self.backend, id).await {
            Ok(details) => println!("{}", serde_json::to_string_pretty(&details)?),
            Err(err) => println!("{}", Notice::error(err.body().unwrap_or("transaction not found"))),
        }
        Ok(())
    }

    async fn list_contacts(&mut self) {
        if self.contacts.refresh(&self.backend).await.is_err() {
            self.surface
                .publish(Channel::Contacts, self.contacts.error());
            self.print_banner();
            return;
        }
        let rows = self.contacts.sorted();
        if rows.is_empty() {
            println!("  no contacts");
        }
        for contact in rows {
            let hint = match ContactAction::for_status(contact.status) {
                ContactAction::AcceptReject => "accept | reject",
                ContactAction::ShowCode => "code",
            };
            println!(
                "  {:<32} {:<24} {:<12} [{}]",
                contact.paymail,
                contact.full_name,
                contact.status.as_str(),
                hint
            );
        }
    }

    async fn open_code(&mut self, paymail: &str) -> Result<(), ContactError> {
        if self.contacts.contacts().is_none() {
            self.contacts.refresh(&self.backend).await?;
        }
        self.contacts.show_code(paymail)
    }

    async fn verify(&mut self, paymail: &str, passcode: &str) -> Result<(), ContactError> {
        let open_for_paymail = self
            .contacts
            .prompt()
            .is_some_and(|p| p.contact.paymail == paymail);
        if !open_for_paymail {
            self.open_code(paymail).await?;
        }
        self.contacts.confirm(&self.backend, passcode).await?;
        println!("{paymail} verified");
        self.contacts.close_prompt();
        Ok(())
    }

    fn after_contact_action(&mut self, result: Result<(), ContactError>) {
        match result {
            Ok(()) => {
                self.surface.clear_channel(Channel::Contacts);
                if let Some(prompt) = self.contacts.prompt() {
                    println!("verification for {}", prompt.contact.paymail);
                    if prompt.show_just_added_message() {
                        println!(
                            "  contact added; exchange codes and run `verify {} <passcode>`",
                            prompt.contact.paymail
                        );
                    }
                }
            }
            Err(ContactError::Api(_)) => {
                self.surface
                    .publish(Channel::Contacts, self.contacts.error());
                self.print_banner();
            }
            Err(err) => println!("{err}"),
        }
    }

    fn print_banner(&self) {
        if let Some(banner) = self.surface.render() {
            println!("{banner}");
        }
    }
}

fn print_prompt(prompt: &str) {
    use std::io::Write;
    print!("{prompt}");
    let _ = std::io::stdout().flush();
}

async fn read_password(prompt: &'static str) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt))
        .await
        .context("password prompt task failed")?
        .context("failed to read password")
}
