//! Parsing of interactive commands.

use thiserror::Error;

pub const HELP: &str = "\
commands:
  whoami                      show the logged-in user
  send <paymail> <amount>     send satoshis (asks for password)
  history [page]              list transactions, newest first
  tx <id>                     show one transaction
  contacts                    list contacts
  accept <paymail>            accept a contact request
  reject <paymail>            reject a contact request
  code <paymail>              show verification prompt for a contact
  verify <paymail> <passcode> confirm a contact's verification code
  close                       close the verification prompt
  logout                      end the session
  quit                        exit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Whoami,
    Send { paymail: String, amount: String },
    History { page: Option<u32> },
    Tx { id: String },
    Contacts,
    Accept { paymail: String },
    Reject { paymail: String },
    Code { paymail: String },
    Verify { paymail: String, passcode: String },
    Close,
    Logout,
    Quit,
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (name, args.as_slice()) {
            ("whoami", []) => Self::Whoami,
            ("send", [paymail, amount]) => Self::Send {
                paymail: paymail.to_string(),
                amount: amount.to_string(),
            },
            ("send", _) => return Err(CommandError::Usage("send <paymail> <amount>")),
            ("history", []) => Self::History { page: None },
            ("history", [page]) => Self::History {
                page: Some(
                    page.parse()
                        .map_err(|_| CommandError::Usage("history [page]"))?,
                ),
            },
            ("history", _) => return Err(CommandError::Usage("history [page]")),
            ("tx", [id]) => Self::Tx { id: id.to_string() },
            ("tx", _) => return Err(CommandError::Usage("tx <id>")),
            ("contacts", []) => Self::Contacts,
            ("accept", [paymail]) => Self::Accept {
                paymail: paymail.to_string(),
            },
            ("accept", _) => return Err(CommandError::Usage("accept <paymail>")),
            ("reject", [paymail]) => Self::Reject {
                paymail: paymail.to_string(),
            },
            ("reject", _) => return Err(CommandError::Usage("reject <paymail>")),
            ("code", [paymail]) => Self::Code {
                paymail: paymail.to_string(),
            },
            ("code", _) => return Err(CommandError::Usage("code <paymail>")),
            ("verify", [paymail, passcode]) => Self::Verify {
                paymail: paymail.to_string(),
                passcode: passcode.to_string(),
            },
            ("verify", _) => return Err(CommandError::Usage("verify <paymail> <passcode>")),
            // `close <paymail>` is accepted too; only one prompt is ever open
            ("close", [] | [_]) => Self::Close,
            ("logout", []) => Self::Logout,
            ("quit" | "exit", []) => Self::Quit,
            ("help" | "?", _) => Self::Help,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}
