use crate::cli::HistoryCommand;
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::storage::{JsonFileStore, Session, SessionLoad, SessionStore};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let store = JsonFileStore::new(&config.storage.session_log);
    let loaded = store.load()?;

    match &loaded {
        SessionLoad::Missing => {
            tracing::debug!("Session log {} does not exist", store.path().display());
        }
        SessionLoad::Malformed(reason) => {
            eprintln!(
                "{}",
                format!(
                    "Session log {} could not be parsed: {}",
                    store.path().display(),
                    reason
                )
                .yellow()
            );
        }
        SessionLoad::Loaded(_) => {}
    }

    match command {
        HistoryCommand::List => {
            if loaded.sessions().is_empty() {
                println!("{}", "No chat sessions found.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "Chat ID".bold(),
                "Created".bold(),
                "Messages".bold(),
                "First Question".bold()
            ]);

            for session in loaded.sessions() {
                let first = session
                    .messages
                    .first()
                    .map(|m| truncate(&m.question, 40))
                    .unwrap_or_else(|| "-".to_string());

                table.add_row(prettytable::row![
                    session.chat_id.cyan(),
                    session.timestamp,
                    session.messages.len(),
                    first
                ]);
            }

            println!("\nChat Sessions:");
            table.printstd();
            println!();
            println!(
                "Use {} to view a transcript.",
                "caregp-chat history show <CHAT_ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { chat_id } => {
            let session = loaded.find(&chat_id).ok_or_else(|| {
                ChatError::Storage(format!("No session found for chat_id {}", chat_id))
            })?;
            print!("{}", render_transcript(session));
        }
    }

    Ok(())
}

/// Render a session as plain text, one numbered exchange per block
pub fn render_transcript(session: &Session) -> String {
    let mut out = format!(
        "Session {} (started {})\n",
        session.chat_id, session.timestamp
    );
    for (i, message) in session.messages.iter().enumerate() {
        out.push_str(&format!(
            "\n[{}] Q: {}\n    A: {}\n",
            i + 1,
            message.question,
            message.response
        ));
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
