//! Interactive terminal loop around a chat session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use buddy_chat::{ChatError, ChatSession, QUICK_ACTIONS};
use buddy_core::Message;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text for the chat.
    Say(String),
    /// Quick action by 1-based position.
    Quick(usize),
    Skill,
    ShowRecommendations,
    CloseRecommendations,
    Help,
    Quit,
    /// Unrecognised slash command.
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quick"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Quick(n),
                _ => Command::Unknown(trimmed.to_string()),
            },
            (Some("skill"), None) => Command::Skill,
            (Some("recs"), None) => Command::ShowRecommendations,
            (Some("close"), None) => Command::CloseRecommendations,
            (Some("help"), None) => Command::Help,
            (Some("quit"), None) | (Some("exit"), None) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Format one transcript entry for the terminal.
pub fn format_message(message: &Message) -> String {
    let speaker = if message.is_bot { "Buddy" } else { "Anda" };
    format!("{}: {}", speaker, message.text)
}

pub fn help_text() -> String {
    let mut lines = vec![
        "Ketik pertanyaan lalu tekan Enter.".to_string(),
        "Perintah:".to_string(),
    ];
    for (idx, action) in QUICK_ACTIONS.iter().enumerate() {
        lines.push(format!("  /quick {}  {}", idx + 1, action));
    }
    lines.push("  /skill    Skill Analyzer".to_string());
    lines.push("  /recs     Tampilkan rekomendasi".to_string());
    lines.push("  /close    Tutup rekomendasi".to_string());
    lines.push("  /quit     Keluar".to_string());
    lines.join("\n")
}

/// Drives a session from line-based input, writing new transcript entries
/// to `out` as they appear.
pub struct Repl<'a, W: Write> {
    session: &'a ChatSession,
    out: W,
    printed: usize,
}

impl<'a, W: Write> Repl<'a, W> {
    pub fn new(session: &'a ChatSession, out: W) -> Self {
        Self {
            session,
            out,
            printed: 0,
        }
    }

    /// Print transcript entries not shown yet.
    pub fn flush_transcript(&mut self) -> std::io::Result<()> {
        let transcript = self.session.transcript();
        for message in transcript.iter().skip(self.printed) {
            writeln!(self.out, "{}", format_message(message))?;
        }
        self.printed = transcript.len();
        self.out.flush()
    }

    /// Handle one input line. Returns `false` when the user quits.
    pub async fn handle_line(&mut self, line: &str) -> std::io::Result<bool> {
        let result = match Command::parse(line) {
            Command::Quit => return Ok(false),
            Command::Help => {
                writeln!(self.out, "{}", help_text())?;
                return Ok(true);
            }
            Command::Unknown(cmd) => {
                writeln!(self.out, "Perintah tidak dikenal: {}", cmd)?;
                return Ok(true);
            }
            Command::ShowRecommendations => {
                match self.session.render_surface() {
                    Some(text) => writeln!(self.out, "{}", text)?,
                    None => writeln!(self.out, "Tidak ada rekomendasi yang ditampilkan.")?,
                }
                return Ok(true);
            }
            Command::CloseRecommendations => {
                self.session.close_surface();
                return Ok(true);
            }
            Command::Say(text) => {
                self.session.set_input(text);
                if !self.session.can_send() {
                    return Ok(true);
                }
                self.typing()?;
                self.session.send_input().await
            }
            Command::Quick(n) => {
                self.typing()?;
                self.session.send_quick_action(n - 1).await
            }
            Command::Skill => {
                self.typing()?;
                self.session.analyze_skills().await
            }
        };

        match result {
            Ok(_) => {}
            Err(ChatError::EmptyMessage) => {}
            Err(e) => tracing::warn!(error = %e, "Chat command refused"),
        }

        self.flush_transcript()?;
        if self.session.is_surface_open() {
            if let Some(text) = self.session.render_surface() {
                writeln!(self.out, "\n{}\n", text)?;
            }
        }
        Ok(true)
    }

    /// Read lines until EOF or `/quit`.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> std::io::Result<()> {
        self.flush_transcript()?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if !self.handle_line(&line).await? {
                break;
            }
        }
        Ok(())
    }

    fn typing(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "Buddy sedang mengetik...")?;
        self.out.flush()
    }
}
