use anyhow::Result;
use banter_types::{trim_text, ChatMessage, ModelInfo};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::api::{ApiClient, Stats};
use crate::view;

pub const CLEAR_PROMPT: &str = "Clear all chat history? This cannot be undone. [y/N] ";

const HELP: &str = "\
Type a message and press Enter to send it.
  /models       list selectable models
  /model <id>   switch model
  /stats        message and token totals
  /history      reprint the whole history
  /clear        delete all history (asks first)
  /help         this text
  /quit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Blank,
    Send(String),
    Clear,
    Models,
    Model(Option<String>),
    Stats,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = trim_text(line);
        if line.is_empty() {
            return Input::Blank;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Input::Send(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match parts.next().unwrap_or_default() {
            "clear" => Input::Clear,
            "models" => Input::Models,
            "model" => Input::Model(parts.next().map(str::to_string)),
            "stats" => Input::Stats,
            "history" => Input::History,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            other => Input::Unknown(other.to_string()),
        }
    }
}

pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Local view of the remote chat: history, totals and model selection
pub struct Session {
    client: ApiClient,
    messages: Vec<ChatMessage>,
    stats: Stats,
    models: Vec<ModelInfo>,
    selected_model: Option<String>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
            stats: Stats::default(),
            models: Vec::new(),
            selected_model: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// Load history, catalog and totals concurrently. Failures are reported
    /// and leave the corresponding local state empty.
    pub async fn load(&mut self, preferred_model: Option<&str>, out: &mut impl Write) -> Result<()> {
        let (messages, models, stats) = tokio::join!(
            self.client.messages(),
            self.client.models(),
            self.client.stats()
        );

        match messages {
            Ok(messages) => self.messages = messages,
            Err(err) => writeln!(out, "! could not load history: {err}")?,
        }
        match models {
            Ok(models) => self.models = models,
            Err(err) => writeln!(out, "! could not load models: {err}")?,
        }
        match stats {
            Ok(stats) => self.stats = stats,
            Err(err) => writeln!(out, "! could not load stats: {err}")?,
        }

        self.selected_model = match preferred_model {
            Some(id) if self.models.iter().any(|m| m.id == id) => Some(id.to_string()),
            Some(id) => {
                writeln!(out, "! unknown model '{id}', using the default")?;
                self.models.first().map(|m| m.id.clone())
            }
            None => self.models.first().map(|m| m.id.clone()),
        };

        Ok(())
    }

    /// Read commands until `/quit` or end of input
    pub async fn run<R>(&mut self, input: R, out: &mut impl Write) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        writeln!(out, "{}", view::render_history(&self.messages))?;
        if let Some(model) = &self.selected_model {
            writeln!(out, "model: {model}  (/help for commands)")?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match Input::parse(&line) {
                Input::Blank => {}
                Input::Send(text) => self.send(&text, out).await?,
                Input::Clear => self.clear(&mut lines, out).await?,
                Input::Models => self.print_models(out)?,
                Input::Model(Some(id)) => self.select_model(&id, out)?,
                Input::Model(None) => writeln!(out, "usage: /model <id>")?,
                Input::Stats => self.refresh_stats(out).await?,
                Input::History => writeln!(out, "{}", view::render_history(&self.messages))?,
                Input::Help => writeln!(out, "{HELP}")?,
                Input::Quit => break,
                Input::Unknown(name) => writeln!(out, "unknown command /{name}, try /help")?,
            }
        }

        Ok(())
    }

    async fn send(&mut self, text: &str, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", view::TYPING_INDICATOR)?;
        out.flush()?;

        let result = self.client.send(text, self.selected_model.as_deref()).await;

        // erase the indicator line
        write!(out, "\r\x1b[2K")?;

        let messages = match result {
            Ok(messages) => messages,
            Err(err) => {
                writeln!(out, "! send failed: {err}")?;
                return Ok(());
            }
        };

        let last_day = self.messages.last().map(|m| m.created_at.date_naive());
        let appended = view::new_messages(&self.messages, &messages);
        if !appended.is_empty() {
            writeln!(out, "{}", view::render_appended(last_day, &appended))?;
        }
        self.messages = messages;

        match self.client.stats().await {
            Ok(stats) => self.stats = stats,
            Err(err) => writeln!(out, "! could not refresh stats: {err}")?,
        }

        Ok(())
    }

    async fn clear<R>(&mut self, lines: &mut Lines<R>, out: &mut impl Write) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        write!(out, "{CLEAR_PROMPT}")?;
        out.flush()?;

        let answer = lines.next_line().await?.unwrap_or_default();
        if !is_confirmation(&answer) {
            writeln!(out, "cancelled")?;
            return Ok(());
        }

        match self.client.clear().await {
            Ok(()) => {
                self.messages.clear();
                self.stats = Stats::default();
                writeln!(out, "Chat history cleared.")?;
            }
            Err(err) => writeln!(out, "! clear failed: {err}")?,
        }

        Ok(())
    }

    fn print_models(&self, out: &mut impl Write) -> Result<()> {
        if self.models.is_empty() {
            writeln!(out, "no models available")?;
        }
        for model in &self.models {
            let marker = if Some(model.id.as_str()) == self.selected_model() {
                "*"
            } else {
                " "
            };
            writeln!(out, "{marker} {:<24} {}", model.id, model.name)?;
        }
        Ok(())
    }

    fn select_model(&mut self, id: &str, out: &mut impl Write) -> Result<()> {
        if self.models.iter().any(|m| m.id == id) {
            self.selected_model = Some(id.to_string());
            writeln!(out, "model: {id}")?;
        } else {
            writeln!(out, "unknown model '{id}', see /models")?;
        }
        Ok(())
    }

    async fn refresh_stats(&mut self, out: &mut impl Write) -> Result<()> {
        match self.client.stats().await {
            Ok(stats) => self.stats = stats,
            Err(err) => writeln!(out, "! could not refresh stats: {err}")?,
        }
        writeln!(out, "{}", view::format_stats(&self.stats))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("   "), Input::Blank);
        assert_eq!(Input::parse("\u{FEFF}"), Input::Blank);
        assert_eq!(Input::parse("  hello there "), Input::Send("hello there".to_string()));
        assert_eq!(Input::parse("/clear"), Input::Clear);
        assert_eq!(
            Input::parse("/model gemma-7b-it"),
            Input::Model(Some("gemma-7b-it".to_string()))
        );
        assert_eq!(Input::parse("/model"), Input::Model(None));
        assert_eq!(Input::parse("/quit"), Input::Quit);
        assert_eq!(Input::parse("/nope"), Input::Unknown("nope".to_string()));
    }

    #[test]
    fn test_confirmation() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" YES\n"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }
}
