//! Line-oriented terminal front end.
//!
//! Plays the part of the browser tab: shows the current page's commands,
//! fills the page's inputs from prompted answers and triggers its actions.
//! Messages raised by controllers are queued by [`ConsoleNotifier`] and
//! written out after each command.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::ui::{Notifier, PageId, TextInput};

/// Collects user-facing messages until the terminal prints them.
#[derive(Clone, Default, Debug)]
pub struct ConsoleNotifier {
    pending: Arc<Mutex<Vec<String>>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

pub struct Terminal<R, W> {
    app: App,
    notifier: ConsoleNotifier,
    input: Lines<R>,
    output: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(app: App, notifier: ConsoleNotifier, input: R, output: W) -> Self {
        Self {
            app,
            notifier,
            input: input.lines(),
            output,
        }
    }

    /// Runs until `quit`, end of input, or cancellation.
    pub async fn run(&mut self, cancel: CancellationToken) -> std::io::Result<()> {
        self.enter_page().await?;

        loop {
            let prompt = format!("[{}]> ", self.app.current_page());
            self.write(&prompt).await?;

            let line = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Terminal cancelled");
                    break;
                }
                line = self.read_line() => line?,
            };
            let Some(line) = line else { break };

            let command = line.trim().to_lowercase();
            if command.is_empty() {
                continue;
            }
            if command == "quit" || command == "exit" {
                break;
            }

            let page_before = self.app.current_page();
            if !self.dispatch(&command).await? {
                break;
            }
            self.flush_messages().await?;

            if self.app.current_page() != page_before {
                self.enter_page().await?;
            } else if command != "help" {
                self.print_list().await?;
            }
        }

        self.output.flush().await
    }

    /// Executes one command. Returns false when input ran out mid-prompt.
    async fn dispatch(&mut self, command: &str) -> std::io::Result<bool> {
        let page = self.app.current_page();
        let result = match (page, command) {
            (_, "help") => {
                self.print_menu().await?;
                return Ok(true);
            }

            (PageId::Login, "login") => {
                let controls = self.app.login.controls().clone();
                if !self.prompt(&controls.username, "username").await?
                    || !self.prompt(&controls.password, "password").await?
                {
                    return Ok(false);
                }
                self.app.login.login().await
            }
            (PageId::Login, "register") => {
                self.app.navigate(PageId::Register);
                Ok(())
            }
            (PageId::Login, "logout") if self.app.login.controls().logout_button.is_visible() => {
                self.app.login.logout().await
            }

            (PageId::Register, "register") => {
                let controls = self.app.register.controls().clone();
                for (input, label) in [
                    (&controls.username, "username"),
                    (&controls.email, "email"),
                    (&controls.password, "password"),
                    (&controls.repeat_password, "repeat password"),
                ] {
                    if !self.prompt(input, label).await? {
                        return Ok(false);
                    }
                }
                self.app.register.register().await
            }
            (PageId::Register, "login") => {
                self.app.navigate(PageId::Login);
                Ok(())
            }

            (PageId::Recipes, "list") => self.app.recipes.load().await,
            (PageId::Recipes, "search") => {
                let input = self.app.recipes.controls().search.clone();
                if !self.prompt(&input, "name").await? {
                    return Ok(false);
                }
                self.app.recipes.search().await
            }
            (PageId::Recipes, "add") => {
                let controls = self.app.recipes.controls().clone();
                if !self.prompt(&controls.add_name, "name").await?
                    || !self.prompt(&controls.add_instructions, "instructions").await?
                {
                    return Ok(false);
                }
                self.app.recipes.add().await
            }
            (PageId::Recipes, "update") => {
                let controls = self.app.recipes.controls().clone();
                if !self.prompt(&controls.update_name, "name").await?
                    || !self
                        .prompt(&controls.update_instructions, "instructions")
                        .await?
                {
                    return Ok(false);
                }
                self.app.recipes.update().await
            }
            (PageId::Recipes, "delete") => {
                let input = self.app.recipes.controls().delete_name.clone();
                if !self.prompt(&input, "name").await? {
                    return Ok(false);
                }
                self.app.recipes.delete().await
            }
            (PageId::Recipes, "page") => {
                let input = self.app.recipes.controls().page.clone();
                if !self.prompt(&input, "page").await? {
                    return Ok(false);
                }
                self.app.recipes.show_page().await
            }
            (PageId::Recipes, "ingredients")
                if self.app.recipes.controls().admin_link.is_visible() =>
            {
                self.app.recipes.open_admin()
            }
            (PageId::Recipes, "logout")
                if self.app.recipes.controls().logout_button.is_visible() =>
            {
                self.app.recipes.logout().await
            }

            (PageId::Ingredients, "list") => self.app.ingredients.load().await,
            (PageId::Ingredients, "search") => {
                let input = self.app.ingredients.controls().search.clone();
                if !self.prompt(&input, "term").await? {
                    return Ok(false);
                }
                self.app.ingredients.search().await
            }
            (PageId::Ingredients, "add") => {
                let input = self.app.ingredients.controls().add_name.clone();
                if !self.prompt(&input, "name").await? {
                    return Ok(false);
                }
                self.app.ingredients.add().await
            }
            (PageId::Ingredients, "rename") => {
                let controls = self.app.ingredients.controls().clone();
                if !self.prompt(&controls.rename_name, "name").await?
                    || !self.prompt(&controls.rename_new_name, "new name").await?
                {
                    return Ok(false);
                }
                self.app.ingredients.rename().await
            }
            (PageId::Ingredients, "delete") => {
                let input = self.app.ingredients.controls().delete_name.clone();
                if !self.prompt(&input, "name").await? {
                    return Ok(false);
                }
                self.app.ingredients.delete().await
            }
            (PageId::Ingredients, "page") => {
                let input = self.app.ingredients.controls().page.clone();
                if !self.prompt(&input, "page").await? {
                    return Ok(false);
                }
                self.app.ingredients.show_page().await
            }
            (PageId::Ingredients, "recipes") => {
                self.app.ingredients.back_to_recipes();
                Ok(())
            }
            (PageId::Ingredients, "logout")
                if self.app.ingredients.controls().logout_button.is_visible() =>
            {
                self.app.ingredients.logout().await
            }

            _ => {
                self.write(&format!("Unknown command: {} (try help)\n", command))
                    .await?;
                return Ok(true);
            }
        };

        if let Err(e) = result {
            tracing::debug!("Command {} on {} page failed: {}", command, page, e);
        }
        Ok(true)
    }

    /// Next input line. Lines that are not valid UTF-8 are skipped.
    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            match self.input.next_line().await {
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::warn!("Ignoring unreadable input line: {}", e);
                }
                other => return other,
            }
        }
    }

    async fn prompt(&mut self, input: &TextInput, label: &str) -> std::io::Result<bool> {
        self.write(&format!("  {}: ", label)).await?;
        match self.read_line().await? {
            Some(answer) => {
                input.set_value(answer);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn enter_page(&mut self) -> std::io::Result<()> {
        if let Err(e) = self.app.enter().await {
            tracing::debug!("Loading {} page failed: {}", self.app.current_page(), e);
        }
        self.write(&format!("\n== {} ==\n", self.app.current_page()))
            .await?;
        self.print_menu().await?;
        self.flush_messages().await?;
        self.print_list().await
    }

    async fn print_menu(&mut self) -> std::io::Result<()> {
        let mut commands: Vec<&str> = match self.app.current_page() {
            PageId::Login => vec!["login", "register"],
            PageId::Register => vec!["register", "login"],
            PageId::Recipes => vec!["list", "search", "add", "update", "delete", "page"],
            PageId::Ingredients => {
                vec!["list", "search", "add", "rename", "delete", "page", "recipes"]
            }
        };

        match self.app.current_page() {
            PageId::Login if self.app.login.controls().logout_button.is_visible() => {
                commands.push("logout")
            }
            PageId::Recipes => {
                let controls = self.app.recipes.controls();
                if controls.admin_link.is_visible() {
                    commands.push("ingredients");
                }
                if controls.logout_button.is_visible() {
                    commands.push("logout");
                }
            }
            PageId::Ingredients if self.app.ingredients.controls().logout_button.is_visible() => {
                commands.push("logout")
            }
            _ => {}
        }
        commands.extend(["help", "quit"]);

        self.write(&format!("commands: {}\n", commands.join(", ")))
            .await
    }

    async fn print_list(&mut self) -> std::io::Result<()> {
        let rows = match self.app.current_page() {
            PageId::Recipes => self.app.recipes.controls().list.rows(),
            PageId::Ingredients => self.app.ingredients.controls().list.rows(),
            PageId::Login | PageId::Register => return Ok(()),
        };

        let mut text = String::new();
        for row in rows {
            text.push_str("  - ");
            text.push_str(&row);
            text.push('\n');
        }
        self.write(&text).await
    }

    async fn flush_messages(&mut self) -> std::io::Result<()> {
        for message in self.notifier.drain() {
            self.write(&format!("! {}\n", message)).await?;
        }
        Ok(())
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}
