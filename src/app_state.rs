//! The state machine bridging a navigation scope and the terminal.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user scrolls
//! and jumps around. The scope decides which section is active; this layer owns the viewport,
//! the navigation-bar selection, command input and status messages, and keeps the selection
//! following the active section as the reader scrolls.

use crate::config::Config;
use crate::error::NavError;
use crate::formats::markdown::MarkdownFormat;
use crate::input::{self, Page};
use crate::observe::ViewportObserver;
use crate::scope::NavScope;
use crate::section::{Section, SectionId};
use crate::snapshot::{NavSnapshot, SectionEntry};
use crate::viewport::Viewport;
use crate::watch::Subscriber;
use std::path::PathBuf;

#[derive(PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Navigation bar and document pane.
    Document,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(PartialEq, Eq, Debug)]
/// What the event loop should do after a command.
pub enum Outcome {
    /// Keep running.
    Continue,
    /// Leave the TUI.
    Quit,
}

/// Owns the navigation scope plus everything the terminal needs around it.
pub struct AppState {
    /// Document being navigated.
    pub path: PathBuf,
    /// Source lines, one per row.
    pub lines: Vec<String>,
    /// Sections listed in the navigation bar.
    pub sections: Vec<Section>,
    /// Registry, document and tracker for the page.
    pub scope: NavScope<ViewportObserver>,
    /// Visible slice of the document.
    pub viewport: Viewport,
    /// Active section updates.
    pub active: Subscriber<Option<SectionId>>,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Highlighted entry in the navigation bar.
    pub selected_section_index: usize,
    /// Accumulates command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    /// Mounts `page` into a fresh scope configured by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attention window is invalid or observation is unsupported.
    pub fn new(path: PathBuf, page: Page, cfg: &Config) -> Result<Self, NavError> {
        let window = cfg.attention_window()?;
        let mut scope = NavScope::new(ViewportObserver::new(), window, cfg.scroll_margin())?;
        let active = scope.mount_page(&page)?;
        let viewport = Viewport::new(0, page.rows(), cfg.scroll_ease);
        Ok(Self {
            path,
            lines: page.lines,
            sections: page.sections,
            scope,
            viewport,
            active,
            current_view: View::Document,
            selected_section_index: 0,
            command_buffer: String::new(),
            message: None,
        })
    }

    /// Re-reads the document from disk and remounts it.
    ///
    /// Sections keep their ids across the reload, so registrations are replaced in place and
    /// the active id survives until the next intersection batch says otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn reload(&mut self) -> Result<(), NavError> {
        let page = input::load_page(&self.path, &MarkdownFormat)?;
        self.active = self.scope.mount_page(&page)?;
        self.viewport.set_content_rows(page.rows());
        self.lines = page.lines;
        self.sections = page.sections;
        self.selected_section_index = self
            .selected_section_index
            .min(self.sections.len().saturating_sub(1));
        self.message = Some("Reloaded".to_string());
        Ok(())
    }

    /// Scrolls to the section a URL fragment names, reporting a miss in the status line.
    ///
    /// Bare input is read as a fragment, so a leading `section-` is stripped.
    pub fn goto(&mut self, fragment: &str) -> bool {
        let found = self.scope.deep_link(fragment, &mut self.viewport);
        self.report_miss(fragment, found)
    }

    /// Scrolls to the section with exactly this id, reporting a miss in the status line.
    pub fn goto_id(&mut self, id: &str) -> bool {
        let found = self.scope.scroll_to(id, &mut self.viewport);
        self.report_miss(id, found)
    }

    fn report_miss(&mut self, target: &str, found: bool) -> bool {
        if !found {
            self.message = Some(format!("No section matches '{target}'"));
        }
        found
    }

    /// Scrolls to the section highlighted in the navigation bar.
    pub fn activate_selected(&mut self) -> bool {
        let Some(section) = self.sections.get(self.selected_section_index) else {
            return false;
        };
        self.scope.scroll_to(section.id.as_str(), &mut self.viewport)
    }

    /// Moves the navigation-bar highlight down one entry.
    pub fn select_next(&mut self) {
        if self.selected_section_index + 1 < self.sections.len() {
            self.selected_section_index += 1;
        }
    }

    /// Moves the navigation-bar highlight up one entry.
    pub fn select_prev(&mut self) {
        self.selected_section_index = self.selected_section_index.saturating_sub(1);
    }

    #[must_use]
    /// Index of the active section in the navigation bar.
    pub fn active_section_index(&self) -> Option<usize> {
        let active = self.scope.active_id()?;
        self.sections.iter().position(|s| s.id == active)
    }

    /// Advances the smooth scroll and re-derives the active section.
    ///
    /// The navigation-bar highlight follows the active section whenever it changes. Returns
    /// whether anything visible changed.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the observation service.
    pub fn tick(&mut self) -> Result<bool, NavError> {
        let moved = self.viewport.tick();
        let changed = self.scope.sync(&self.viewport)?;
        if let Some(Some(id)) = self.active.changed() {
            if let Some(index) = self.sections.iter().position(|s| s.id == id) {
                self.selected_section_index = index;
            }
        }
        Ok(moved || changed)
    }

    /// Runs the command in the buffer and returns to the document view.
    ///
    /// `:q` quits, `:r` reloads, `:goto <id>` or `:#fragment` navigates.
    pub fn run_command(&mut self) -> Outcome {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.current_view = View::Document;
        self.message = None;

        match cmd.as_str() {
            "q" | "q!" => return Outcome::Quit,
            "r" | "reload" => {
                if let Err(e) = self.reload() {
                    self.message = Some(format!("Error reloading: {e}"));
                }
            }
            _ => {
                if let Some(target) = cmd.strip_prefix("goto ") {
                    self.goto_id(target.trim());
                } else if cmd.starts_with('#') {
                    self.goto(&cmd);
                } else {
                    self.message = Some(format!("Unknown command: {cmd}"));
                }
            }
        }
        Outcome::Continue
    }

    #[must_use]
    /// Serialisable summary of where the session ended.
    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            path: self.path.to_string_lossy().to_string(),
            active: self.scope.active_id(),
            offset: self.viewport.offset(),
            sections: self.sections.iter().map(SectionEntry::from).collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
