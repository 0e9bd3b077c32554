//! Presentation boundary for the switcher list.
//!
//! Rendering is a collaborator, not part of the core: the daemon only ever
//! calls this trait. The shipped implementation prints the list to stderr;
//! a graphical frontend can implement the same trait.

use crate::window_list::WindowRecord;

pub trait Presenter {
    /// Present the full window list with the given highlighted entry.
    fn show(&mut self, windows: &[WindowRecord], selected: Option<usize>);

    /// Move the highlight to a new entry.
    fn update_selection(&mut self, selected: usize);

    /// Tear the presentation down after activation.
    fn close(&mut self);
}

/// Text renderer writing the switcher list to stderr.
pub struct TextPresenter {
    rows: Vec<String>,
}

impl TextPresenter {
    pub fn new() -> Self {
        TextPresenter { rows: Vec::new() }
    }

    fn print(&self, selected: Option<usize>) {
        eprintln!("\n=== Window Switcher ===");
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if Some(i) == selected { ">>>" } else { "   " };
            eprintln!("{} {}", marker, row);
        }
        eprintln!("=======================\n");
    }
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TextPresenter {
    fn show(&mut self, windows: &[WindowRecord], selected: Option<usize>) {
        self.rows = windows.iter().map(WindowRecord::label).collect();
        self.print(selected);
    }

    fn update_selection(&mut self, selected: usize) {
        self.print(Some(selected));
    }

    fn close(&mut self) {
        self.rows.clear();
    }
}
