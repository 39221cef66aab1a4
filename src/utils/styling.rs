//! Terminal styling carried as an explicit configuration value

use std::io::Write;

use console::{Emoji, StyledObject};

// Emoji icons with fallbacks for terminals that don't support them
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
pub static HAND: Emoji<'_, '_> = Emoji("👋 ", "");

/// Presentation settings for everything the import pipeline prints.
///
/// Constructed once in `main` and passed by reference into the
/// components that render output, instead of living in process-wide
/// mutable state.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    colors: bool,
}

impl Styler {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn styled<D>(&self, value: D) -> StyledObject<D> {
        let styled = console::style(value);
        if self.colors {
            styled
        } else {
            styled.force_styling(false)
        }
    }

    /// Phase-enter line, e.g. "downloading acme".
    pub fn phase(&self, label: &str) {
        println!(
            "{} {}",
            self.styled("▸").cyan().bold(),
            self.styled(label).cyan()
        );
    }

    /// One collapsed unit of download progress.
    pub fn tick(&self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    /// Announce the selected dump before the real run starts.
    pub fn announce(&self, client: &str, relative_label: &str) {
        println!(
            "{}Importing {} {}",
            PACKAGE,
            self.styled(client).magenta().bold(),
            self.styled(format!("({})", relative_label)).dim()
        );
    }

    /// Informational fallback notice; the run continues.
    pub fn warn(&self, message: &str) {
        eprintln!(
            "{} {}",
            self.styled("!").yellow().bold(),
            self.styled(message).yellow()
        );
    }

    /// A surfaced critical error line from the import narration.
    pub fn error_line(&self, message: &str) {
        eprintln!(
            "{} {}",
            self.styled("✗").red().bold(),
            self.styled(message).red()
        );
    }

    /// Distinct cancellation notice.
    pub fn cancelled(&self, message: &str) {
        println!("{}{}", HAND, self.styled(message).dim());
    }

    /// Run epilogue on success.
    pub fn success(&self, message: &str) {
        println!(
            "{} {}",
            self.styled("✓").green().bold(),
            self.styled(message).green()
        );
    }

    /// Run epilogue on failure.
    pub fn failure(&self, message: &str) {
        eprintln!(
            "{} {}",
            self.styled("✗").red().bold(),
            self.styled(message).red().bold()
        );
    }
}
