//! Terminal preferences resolved once per process from flags and environment.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower terminals fall back to unbounded tables.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

/// What the process can observe about its terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal<'a> {
    pub stdout_tty: bool,
    pub stderr_tty: bool,
    pub no_color: bool,
    pub columns: Option<&'a str>,
}

impl UiPrefs {
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, term: Terminal<'_>) -> Self {
        let tabular = flags.format == OutputFormat::Table;
        let table_color = tabular
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => term.stdout_tty && !flags.quiet && !term.no_color,
            };

        Self {
            table_color,
            progress: term.stderr_tty && !flags.quiet && flags.format != OutputFormat::Json,
            term_width: term
                .columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let term = Terminal {
        stdout_tty: std::io::stdout().is_terminal(),
        stderr_tty: std::io::stderr().is_terminal(),
        no_color: std::env::var_os("NO_COLOR").is_some(),
        columns: columns.as_deref(),
    };
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, term));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
