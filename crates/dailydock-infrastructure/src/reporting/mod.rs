use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use dailydock_domain::reporting::RunReporter;

type SharedWriter = Mutex<Box<dyn Write + Send>>;

const BANNER_WIDTH: usize = 50;

/// GitHub Actions workflow commands (`::group::`, `::notice::`, ...)
pub struct ActionsReporter {
    out: SharedWriter,
}

impl ActionsReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn command(&self, line: String) {
        write_line(&self.out, &line);
    }
}

impl Default for ActionsReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReporter for ActionsReporter {
    fn group(&self, title: &str) {
        self.command(format!("::group::{}", escape_data(title)));
    }

    fn end_group(&self) {
        self.command("::endgroup::".to_string());
    }

    fn notice(&self, title: &str, message: &str) {
        let line = if title.is_empty() {
            format!("::notice::{}", escape_data(message))
        } else {
            format!(
                "::notice title={}::{}",
                escape_property(title),
                escape_data(message)
            )
        };
        self.command(line);
    }

    fn warning(&self, message: &str) {
        self.command(format!("::warning::{}", escape_data(message)));
    }

    fn error(&self, message: &str) {
        self.command(format!("::error::{}", escape_data(message)));
    }

    fn debug(&self, message: &str) {
        self.command(format!("::debug::{}", escape_data(message)));
    }

    fn print(&self, text: &str) {
        write_line(&self.out, text);
    }
}

/// Plain terminal framing with banners and emoji prefixes
pub struct ConsoleReporter {
    out: SharedWriter,
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), verbose)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, verbose: bool) -> Self {
        Self {
            out: Mutex::new(out),
            verbose,
        }
    }
}

impl RunReporter for ConsoleReporter {
    fn group(&self, title: &str) {
        let banner = "=".repeat(BANNER_WIDTH);
        write_line(&self.out, &format!("\n{banner}\n{title}\n{banner}"));
    }

    fn end_group(&self) {
        write_line(&self.out, &"=".repeat(BANNER_WIDTH));
    }

    fn notice(&self, title: &str, message: &str) {
        let line = if title.is_empty() {
            format!("ℹ️  {message}")
        } else {
            format!("ℹ️  [{title}] {message}")
        };
        write_line(&self.out, &line);
    }

    fn warning(&self, message: &str) {
        write_line(&self.out, &format!("⚠️  {message}"));
    }

    fn error(&self, message: &str) {
        write_line(&self.out, &format!("❌ {message}"));
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            write_line(&self.out, &format!("🐛 {message}"));
        }
    }

    fn print(&self, text: &str) {
        write_line(&self.out, text);
    }
}

/// Actions framing when running inside a workflow, console otherwise
pub fn create_reporter(github_actions: bool, verbose: bool) -> Arc<dyn RunReporter> {
    if github_actions {
        Arc::new(ActionsReporter::new())
    } else {
        Arc::new(ConsoleReporter::new(verbose))
    }
}

// Output is best effort; a closed stdout must not abort the run.
fn write_line(out: &SharedWriter, line: &str) {
    if let Ok(mut out) = out.lock() {
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
