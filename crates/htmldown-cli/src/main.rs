//! Command line front end: fetch or read HTML, convert, write Markdown.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Convert an HTML page or file to Markdown.
#[derive(Parser, Debug)]
#[command(name = "htmldown", version, about)]
struct Cli {
    /// URL or path of the HTML document to convert
    #[arg(short, long)]
    input: String,

    /// Path of the Markdown file to write
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{0}")]
    File(String),

    #[error(transparent)]
    Parse(#[from] htmldown::HtmldownError),
}

fn is_url(input: &str) -> bool {
    match reqwest::Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn fetch_url(url: &str) -> Result<String, CliError> {
    let fetch_err = |reason: String| CliError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("server returned {status}")));
    }

    response.text().map_err(|e| fetch_err(e.to_string()))
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::File(format!("failed to read {path}: {e}")))
}

fn write_output(path: &Path, markdown: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::File(format!(
                    "failed to create {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    fs::write(path, markdown)
        .map_err(|e| CliError::File(format!("failed to write {}: {e}", path.display())))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let html = if is_url(&cli.input) {
        fetch_url(&cli.input)?
    } else {
        read_file(&cli.input)?
    };

    let markdown = htmldown::convert_html(&html)?;
    write_output(&cli.output, &markdown)?;

    println!("Converted {} -> {}", cli.input, cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/page"));
        assert!(is_url("http://localhost:8080/"));
        assert!(!is_url("page.html"));
        assert!(!is_url("./dir/page.html"));
        assert!(!is_url("ftp://example.com/page"));
        assert!(!is_url("C:\\pages\\page.html"));
    }
}
