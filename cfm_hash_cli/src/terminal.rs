//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY but should get plain output
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Whether colored output should be emitted
pub fn use_color(configured: bool) -> bool {
    configured && is_interactive() && env::var_os("NO_COLOR").is_none() && supports_ansi()
}

fn supports_ansi() -> bool {
    let term = env::var("TERM").unwrap_or_default();
    if cfg!(windows) {
        return term != "dumb";
    }
    !(term == "dumb" || term.is_empty())
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}
