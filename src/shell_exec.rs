//! External command execution.
//!
//! Every process git-profile spawns (in practice, `git config`) goes through
//! [`run`], so all of them get the same debug logging and timing trace.

use std::process::{Command, Output};
use std::time::Instant;

/// Render a command as a single display string (`git config --local user.name Ada`).
pub fn command_string(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command with timing and debug logging.
///
/// ```text
/// $ git config --local user.name Ada [my-repo]
/// [gp-trace] context=my-repo cmd="..." dur=3.1ms ok=true
/// ```
///
/// The `context` parameter is typically the repository directory name.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let cmd_str = command_string(cmd);

    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let ctx = context.map(|c| format!("context={c} ")).unwrap_or_default();
    match &result {
        Ok(output) => log::debug!(
            "[gp-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            ctx,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[gp-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            ctx,
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}
