// Runs netsh and streams its output into the route parser

use std::io::BufReader;
use std::process::{Command, Stdio};

use super::RouteRecord;
use super::parser::parse_routes;
use super::source::ReaderLines;
use crate::error::{AppError, AppResult};

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub const NETSH_PROGRAM: &str = "netsh";
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub const NETSH_ARGS: [&str; 5] = ["interface", "ipv6", "show", "route", "verbose"];

/// Read the live IPv6 routing table
pub fn fetch_routes() -> AppResult<Vec<RouteRecord>> {
    #[cfg(target_os = "windows")]
    return run_and_parse(NETSH_PROGRAM, &NETSH_ARGS);

    #[cfg(not(target_os = "windows"))]
    return Err(AppError::UnsupportedPlatform(std::env::consts::OS.to_string()));
}

/// Spawn `program` and parse its stdout while it runs.
///
/// stdout is consumed before waiting on the child so a full pipe can't stall it.
/// stderr is inherited and the exit status is only logged.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub fn run_and_parse(program: &str, args: &[&str]) -> AppResult<Vec<RouteRecord>> {
    tracing::info!("Executing {} {}", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::CommandExecution(format!("{}: {}", program, e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::CommandExecution(format!("{}: stdout not captured", program)))?;

    let routes = match parse_routes(&mut ReaderLines::new(BufReader::new(stdout))) {
        Ok(routes) => routes,
        Err(e) => {
            // Nothing reads the pipe any more; don't leave the child blocked on it
            if let Err(kill_err) = child.kill() {
                tracing::debug!("Failed to kill {}: {}", program, kill_err);
            }
            if let Err(wait_err) = child.wait() {
                tracing::debug!("Failed to reap {}: {}", program, wait_err);
            }
            return Err(e);
        }
    };

    let status = child.wait()?;
    tracing::debug!("{} exited with {}", program, status);

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netsh_command_line() {
        assert_eq!(
            format!("{} {}", NETSH_PROGRAM, NETSH_ARGS.join(" ")),
            "netsh interface ipv6 show route verbose"
        );
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_fetch_routes_unsupported_off_windows() {
        assert!(matches!(
            fetch_routes(),
            Err(AppError::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn test_missing_program() {
        let result = run_and_parse("definitely-not-a-real-netsh", &[]);
        assert!(matches!(result, Err(AppError::CommandExecution(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_streams_child_output() {
        let script = "printf 'Destination Prefix: fe80::/64\\nGateway/Interface Name: eth0\\n\\n\\n\
                      Destination Prefix: ::/0\\nGateway/Interface Name: fe80::1\\n'";
        let routes = run_and_parse("sh", &["-c", script]).unwrap();

        let rendered: Vec<String> = routes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["fe80::/64 via eth0", "::/0 via fe80::1"]);
    }

    #[test]
    #[cfg(unix)]
    fn test_parse_error_stops_child() {
        // `yes` never exits on its own; the parse error must kill it
        let result = run_and_parse("yes", &["Metric: nope"]);
        assert!(matches!(result, Err(AppError::RouteParse { line: 1, .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_status_is_not_inspected() {
        let routes = run_and_parse("sh", &["-c", "printf 'Metric: 7\\n'; exit 3"]).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].metric, Some(7));
    }
}
