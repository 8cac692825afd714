use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "cbom_assembler";

/// How much the binary reports on stderr; stdout carries JSON only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, 2) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    fn level_name(self) -> &'static str {
        match self {
            Self::Quiet => "off",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Directive applied when `RUST_LOG` is unset. Dependencies stay at
    /// warn so walkdir and friends do not drown the crate's own output.
    fn directive(self) -> String {
        if self > Verbosity::Normal {
            format!("warn,{CRATE_TARGET}={}", self.level_name())
        } else {
            self.level_name().to_string()
        }
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    if verbosity == Verbosity::Quiet {
        return EnvFilter::new(verbosity.directive());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Installs the global subscriber for the binary. The library only emits
/// events and never calls this.
pub fn init(verbosity: Verbosity) {
    let stderr = std::io::stderr();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_ansi(stderr.is_terminal())
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Trace)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    if verbosity <= Verbosity::Normal {
        builder.without_time().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(5, false), Verbosity::Trace);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_default_directive_is_global_warn() {
        assert_eq!(Verbosity::Normal.directive(), "warn");
    }

    #[test]
    fn test_verbose_directive_scopes_crate() {
        assert_eq!(Verbosity::Verbose.directive(), "warn,cbom_assembler=info");
        assert_eq!(Verbosity::Trace.directive(), "warn,cbom_assembler=trace");
    }

    #[test]
    fn test_quiet_disables_everything() {
        assert_eq!(Verbosity::Quiet.directive(), "off");
    }
}
