//! `tracing` subscriber setup.
//!
//! The library crates only emit events through `tracing`; installing a
//! subscriber is left to the binary. These helpers cover the common case.
//!
//! ```rust,no_run
//! switchwire_support::logging::init("switchwire=debug");
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit directive is given.
pub const DEFAULT_FILTER: &str = "switchwire=info";

/// Installs a global `fmt` subscriber writing to stdout.
///
/// `RUST_LOG` takes precedence over `directives` when set.
///
/// # Panics
/// Panics if a global subscriber is already installed. Use [`try_init`]
/// where that can happen (tests).
pub fn init(directives: &str) {
    if !install(directives, false) {
        panic!("a global tracing subscriber is already installed");
    }
}

/// Installs a global `fmt` subscriber for tests, returning `false` if one
/// exists.
///
/// Output goes through the test writer so `cargo test` captures it.
pub fn try_init(directives: &str) -> bool {
    install(directives, true)
}

fn install(directives: &str, test_writer: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_target(true);
    let installed = if test_writer {
        builder.with_test_writer().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if installed {
        tracing::debug!(directives, test_writer, "Logging initialized ✓");
    }
    installed
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = if directives.is_empty() { DEFAULT_FILTER } else { directives };
        EnvFilter::new(directives)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let _ = try_init("switchwire=trace");
        assert!(!try_init("switchwire=trace"));
    }

    #[test]
    #[should_panic(expected = "already installed")]
    fn init_refuses_second_subscriber() {
        let _ = try_init("switchwire=trace");
        init("switchwire=info");
    }
}
