use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 沒設定時使用的過濾條件
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "pick_sheet=debug,info"
    } else {
        "pick_sheet=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 排程執行（cron / systemd）時輸出 JSON，方便收集到集中式 log
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_both_loggers() {
        assert_eq!(default_directives(false), "pick_sheet=info");
        assert_eq!(default_directives(true), "pick_sheet=debug,info");
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }
}
