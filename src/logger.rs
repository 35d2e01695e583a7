use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
	let default_filter = if verbose { "folio=debug,info" } else { "folio=info" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_target(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.init();
}
