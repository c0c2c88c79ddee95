use clap::Parser;
use ucsm_cli::cli::Cli;
use ucsm_cli::output::{self, CommandResult, OutputFormat, Payload, ResultBuilder};
use ucsm_cli::{commands, logging};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);
	let format = cli.format;
	let builder = ResultBuilder::new(cli.command.name());
	let outcome = match commands::dispatch(cli).await {
		Ok(data) => output::print_result(&builder.data(data).build(), format),
		Err(err) => {
			if format == OutputFormat::Json {
				let result: CommandResult<Payload> = builder.failure(err.to_command_error()).build();
				if let Err(print_err) = output::print_json(&result) {
					tracing::warn!(error = %print_err, "Failed to write result envelope");
				}
			}
			Err(err)
		}
	};
	if let Err(err) = outcome {
		output::print_error_stderr(&err.to_command_error());
		std::process::exit(err.exit_code());
	}
}
