use log::{debug, info, LevelFilter};
use std::path::Path;
use std::process;
use std::str::FromStr;

use vsm_diagram::adapters::outbound::console::StderrProgressReporter;
use vsm_diagram::adapters::outbound::filesystem::{
    FileSystemWriter, ResponseFileReader, StdoutPresenter,
};
use vsm_diagram::adapters::outbound::network::{
    build_http_client, platform_base_url, EamBookmarkClient, MtmTokenProvider, VsmGraphQlClient,
};
use vsm_diagram::application::dto::{DiagramOutcome, DiagramResponse};
use vsm_diagram::application::use_cases::GenerateDiagramUseCase;
use vsm_diagram::cli::{Args, OutputTarget};
use vsm_diagram::config::{self, ConfigFile, Settings};
use vsm_diagram::ports::inbound::DiagramGenerationPort;
use vsm_diagram::ports::outbound::OutputPresenter;
use vsm_diagram::shared::error::ExitCode;
use vsm_diagram::shared::Result;

fn main() {
    let args = Args::parse_args();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut settings = Settings::resolve(config, args.product_name.clone(), |name| {
        std::env::var(name).ok()
    })?;
    settings.dry_run |= args.is_dry_run();
    info!(product = settings.product_name.as_str(), dry_run = settings.dry_run; "Starting vsm-diagram");

    let response = generate(&args, &settings)?;
    report_outcome(&response);

    if let (Some(target), Some(document)) = (args.output_target(), response.document.as_deref()) {
        let presenter: Box<dyn OutputPresenter> = match target {
            OutputTarget::Stdout => Box::new(StdoutPresenter::new()),
            OutputTarget::File(path) => Box::new(FileSystemWriter::new(path)),
        };
        presenter.present(document)?;
    }

    Ok(())
}

/// Explicit `--config`, else `vsm-diagram.config.yml` in the working directory
fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = path {
        return config::load_config_from_path(path);
    }
    let discovered = config::discover_config(Path::new("."))?;
    if discovered.is_none() {
        debug!("No {} found, relying on CLI arguments", config::CONFIG_FILENAME);
    }
    Ok(discovered.unwrap_or_default())
}

/// Wires the adapters (Dependency Injection) and runs the use case
fn generate(args: &Args, settings: &Settings) -> Result<DiagramResponse> {
    let request = settings.to_request();
    let progress_reporter = StderrProgressReporter::new();

    if let Some(input) = &args.input {
        info!(input:? = input; "Reading saved VSM response");
        let use_case = GenerateDiagramUseCase::new(
            ResponseFileReader::new(input.clone()),
            None::<EamBookmarkClient<MtmTokenProvider>>,
            progress_reporter,
        );
        return use_case.generate_diagram(request);
    }

    let base_url = platform_base_url(&settings.hostname)?;
    let client = build_http_client()?;
    let vsm_tokens =
        MtmTokenProvider::new(client.clone(), &base_url, settings.vsm_api_token.clone());
    let eam_tokens =
        MtmTokenProvider::new(client.clone(), &base_url, settings.eam_api_token.clone());

    let use_case = GenerateDiagramUseCase::new(
        VsmGraphQlClient::new(client.clone(), &base_url, vsm_tokens),
        Some(EamBookmarkClient::new(
            client,
            &base_url,
            &settings.eam_workspace,
            eam_tokens,
        )),
        progress_reporter,
    );
    use_case.generate_diagram(request)
}

fn report_outcome(response: &DiagramResponse) {
    match &response.outcome {
        DiagramOutcome::UpToDate => {
            info!(content_hash = response.content_hash.as_str(); "Published diagram is up to date")
        }
        DiagramOutcome::DryRun => {
            info!(content_hash = response.content_hash.as_str(); "Dry run finished")
        }
        DiagramOutcome::Published { url } => {
            eprintln!("🔗 {}", url);
            info!(url = url.as_str(), content_hash = response.content_hash.as_str(); "Diagram published")
        }
    }
}
