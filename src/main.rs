use clap::Parser;
use plonk_server::catalog::{curation, Catalog};
use plonk_server::cli::{AnnotateArgs, Args, Command, ServeArgs};
use plonk_server::geocoding::{NearestPlaceGeocoder, ReverseGeocoder};
use plonk_server::{app_context, http::router, logging};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

const EVICTION_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_filter);
    match args.command {
        Some(Command::Annotate(annotate_args)) => annotate(&annotate_args),
        None => serve(&args.serve).await,
    }
}

async fn serve(args: &ServeArgs) -> ExitCode {
    let catalog = match Catalog::load(&args.catalog) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load the round catalog.");
            return ExitCode::FAILURE;
        }
    };
    let geocoder: Arc<dyn ReverseGeocoder> = match &args.places {
        Some(places) => match NearestPlaceGeocoder::load(places) {
            Ok(geocoder) => Arc::new(geocoder),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load places.");
                return ExitCode::FAILURE;
            }
        },
        None => {
            tracing::warn!("No places given, accuracy will not be reported.");
            Arc::new(NearestPlaceGeocoder::new(Vec::new()))
        }
    };
    let app_context = app_context::init(
        catalog,
        geocoder,
        args.results_dir.clone(),
        args.rounds.map(|rounds| rounds as usize),
    );
    app_context
        .sessions
        .spawn_eviction(Duration::from_secs(args.session_ttl_secs), EVICTION_PERIOD);
    let app = router::new(args, app_context);

    let listener = match tokio::net::TcpListener::bind(args.listen_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = ?err, address = %args.listen_address, "Failed to bind.");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(address = %args.listen_address, "Listening.");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = ?err, "Server stopped.");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn annotate(args: &AnnotateArgs) -> ExitCode {
    let mut catalog = match Catalog::load(&args.input) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load the input catalog.");
            return ExitCode::FAILURE;
        }
    };
    if let Some(images) = &args.images {
        catalog.retain_existing_images(images);
    }
    if let Some(count) = args.sample {
        catalog = catalog.sample(count, &mut rand::thread_rng());
    }
    let geocoder = match NearestPlaceGeocoder::load(&args.places) {
        Ok(geocoder) => geocoder,
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load places.");
            return ExitCode::FAILURE;
        }
    };
    curation::annotate(&mut catalog, &geocoder);
    if let Err(err) = catalog.write(&args.output) {
        tracing::error!(error = ?err, "Failed to write the annotated catalog.");
        return ExitCode::FAILURE;
    }
    tracing::info!(output = %args.output.display(), rounds_count = catalog.len(), "Done.");
    ExitCode::SUCCESS
}
