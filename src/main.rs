use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, error};

use aigen::{
  EngineConfig, EnvSecretResolver, KeystoreFileResolver, Outcome,
  RequestResponseEngine, RequestSpec, SecretResolver
};

/// Send a prompt to an OpenAI chat-completion endpoint
#[derive(Debug, Parser)]
#[command(name = "aigen", version)]
struct Cli
{   /// Prompt text
    prompt: String
  , /// API endpoint, defaults to AI_ENDPOINT
    #[arg(long, default_value = "")]
    endpoint: String
  , /// Model, defaults to AI_MODEL
    #[arg(long, default_value = "")]
    model: String
  , /// Secret holding the API key
    #[arg(long, default_value = "")]
    secret: String
  , /// JSON object merged into the request payload
    #[arg(long, default_value = "")]
    params: String
  , /// Print the request instead of sending it
    #[arg(long)]
    dry_run: bool
  , /// JSON config file instead of AI_* environment variables
    #[arg(long)]
    config: Option<PathBuf>
  , /// JSON keystore of secret name -> key
    #[arg(long, env = "AI_KEYSTORE")]
    keystore: Option<PathBuf>
}

#[tokio::main]
async fn main() -> ExitCode
{   env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config
    {   Some(path) => EngineConfig::from_file(path)
      , None => EngineConfig::from_env()
    };
    let config = match config
    {   Ok(c) => c
      , Err(e) => {
          error!("{}", e);
          return ExitCode::FAILURE;
        }
    };

    let outcome = match &cli.keystore
    {   Some(path) => match KeystoreFileResolver::open(path)
        {   Ok(keystore) => run(&cli, config, keystore).await
          , Err(e) => Outcome::from(e)
        }
      , None => run(&cli, config, EnvSecretResolver).await
    };

    println!("{}", outcome);
    if outcome.is_error()
    {   ExitCode::FAILURE
    } else
    {   ExitCode::SUCCESS
    }
}

async fn run<S: SecretResolver>(
  cli: &Cli
, config: EngineConfig
, secrets: S
) -> Outcome
{   let config = match config.resolve_api_key(&secrets)
    {   Ok(c) => c
      , Err(e) => return Outcome::from(e)
    };
    debug!("Starting with timeout {:?}", config.connection_timeout());

    let engine = RequestResponseEngine::new(
      config
    , aigen::HttpTransport::new()
    , secrets
    );
    let spec = RequestSpec::new(cli.prompt.clone())
      .endpoint(cli.endpoint.clone())
      .model(cli.model.clone())
      .credential_reference(cli.secret.clone())
      .overrides(cli.params.clone())
      .dry_run(cli.dry_run);
    engine.generate(&spec).await
}
