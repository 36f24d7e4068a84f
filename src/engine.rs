use log::{debug, error};

use crate::config::EngineConfig;
use crate::credentials::{EnvSecretResolver, SecretResolver};
use crate::error::Error;
use crate::payload::build_payload;
use crate::providers::openai::parse_chat_completion;
use crate::request::{Outcome, RequestSpec};
use crate::transport::{
  Delivery, Dispatch, HeaderSet, HttpTransport, PostRequest, Transport
};
use crate::validate::{validate_endpoint, validate_prompt};

/// Turns a prompt into a chat-completion call and the response back
/// into text.
///
/// Holds only read-only state, so one engine can serve concurrent calls.
pub struct RequestResponseEngine<T = HttpTransport, S = EnvSecretResolver>
{   config: EngineConfig
  , transport: T
  , secrets: S
}

impl RequestResponseEngine
{   /// Engine over reqwest, resolving secrets from the environment
    pub fn from_config(config: EngineConfig) -> Self
    {   RequestResponseEngine::new(
          config
        , HttpTransport::new()
        , EnvSecretResolver
        )
    }
}

impl<T, S> RequestResponseEngine<T, S>
where T: Transport
    , S: SecretResolver
{   pub fn new(config: EngineConfig, transport: T, secrets: S) -> Self
    {   debug!("Creating RequestResponseEngine");
        RequestResponseEngine
        {   config
          , transport
          , secrets
        }
    }

    pub fn config(&self) -> &EngineConfig
    {   &self.config
    }

    pub fn transport(&self) -> &T
    {   &self.transport
    }

    /// Run one request through validate, build, dispatch and parse
    pub async fn generate(&self, spec: &RequestSpec) -> Outcome
    {   match self.run(spec).await
        {   Ok(outcome) => outcome
          , Err(e) => {
              debug!("AI Generate Text failed: {}", e);
              Outcome::from(e)
            }
        }
    }

    /// Scalar form: empty strings take the configured defaults.
    /// Returns the generated text or an error string.
    pub async fn generate_text(
      &self
    , endpoint: &str
    , prompt: &str
    , model: &str
    , credential_reference: &str
    , overrides: &str
    ) -> String
    {   let spec = RequestSpec
        {   endpoint: Some(endpoint.to_string())
          , prompt: Some(prompt.to_string())
          , model: Some(model.to_string())
          , credential_reference: Some(credential_reference.to_string())
          , overrides: Some(overrides.to_string())
          , dry_run: false
        };
        self.generate(&spec).await.into_string()
    }

    /// Prompt only, everything else from the configuration
    pub async fn generate_text_default(&self, prompt: &str) -> String
    {   self.generate(&RequestSpec::new(prompt)).await.into_string()
    }

    async fn run(&self, spec: &RequestSpec) -> Result<Outcome, Error>
    {   let endpoint = validate_endpoint(
          non_empty(&spec.endpoint).unwrap_or("")
        , &self.config.endpoint
        , self.config.strict_host_check
        )?;
        let prompt = validate_prompt(spec.prompt.as_deref())?;
        let model = non_empty(&spec.model)
          .unwrap_or(&self.config.model);
        let body = build_payload(model, prompt, spec.overrides.as_deref())?;
        let headers = self.headers_for(non_empty(&spec.credential_reference))?;

        debug!(
          "AI Generate Text: endpoint: {} payload: {}",
          endpoint, body
        );

        let request = PostRequest
        {   endpoint
          , headers
          , body
        };
        let delivery = Dispatch::select(&self.transport, spec.dry_run)
          .dispatch(&request, self.config.connection_timeout())
          .await?;

        match delivery
        {   Delivery::Serialized(serialized) => {
              Ok(Outcome::SerializedRequest(serialized))
            }
          , Delivery::Response(raw) => {
              let text = parse_chat_completion(&raw)?;
              Ok(Outcome::ExtractedText(text))
            }
        }
    }

    /// Bearer token from the named secret, else the configured default
    fn headers_for(&self, credential_reference: Option<&str>)
      -> Result<HeaderSet, Error>
    {   match credential_reference
        {   Some(name) => {
              let token = self.secrets.resolve(name).map_err(|msg| {
                error!("Failed to resolve secret {}: {}", name, msg);
                Error::Credential(msg)
              })?;
              Ok(HeaderSet::with_bearer(&token))
            }
          , None => Ok(HeaderSet::with_bearer(self.config.default_api_key()))
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str>
{   value.as_deref().filter(|v| !v.is_empty())
}
