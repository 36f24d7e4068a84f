pub mod error;
pub mod config;
pub mod credentials;
pub mod providers;
pub mod request;
pub mod payload;
pub mod validate;
pub mod transport;
pub mod engine;

/*

aigen: send a prompt to an OpenAI style chat-completion endpoint
and get back plain text, or one fixed error string. one request
dialect, one response dialect, one attempt per call.

aigen/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and crate layout
│   ├── main.rs         # Command line host
│   ├── error.rs        # Error taxonomy and its literal strings
│   ├── config.rs       # Engine configuration (env, file)
│   ├── credentials.rs  # Secret name -> bearer token
│   ├── request.rs      # RequestSpec and Outcome
│   ├── validate.rs     # Endpoint and prompt checks
│   ├── payload.rs      # Canonical payload and overrides merge
│   ├── transport.rs    # HTTP transport, send / dry-run dispatch
│   ├── engine.rs       # The pipeline
│   └── providers/
│       ├── mod.rs
│       └── openai.rs   # Chat-completion message + response walk
└── tests/

pipeline:
  validate endpoint -> validate prompt -> build payload
  -> resolve credential -> dispatch (send | dry run) -> parse

*/

pub use config::EngineConfig;
pub use credentials::{
  EnvSecretResolver, KeystoreFileResolver, SecretResolver, StaticSecretResolver
};
pub use engine::RequestResponseEngine;
pub use error::Error;
pub use request::{Outcome, RequestSpec};
pub use transport::{HttpTransport, PostRequest, Transport};
