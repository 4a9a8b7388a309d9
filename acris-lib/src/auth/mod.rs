//! App token authentication

mod token;

pub use token::AppToken;
pub use token::EnvTokenProvider;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
pub use token::APP_TOKEN_VAR;
