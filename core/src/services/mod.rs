//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use token::{SessionTokenService, TokenServiceConfig};
pub use verification::{
    CodeGenerator, DeliveryGateway, ExpiredCodeSweeper, IssuedCode, MessageKind,
    OutboundMessage, RandomCodeGenerator, SweeperConfig, VerificationService,
    VerificationServiceConfig,
};
