pub mod gateway;

pub use gateway::{ChatRole, ChatTurn, GatewayError, GenerativeGateway, GroundedAnswer, SourceLink};
