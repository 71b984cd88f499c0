mod openai_vision_client;

pub use openai_vision_client::{DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT, OpenAiVisionClient};
