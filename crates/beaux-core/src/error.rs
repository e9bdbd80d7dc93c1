pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("unknown connection: {0}")]
    UnknownConnection(String),

    #[error("a connection cannot target its own source")]
    SelfConnection,

    #[error("unknown document: {0}")]
    UnknownDocument(String),

    #[error("invalid diagram JSON: {0}")]
    Import(String),

    #[error("mermaid parse error: {0}")]
    MermaidParse(String),

    #[error("preview failed: {0}")]
    Preview(String),

    #[error("an API key is required before a generation request can be made")]
    MissingCredential,

    #[error("generation failed: {0}")]
    Generation(String),
}
