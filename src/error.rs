use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred while writing the document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse an embedded font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the header image
    Image(#[from] image::ImageError),

    #[error("required field `{0}` is missing")]
    /// The debtor record lacks data the layout cannot do without. Reported before
    /// anything is drawn.
    MissingField(&'static str),

    #[error("invalid input: {0}")]
    /// The debtor record holds a value the layout cannot render
    InvalidInput(String),

    #[error("page missing from document")]
    /// A page id in the page order does not resolve to a page
    PageMissing,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
