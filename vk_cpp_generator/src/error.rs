//! Error type shared by the crawler, the model builder and the renderer.

use std::{fmt, io};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] xml::reader::Error),

    /// The registry XML is well formed but does not have the expected structure.
    #[error("invalid registry: {0}")]
    Registry(String),

    /// A type suffix such as `[` or `[x]` that cannot be turned into a descriptor.
    #[error("malformed type descriptor `{extra}` for `{name}`: {reason}")]
    MalformedDescriptor {
        name: String,
        extra: String,
        reason: &'static str
    },

    #[error("circular dependency between records: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),

    #[error("formatting error")]
    Fmt(#[from] fmt::Error)
}

impl Error {
    /// Name of the pipeline stage that produced the error, used by the command line front end.
    pub fn stage(&self) -> &'static str {
        match *self {
            Error::Io(_)                     => "reading",
            Error::Xml(_)                     |
            Error::Registry(_)               => "parsing",
            Error::MalformedDescriptor{..}   => "analysis",
            Error::CyclicDependency(_)       => "sorting",
            Error::Fmt(_)                    => "rendering"
        }
    }

    pub(crate) fn registry<S: Into<String>>(msg: S) -> Error {
        Error::Registry(msg.into())
    }
}
