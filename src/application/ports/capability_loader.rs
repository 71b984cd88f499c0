use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

/// External parsing capabilities that are loaded lazily, once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    PdfParser,
    DocumentConverter,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdfParser => "pdf parser",
            Self::DocumentConverter => "document converter",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knows how to bring one capability into the process.
///
/// `load` returns `Ok(None)` when the load mechanism itself succeeded but the
/// capability it was supposed to provide is not there.
#[async_trait]
pub trait CapabilityLoader<H: ?Sized + Send + Sync>: Send + Sync {
    fn capability(&self) -> Capability;

    async fn load(&self) -> Result<Option<Arc<H>>, String>;

    /// One-time setup run after a successful load, before the handle is cached.
    async fn configure(&self, _handle: &H) -> Result<(), String> {
        Ok(())
    }
}
