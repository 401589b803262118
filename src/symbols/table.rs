//! Memoizing symbol table keyed by absolute address.

use crate::utils::error::ResolveError;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// What an external lookup knows about one address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub symbol: Option<String>,

    /// `file:line` of the address, if the image has line info
    pub source_line: Option<String>,
}

impl Resolution {
    pub fn new(symbol: impl Into<String>, source_line: Option<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            source_line,
        }
    }
}

/// External debug-symbol lookup
///
/// `offset` is relative to the load base of `image`.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, image: &Path, offset: u64) -> Result<Resolution, ResolveError>;
}

/// Adapter turning a closure into a [`SymbolResolver`]
pub struct FnResolver<F>(pub F);

impl<F> FnResolver<F>
where
    F: Fn(&Path, u64) -> Result<Resolution, ResolveError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> SymbolResolver for FnResolver<F>
where
    F: Fn(&Path, u64) -> Result<Resolution, ResolveError> + Send + Sync,
{
    fn resolve(&self, image: &Path, offset: u64) -> Result<Resolution, ResolveError> {
        (self.0)(image, offset)
    }
}

/// Process-scoped cache of address lookups for one debug image
///
/// Each distinct address reaches the resolver at most once. The cache lock
/// is held across the external call, so a table shared between threads
/// still resolves every address exactly once.
pub struct SymbolTable {
    image: PathBuf,
    base: u64,
    resolver: Box<dyn SymbolResolver>,
    cache: Mutex<HashMap<u64, Resolution>>,
}

impl SymbolTable {
    pub fn new(
        image: impl Into<PathBuf>,
        base: u64,
        resolver: impl SymbolResolver + 'static,
    ) -> Self {
        Self {
            image: image.into(),
            base,
            resolver: Box::new(resolver),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Symbol name for `address`, `None` below the base
    pub fn resolve(&self, address: u64) -> Result<Option<String>, ResolveError> {
        Ok(self.lookup(address)?.symbol)
    }

    /// Full resolution (symbol and source line) for `address`
    ///
    /// # Errors
    /// * `ResolveError` - the external lookup failed; nothing is cached
    pub fn lookup(&self, address: u64) -> Result<Resolution, ResolveError> {
        if address < self.base {
            trace!("Address {:#x} below base {:#x}", address, self.base);
            return Ok(Resolution::default());
        }

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(&address) {
            return Ok(hit.clone());
        }

        let offset = address - self.base;
        debug!("Resolving {:#x} ({} + {:#x})", address, self.image.display(), offset);
        let resolution = self.resolver.resolve(&self.image, offset)?;
        cache.insert(address, resolution.clone());

        Ok(resolution)
    }

    /// Number of distinct addresses resolved so far
    pub fn cached(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("image", &self.image)
            .field("base", &format_args!("{:#x}", self.base))
            .field("cached", &self.cached())
            .finish()
    }
}
