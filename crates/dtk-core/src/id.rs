use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;

static KEYS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Key of a diagram part. The same key names the part, its data record
/// in the model and every adornment tools attach to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(Spur);

impl PartId {
    pub fn intern(key: &str) -> Self {
        PartId(KEYS.get_or_intern(key))
    }

    /// Key of the viewport box an overview diagram draws.
    pub fn overview_box() -> Self {
        Self::intern("overview_box")
    }

    pub fn as_str(&self) -> &str {
        KEYS.resolve(&self.0)
    }
}

impl fmt::Debug for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
