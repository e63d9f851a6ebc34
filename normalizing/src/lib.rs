pub use canonical::CanonicalIndex;
pub use data::{Band, NormalizationData, Thresholds};
pub use error::DataError;
pub use normalizer::{Form, Normalizer};
pub use prepare::Statistics;
pub use trie::{CodepointTrie, TrieBuilder};

mod buffer;
mod canonical;
mod composition;
mod data;
mod decomposition;
mod error;
mod fcd;
mod hangul;
mod normalizer;
mod prepare;
mod trie;
mod utf8;

/// результат быстрой проверки нормализации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickCheck
{
    /// текст точно нормализован
    Yes,
    /// текст точно не нормализован
    No,
    /// текст нормализован, если кодпоинты, комбинирующиеся с предыдущими, не скомбинируются при композиции
    Maybe,
}
