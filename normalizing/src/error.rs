use thiserror::Error;

/// повреждённые или несовместимые данные нормализации
///
/// ошибки возникают только при загрузке / подготовке таблиц: нормализация строк на корректных данных
/// ошибок не возвращает
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError
{
    #[error("данные нормализации обрезаны: ожидалось {expected} байт, получено {actual}")]
    Truncated
    {
        expected: usize,
        actual: usize,
    },

    #[error("неверная сигнатура данных нормализации")]
    BadMagic,

    #[error("контрольная сумма данных нормализации не совпадает")]
    Checksum,

    #[error("неподдерживаемая версия формата данных: {0}")]
    UnsupportedVersion(u8),

    #[error("некорректные границы диапазонов norm16: {0}")]
    Thresholds(&'static str),

    #[error("индекс trie ссылается за пределы данных: блок {block}, смещение 0x{offset:X}")]
    TrieIndex
    {
        block: usize,
        offset: usize,
    },

    #[error("значение norm16 0x{norm16:04X} (U+{code:04X}) не принадлежит ни одному диапазону")]
    UnknownBand
    {
        code: u32,
        norm16: u16,
    },

    #[error("некорректная декомпозиция для norm16 0x{norm16:04X}: {reason}")]
    Mapping
    {
        norm16: u16,
        reason: &'static str,
    },

    #[error("некорректный список композиций по индексу {index}: {reason}")]
    CompositionList
    {
        index: usize,
        reason: &'static str,
    },

    #[error("алгоритмическая декомпозиция U+{code:04X} ведёт к другой алгоритмической декомпозиции")]
    AlgorithmicChain
    {
        code: u32,
    },

    #[error("данные не помещаются в 16-битные значения norm16: {0}")]
    TooLarge(&'static str),
}
