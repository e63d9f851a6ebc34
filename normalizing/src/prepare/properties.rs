use unicode_normalization::char::{canonical_combining_class, compose, decompose_canonical};
use unicode_normalization::UnicodeNormalization;

/// источник свойств Unicode, из которых строятся таблицы
pub(crate) trait Properties
{
    /// CCC
    fn combining_class(&self, c: char) -> u8;

    /// полная каноническая декомпозиция, пустая - кодпоинт не декомпозируется
    fn decomposition(&self, c: char) -> Vec<char>;

    /// первичная композиция пары
    fn compose(&self, a: char, b: char) -> Option<char>;

    /// кодпоинт не меняется при NFC
    fn is_nfc(&self, c: char) -> bool;
}

/// свойства из таблиц крейта unicode-normalization
pub(crate) struct UnicodeProperties;

impl Properties for UnicodeProperties
{
    #[inline(always)]
    fn combining_class(&self, c: char) -> u8
    {
        canonical_combining_class(c)
    }

    fn decomposition(&self, c: char) -> Vec<char>
    {
        let mut decomposition = Vec::with_capacity(4);
        decompose_canonical(c, |d| decomposition.push(d));

        // кодпоинт без декомпозиции возвращается как есть
        match decomposition[..] {
            [d] if d == c => vec![],
            _ => decomposition,
        }
    }

    #[inline(always)]
    fn compose(&self, a: char, b: char) -> Option<char>
    {
        compose(a, b)
    }

    fn is_nfc(&self, c: char) -> bool
    {
        std::iter::once(c).nfc().eq(std::iter::once(c))
    }
}
