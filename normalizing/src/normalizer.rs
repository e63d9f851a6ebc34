use crate::data::NormalizationData;
use crate::QuickCheck;

/// каноническая форма нормализации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form
{
    /// каноническая декомпозиция + композиция
    Nfc,
    /// каноническая декомпозиция
    Nfd,
    /// NFC, но композиция только соседних кодпоинтов
    Fcc,
    /// "быстрая" декомпозиция: декомпозируются только отрезки, нарушающие порядок CCC
    Fcd,
}

impl Form
{
    #[inline(always)]
    fn only_contiguous(self) -> bool
    {
        self == Form::Fcc
    }
}

impl NormalizationData
{
    /// находится ли текст в форме form
    pub fn is_normalized(&self, text: &str, form: Form) -> bool
    {
        match form {
            Form::Nfc | Form::Fcc => self.compose_text(text, form.only_contiguous(), None),
            Form::Nfd => self.decompose_quick_check(text) == text.len(),
            Form::Fcd => self.make_fcd_text(text, None) == text.len(),
        }
    }

    /// быстрая проверка: "возможно" бывает только у композиции
    pub fn quick_check(&self, text: &str, form: Form) -> QuickCheck
    {
        match form {
            Form::Nfc | Form::Fcc => {
                let (span, maybe) = self.compose_quick_check(text, form.only_contiguous(), false);

                match (span == text.len(), maybe) {
                    (false, _) => QuickCheck::No,
                    (true, true) => QuickCheck::Maybe,
                    (true, false) => QuickCheck::Yes,
                }
            }
            Form::Nfd | Form::Fcd => match self.span_quick_check_yes(text, form) == text.len() {
                true => QuickCheck::Yes,
                false => QuickCheck::No,
            },
        }
    }

    /// длина начального отрезка текста, который точно находится в форме form
    pub fn span_quick_check_yes(&self, text: &str, form: Form) -> usize
    {
        match form {
            Form::Nfc | Form::Fcc => self.compose_quick_check(text, form.only_contiguous(), true).0,
            Form::Nfd => self.decompose_quick_check(text),
            Form::Fcd => self.make_fcd_text(text, None),
        }
    }
}

/// нормализатор: таблицы + форма
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a>
{
    data: &'a NormalizationData,
    form: Form,
}

impl Normalizer<'static>
{
    /// NFC-нормализатор
    pub fn new_nfc() -> Self
    {
        Self::with_data(NormalizationData::canonical(), Form::Nfc)
    }

    /// NFD-нормализатор
    pub fn new_nfd() -> Self
    {
        Self::with_data(NormalizationData::canonical(), Form::Nfd)
    }

    /// FCC-нормализатор
    pub fn new_fcc() -> Self
    {
        Self::with_data(NormalizationData::canonical(), Form::Fcc)
    }

    /// FCD-нормализатор
    pub fn new_fcd() -> Self
    {
        Self::with_data(NormalizationData::canonical(), Form::Fcd)
    }
}

impl<'a> Normalizer<'a>
{
    /// нормализатор на произвольных таблицах (например, загруженных через from_bytes)
    pub fn with_data(data: &'a NormalizationData, form: Form) -> Self
    {
        Self { data, form }
    }

    pub fn form(&self) -> Form
    {
        self.form
    }

    pub fn data(&self) -> &'a NormalizationData
    {
        self.data
    }

    /// нормализация строки
    pub fn normalize(&self, text: &str) -> String
    {
        match self.form {
            Form::Nfc | Form::Fcc => self.data.compose(text, self.form.only_contiguous()),
            Form::Nfd => self.data.decompose(text),
            Form::Fcd => self.data.make_fcd(text),
        }
    }

    /// нормализация в существующую строку (её содержимое заменяется)
    pub fn normalize_to(&self, text: &str, dest: &mut String)
    {
        dest.clear();
        dest.reserve(text.len());

        self.normalize_second_and_append(dest, text);
    }

    /// дописать к нормализованной строке dest нормализованный text
    pub fn normalize_second_and_append(&self, dest: &mut String, text: &str)
    {
        self.append_with(dest, text, true);
    }

    /// дописать к нормализованной строке dest уже нормализованный text, исправив стык
    pub fn append(&self, dest: &mut String, text: &str)
    {
        self.append_with(dest, text, false);
    }

    fn append_with(&self, dest: &mut String, text: &str, normalize: bool)
    {
        match self.form {
            Form::Nfc | Form::Fcc => self.data.compose_and_append(dest, text, normalize, self.form.only_contiguous()),
            Form::Nfd => self.data.decompose_and_append(dest, text, normalize),
            Form::Fcd => self.data.make_fcd_and_append(dest, text, normalize),
        }
    }

    pub fn is_normalized(&self, text: &str) -> bool
    {
        self.data.is_normalized(text, self.form)
    }

    pub fn quick_check(&self, text: &str) -> QuickCheck
    {
        self.data.quick_check(text, self.form)
    }

    pub fn span_quick_check_yes(&self, text: &str) -> usize
    {
        self.data.span_quick_check_yes(text, self.form)
    }

    /// отрезки текста можно нормализовать независимо, если они начинаются с такого кодпоинта
    pub fn has_boundary_before(&self, c: char) -> bool
    {
        let code = c as u32;

        match self.form {
            Form::Nfc | Form::Fcc => self.data.has_comp_boundary_before(code),
            Form::Nfd => self.data.has_decomp_boundary(code, true),
            Form::Fcd => self.data.has_fcd_boundary_before(code),
        }
    }

    pub fn has_boundary_after(&self, c: char) -> bool
    {
        let code = c as u32;

        match self.form {
            Form::Nfc | Form::Fcc => self.data.has_comp_boundary_after(code, self.form.only_contiguous(), false),
            Form::Nfd => self.data.has_decomp_boundary(code, false),
            Form::Fcd => self.data.has_fcd_boundary_after(code),
        }
    }

    /// кодпоинт не меняется при нормализации и не взаимодействует с соседями
    pub fn is_inert(&self, c: char) -> bool
    {
        let code = c as u32;

        match self.form {
            Form::Nfc | Form::Fcc => self.data.has_comp_boundary_after(code, self.form.only_contiguous(), true),
            Form::Nfd => self.data.is_decomp_inert(code),
            Form::Fcd => self.data.is_fcd_inert(code),
        }
    }

    /// полная каноническая декомпозиция, None - кодпоинт не декомпозируется
    pub fn decomposition(&self, c: char) -> Option<String>
    {
        self.data.get_decomposition(c as u32)
    }

    /// исходная (одноуровневая) декомпозиция
    pub fn raw_decomposition(&self, c: char) -> Option<String>
    {
        self.data.get_raw_decomposition(c as u32)
    }

    pub fn compose_pair(&self, a: char, b: char) -> Option<char>
    {
        self.data.compose_pair(a as u32, b as u32)
    }

    pub fn combining_class(&self, c: char) -> u8
    {
        self.data.combining_class(c as u32)
    }
}
