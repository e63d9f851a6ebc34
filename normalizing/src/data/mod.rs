use std::fmt;

use lazy_static::lazy_static;
use once_cell::sync::OnceCell;

use crate::canonical::CanonicalIndex;
use crate::error::DataError;
use crate::trie::CodepointTrie;

pub use norm16::Band;

mod blob;
mod norm16;
mod validate;

lazy_static! {
    /// таблицы канонической нормализации, подготавливаются один раз при первом обращении
    static ref CANONICAL: NormalizationData = match crate::prepare::build() {
        Ok(data) => data,
        Err(error) => panic!("не удалось подготовить данные канонической нормализации: {}", error),
    };
}

/// Jamo L - ведущая согласная чамо
pub const JAMO_L: u16 = 1;
/// Jamo V / T - гласная или завершающая согласная чамо
pub const JAMO_VT: u16 = 0xFF00;
/// начало диапазона "maybeYes" без списков композиций, младший байт - CCC
pub const MIN_NORMAL_MAYBE_YES: u16 = 0xFE00;
/// начало диапазона кодпоинтов с ненулевым CCC, не комбинирующихся с предыдущими
pub const MIN_YES_YES_WITH_CC: u16 = 0xFF01;
/// максимальное смещение алгоритмической декомпозиции
pub const MAX_DELTA: u16 = 0x40;
/// кодпоинты до U+0300 имеют нулевой ведущий CCC
pub const MIN_CCC_LCCC_CP: u32 = 0x300;

/// заголовок декомпозиции: перед ним записано слово CCC / ведущего CCC
pub const MAPPING_HAS_CCC_LCCC_WORD: u16 = 0x80;
/// заголовок декомпозиции: перед ним записана исходная (не рекурсивная) декомпозиция
pub const MAPPING_HAS_RAW_MAPPING: u16 = 0x40;
/// заголовок декомпозиции: после кодпоинта нет границы композиции
pub const MAPPING_NO_COMP_BOUNDARY_AFTER: u16 = 0x20;
/// заголовок декомпозиции: длина в UTF-16 единицах
pub const MAPPING_LENGTH_MASK: u16 = 0x1F;
/// декомпозиция в UTF-8 занимает не больше 31 * 3 байт
pub const MAPPING_UTF8_CAPACITY: usize = 128;

/// список композиций: последняя запись
pub const COMP_1_LAST_TUPLE: u16 = 0x8000;
/// список композиций: запись из трёх единиц
pub const COMP_1_TRIPLE: u16 = 1;
/// кодпоинты от этого значения кодируются записью из трёх единиц
pub const COMP_1_TRAIL_LIMIT: u16 = 0x3400;
pub const COMP_1_TRAIL_MASK: u16 = 0x7FFE;
pub const COMP_1_TRAIL_SHIFT: u32 = 9;
pub const COMP_2_TRAIL_SHIFT: u32 = 6;
pub const COMP_2_TRAIL_MASK: u16 = 0xFFC0;

/// границы диапазонов norm16 и пороговые кодпоинты быстрых проверок
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds
{
    /// кодпоинты до этого значения не декомпозируются и имеют CCC = 0
    pub min_decomp_no_cp: u32,
    /// кодпоинты до этого значения проходят быструю проверку композиции
    pub min_comp_no_maybe_cp: u32,
    pub min_yes_no: u16,
    pub min_yes_no_mappings_only: u16,
    pub min_no_no: u16,
    pub limit_no_no: u16,
    pub min_maybe_yes: u16,
}

/// неизменяемые таблицы нормализации
///
/// один экземпляр может одновременно использоваться любым количеством потоков
pub struct NormalizationData
{
    pub(crate) trie: CodepointTrie<u16>,
    /// списки композиций "maybeYes", за которыми следуют дополнительные данные
    pub(crate) compositions: Vec<u16>,
    /// смещение дополнительных данных в compositions
    pub(crate) extra_offset: usize,
    /// по одному биту на 32 кодпоинта BMP: установлен, если хотя бы у одного кодпоинта fcd16 != 0
    pub(crate) small_fcd: [u8; 0x100],
    /// завершающие CCC кодпоинтов U+0000..U+017F
    pub(crate) tccc180: [u8; 0x180],

    pub(crate) min_decomp_no_cp: u32,
    pub(crate) min_comp_no_maybe_cp: u32,
    pub(crate) min_yes_no: u16,
    pub(crate) min_yes_no_mappings_only: u16,
    pub(crate) min_no_no: u16,
    pub(crate) limit_no_no: u16,
    pub(crate) min_maybe_yes: u16,

    /// индекс канонического итератора, строится при первом обращении
    canonical: OnceCell<CanonicalIndex>,
}

impl NormalizationData
{
    /// данные канонической нормализации (NFC / NFD / FCD), общие для всего процесса
    pub fn canonical() -> &'static NormalizationData
    {
        &CANONICAL
    }

    /// собрать таблицы из частей, проверив их согласованность
    pub fn from_parts(
        thresholds: Thresholds,
        trie: CodepointTrie<u16>,
        compositions: Vec<u16>,
        small_fcd: [u8; 0x100],
    ) -> Result<Self, DataError>
    {
        validate::thresholds(&thresholds, compositions.len())?;

        let mut data = Self {
            trie,
            extra_offset: (MIN_NORMAL_MAYBE_YES - thresholds.min_maybe_yes) as usize,
            compositions,
            small_fcd,
            tccc180: [0; 0x180],
            min_decomp_no_cp: thresholds.min_decomp_no_cp,
            min_comp_no_maybe_cp: thresholds.min_comp_no_maybe_cp,
            min_yes_no: thresholds.min_yes_no,
            min_yes_no_mappings_only: thresholds.min_yes_no_mappings_only,
            min_no_no: thresholds.min_no_no,
            limit_no_no: thresholds.limit_no_no,
            min_maybe_yes: thresholds.min_maybe_yes,
            canonical: OnceCell::new(),
        };

        validate::values(&data)?;
        data.fill_tccc180();

        Ok(data)
    }

    /// границы диапазонов
    pub fn thresholds(&self) -> Thresholds
    {
        Thresholds {
            min_decomp_no_cp: self.min_decomp_no_cp,
            min_comp_no_maybe_cp: self.min_comp_no_maybe_cp,
            min_yes_no: self.min_yes_no,
            min_yes_no_mappings_only: self.min_yes_no_mappings_only,
            min_no_no: self.min_no_no,
            limit_no_no: self.limit_no_no,
            min_maybe_yes: self.min_maybe_yes,
        }
    }

    /// заменить битовую карту small FCD (пересчитывает tccc180)
    pub(crate) fn set_small_fcd(&mut self, small_fcd: [u8; 0x100])
    {
        self.small_fcd = small_fcd;
        self.fill_tccc180();
    }

    /// завершающие CCC первых 0x180 кодпоинтов. ведущий CCC у них всегда 0
    fn fill_tccc180(&mut self)
    {
        for code in 0 .. 0x180 {
            self.tccc180[code as usize] = match self.single_lead_might_have_non_zero_fcd16(code) {
                true => self.get_fcd16_from_norm_data(code) as u8,
                false => 0,
            };
        }
    }

    /// индекс канонического итератора, если он уже построен
    pub fn canonical_index(&self) -> Option<&CanonicalIndex>
    {
        self.canonical.get()
    }

    /// построить индекс канонического итератора (однократно, потокобезопасно)
    pub fn ensure_canonical_index(&self) -> &CanonicalIndex
    {
        self.canonical.get_or_init(|| CanonicalIndex::build(self))
    }

    /// единица дополнительных данных
    #[inline(always)]
    pub(crate) fn extra(&self, index: usize) -> u16
    {
        self.compositions[self.extra_offset + index]
    }

    /// отрезок дополнительных данных
    #[inline(always)]
    pub(crate) fn extra_slice(&self, from: usize, len: usize) -> &[u16]
    {
        let from = self.extra_offset + from;
        &self.compositions[from .. from + len]
    }
}

impl fmt::Debug for NormalizationData
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("NormalizationData")
            .field("thresholds", &self.thresholds())
            .field("trie_data", &self.trie.data().len())
            .field("compositions", &self.compositions.len())
            .field("canonical_index", &self.canonical.get().is_some())
            .finish()
    }
}

/// запись декомпозиции в дополнительных данных
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mapping<'a>
{
    /// длина, флаги и завершающий CCC
    pub first_unit: u16,
    /// декомпозиция в UTF-16
    pub units: &'a [u16],
    /// слово CCC кодпоинта / ведущего CCC декомпозиции, если записано
    pub ccc_word: u16,
    /// позиция заголовка в дополнительных данных
    pub offset: usize,
}

impl<'a> Mapping<'a>
{
    #[inline(always)]
    pub fn len(&self) -> usize
    {
        (self.first_unit & MAPPING_LENGTH_MASK) as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    #[inline(always)]
    pub fn lead_cc(&self) -> u8
    {
        (self.ccc_word >> 8) as u8
    }

    #[inline(always)]
    pub fn trail_cc(&self) -> u8
    {
        (self.first_unit >> 8) as u8
    }

    #[inline(always)]
    pub fn has_raw_mapping(&self) -> bool
    {
        self.first_unit & MAPPING_HAS_RAW_MAPPING != 0
    }

    #[inline(always)]
    pub fn has_ccc_word(&self) -> bool
    {
        self.first_unit & MAPPING_HAS_CCC_LCCC_WORD != 0
    }

    /// кодпоинты декомпозиции
    #[inline(always)]
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a
    {
        char::decode_utf16(self.units.iter().copied())
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// первый кодпоинт декомпозиции
    #[inline(always)]
    pub fn first_char(&self) -> Option<char>
    {
        self.chars().next()
    }

    /// декомпозиция в UTF-8 во временном буфере
    #[inline(always)]
    pub fn to_utf8<'b>(&self, out: &'b mut [u8; MAPPING_UTF8_CAPACITY]) -> &'b str
    {
        let mut len = 0;

        for c in self.chars() {
            len += c.encode_utf8(&mut out[len ..]).len();
        }

        core::str::from_utf8(&out[.. len]).unwrap_or_default()
    }
}

impl NormalizationData
{
    /// декомпозиция из дополнительных данных; norm16 - позиция её заголовка
    #[inline(always)]
    pub(crate) fn mapping(&self, norm16: u16) -> Mapping
    {
        let offset = norm16 as usize;
        let first_unit = self.extra(offset);

        let ccc_word = match first_unit & MAPPING_HAS_CCC_LCCC_WORD != 0 {
            true => self.extra(offset - 1),
            false => 0,
        };

        Mapping {
            first_unit,
            units: self.extra_slice(offset + 1, (first_unit & MAPPING_LENGTH_MASK) as usize),
            ccc_word,
            offset,
        }
    }

    /// исходная (не рекурсивная) декомпозиция записи, если она отличается от полной
    pub(crate) fn raw_mapping_units(&self, mapping: &Mapping) -> Option<Vec<u16>>
    {
        if !mapping.has_raw_mapping() {
            return None;
        }

        // исходная декомпозиция записана перед заголовком и словом CCC
        let raw = mapping.offset - mapping.has_ccc_word() as usize - 1;
        let rm0 = self.extra(raw);

        Some(match rm0 <= MAPPING_LENGTH_MASK {
            true => self.extra_slice(raw - rm0 as usize, rm0 as usize).to_vec(),
            false => {
                // первые две единицы полной декомпозиции заменяются на rm0
                let mut units = Vec::with_capacity(mapping.len() - 1);
                units.push(rm0);
                units.extend_from_slice(mapping.units.get(2 ..).unwrap_or(&[]));
                units
            }
        })
    }
}

/// декодировать UTF-16 единицы дополнительных данных в строку
pub(crate) fn units_to_string(units: &[u16]) -> String
{
    char::decode_utf16(units.iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
