use super::*;

/// диапазон, которому принадлежит значение norm16
///
/// поведение кодпоинта определяется только диапазоном его norm16, но не самим кодпоинтом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band
{
    /// нет декомпозиции, CCC = 0, не комбинируется
    Inert,
    /// ведущая согласная чамо
    JamoL,
    /// стартер без декомпозиции со списком композиций
    YesYesCombinesForward,
    /// слог хангыль, декомпозиция вычисляется алгоритмически
    Hangul,
    /// двусторонняя декомпозиция, результат может комбинироваться дальше
    YesNoCombinesForward,
    /// двусторонняя декомпозиция
    YesNoMappingOnly,
    /// односторонняя декомпозиция из дополнительных данных
    NoNo,
    /// декомпозиция - один кодпоинт со смещением delta
    NoNoAlgorithmic(i32),
    /// комбинируется с предыдущим и последующими кодпоинтами
    MaybeYesCombinesForward,
    /// комбинируется с предыдущим кодпоинтом
    MaybeYes(u8),
    /// гласная или завершающая согласная чамо
    JamoVT,
    /// нестартер, не комбинирующийся с предыдущим кодпоинтом
    YesYesWithCC(u8),
}

impl NormalizationData
{
    /// значение norm16 кодпоинта. для значений вне диапазона Unicode - 0
    #[inline(always)]
    pub fn get_norm16(&self, code: u32) -> u16
    {
        self.trie.get(code)
    }

    /// диапазон значения norm16, None - значение не принадлежит ни одному диапазону
    pub fn band(&self, norm16: u16) -> Option<Band>
    {
        Some(match norm16 {
            0 => Band::Inert,
            JAMO_L => Band::JamoL,
            _ if norm16 < self.min_yes_no => Band::YesYesCombinesForward,
            _ if norm16 == self.min_yes_no => Band::Hangul,
            _ if norm16 < self.min_yes_no_mappings_only => Band::YesNoCombinesForward,
            _ if norm16 < self.min_no_no => Band::YesNoMappingOnly,
            _ if norm16 < self.limit_no_no => Band::NoNo,
            _ if norm16 < self.min_maybe_yes => {
                let delta = norm16 as i32 - (self.min_maybe_yes - MAX_DELTA - 1) as i32;

                if delta < -(MAX_DELTA as i32) {
                    return None;
                }

                Band::NoNoAlgorithmic(delta)
            }
            _ if norm16 < MIN_NORMAL_MAYBE_YES => Band::MaybeYesCombinesForward,
            _ if norm16 < JAMO_VT => Band::MaybeYes(norm16 as u8),
            JAMO_VT => Band::JamoVT,
            _ => Band::YesYesWithCC(norm16 as u8),
        })
    }

    #[inline(always)]
    pub(crate) fn is_inert(&self, norm16: u16) -> bool
    {
        norm16 == 0
    }

    #[inline(always)]
    pub(crate) fn is_jamo_l(&self, norm16: u16) -> bool
    {
        norm16 == JAMO_L
    }

    #[inline(always)]
    pub(crate) fn is_jamo_vt(&self, norm16: u16) -> bool
    {
        norm16 == JAMO_VT
    }

    #[inline(always)]
    pub(crate) fn is_hangul(&self, norm16: u16) -> bool
    {
        norm16 == self.min_yes_no
    }

    #[inline(always)]
    pub(crate) fn is_comp_yes_and_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 < self.min_no_no
    }

    #[inline(always)]
    pub(crate) fn is_maybe(&self, norm16: u16) -> bool
    {
        self.min_maybe_yes <= norm16 && norm16 <= JAMO_VT
    }

    #[inline(always)]
    pub(crate) fn is_maybe_or_non_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 >= self.min_maybe_yes
    }

    #[inline(always)]
    pub(crate) fn is_decomp_yes(&self, norm16: u16) -> bool
    {
        norm16 < self.min_yes_no || self.min_maybe_yes <= norm16
    }

    #[inline(always)]
    pub(crate) fn is_decomp_yes_and_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 < self.min_yes_no
            || norm16 == JAMO_VT
            || (self.min_maybe_yes <= norm16 && norm16 <= MIN_NORMAL_MAYBE_YES)
    }

    /// почти то же, что is_decomp_yes_and_zero_cc, но без "maybeYes" со списками композиций
    #[inline(always)]
    pub(crate) fn is_most_decomp_yes_and_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 < self.min_yes_no || norm16 == MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT
    }

    /// только для значений, не проходящих is_decomp_yes
    #[inline(always)]
    pub(crate) fn is_decomp_no_algorithmic(&self, norm16: u16) -> bool
    {
        norm16 >= self.limit_no_no
    }

    /// декомпозиция алгоритмического "noNo"
    #[inline(always)]
    pub(crate) fn map_algorithmic(&self, code: u32, norm16: u16) -> u32
    {
        (code as i64 + norm16 as i64 - (self.min_maybe_yes - MAX_DELTA - 1) as i64) as u32
    }

    /// CCC кодпоинта, проходящего is_decomp_yes
    #[inline(always)]
    pub(crate) fn cc_from_yes_or_maybe(&self, norm16: u16) -> u8
    {
        match norm16 >= MIN_NORMAL_MAYBE_YES {
            true => norm16 as u8,
            false => 0,
        }
    }

    /// CCC "noNo" из слова перед заголовком декомпозиции
    #[inline(always)]
    fn cc_from_no_no(&self, norm16: u16) -> u8
    {
        self.mapping(norm16).ccc_word as u8
    }

    /// CCC по значению norm16
    #[inline(always)]
    pub fn get_cc(&self, norm16: u16) -> u8
    {
        if norm16 >= MIN_NORMAL_MAYBE_YES {
            return norm16 as u8;
        }

        if norm16 < self.min_no_no || self.limit_no_no <= norm16 {
            return 0;
        }

        self.cc_from_no_no(norm16)
    }

    /// CCC кодпоинта
    #[inline(always)]
    pub fn combining_class(&self, code: u32) -> u8
    {
        self.get_cc(self.get_norm16(code))
    }

    /// может ли хотя бы один кодпоинт из 32, включающих данный, иметь fcd16 != 0
    ///
    /// для суррогатов: может ли fcd16 != 0 быть у какого-либо дополнительного кодпоинта с этим ведущим суррогатом
    #[inline(always)]
    pub(crate) fn single_lead_might_have_non_zero_fcd16(&self, lead: u32) -> bool
    {
        let bits = self.small_fcd[(lead >> 8) as usize & 0xFF];

        match bits {
            0 => false,
            _ => (bits >> ((lead >> 5) & 7)) & 1 != 0,
        }
    }

    /// ведущий (старший байт) и завершающий (младший байт) CCC кодпоинта
    #[inline(always)]
    pub fn get_fcd16(&self, code: u32) -> u16
    {
        if code < 0x180 {
            return self.tccc180[code as usize] as u16;
        }

        // для дополнительных плоскостей битовая карта проверяется по ведущему суррогату
        let lead = match code <= 0xFFFF {
            true => code,
            false => 0xD7C0 + (code >> 10),
        };

        if !self.single_lead_might_have_non_zero_fcd16(lead) {
            return 0;
        }

        self.get_fcd16_from_norm_data(code)
    }

    /// fcd16 по данным norm16, без быстрых таблиц
    pub(crate) fn get_fcd16_from_norm_data(&self, code: u32) -> u16
    {
        let mut code = code;
        let mut norm16 = self.get_norm16(code);

        // алгоритмическая декомпозиция ведёт к кодпоинту без алгоритмической декомпозиции (проверяется при загрузке),
        // поэтому цикл выполняется не более двух раз
        loop {
            if norm16 <= self.min_yes_no {
                // нет декомпозиции или слог хангыль
                return 0;
            }

            if norm16 >= MIN_NORMAL_MAYBE_YES {
                let cc = norm16 & 0xFF;
                return cc | (cc << 8);
            }

            if norm16 >= self.min_maybe_yes {
                return 0;
            }

            if self.is_decomp_no_algorithmic(norm16) {
                code = self.map_algorithmic(code, norm16);
                norm16 = self.get_norm16(code);
                continue;
            }

            let mapping = self.mapping(norm16);

            // удаляемый кодпоинт получает наихудшие значения: по обе стороны от него окажутся произвольные символы
            if mapping.is_empty() {
                return 0x1FF;
            }

            return (mapping.trail_cc() as u16) | (mapping.ccc_word & 0xFF00);
        }
    }

    /// результат быстрой проверки композиции для norm16
    pub(crate) fn comp_quick_check(&self, norm16: u16) -> crate::QuickCheck
    {
        if norm16 < self.min_no_no || MIN_YES_YES_WITH_CC <= norm16 {
            crate::QuickCheck::Yes
        } else if self.min_maybe_yes <= norm16 {
            crate::QuickCheck::Maybe
        } else {
            crate::QuickCheck::No
        }
    }

    /// позиция списка композиций в compositions для кодпоинта без декомпозиции, None - не комбинируется
    #[inline(always)]
    pub(crate) fn compositions_list_for_decomp_yes(&self, norm16: u16) -> Option<usize>
    {
        if norm16 == 0 || MIN_NORMAL_MAYBE_YES <= norm16 {
            return None;
        }

        Some(match norm16 < self.min_maybe_yes {
            // для Jamo L - безвредный пустой список
            true => self.extra_offset + norm16 as usize,
            false => (norm16 - self.min_maybe_yes) as usize,
        })
    }

    /// позиция списка композиций составного кодпоинта (записан после его декомпозиции)
    #[inline(always)]
    pub(crate) fn compositions_list_for_composite(&self, norm16: u16) -> usize
    {
        let first_unit = self.extra(norm16 as usize);

        self.extra_offset + norm16 as usize + 1 + (first_unit & MAPPING_LENGTH_MASK) as usize
    }

    /// позиция списка композиций для кодпоинта, который комбинируется с последующими
    #[inline(always)]
    pub(crate) fn compositions_list(&self, norm16: u16) -> Option<usize>
    {
        match self.is_decomp_yes(norm16) {
            true => self.compositions_list_for_decomp_yes(norm16),
            false => Some(self.compositions_list_for_composite(norm16)),
        }
    }
}
