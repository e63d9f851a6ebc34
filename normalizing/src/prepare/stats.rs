use std::collections::HashMap;
use std::fmt;

use crate::data::{Band, NormalizationData, Thresholds};

/// сводка по таблицам нормализации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics
{
    /// количество кодпоинтов в каждом диапазоне norm16
    pub bands: HashMap<&'static str, usize>,
    /// размер индекса trie (u16)
    pub trie_index: usize,
    /// размер блока данных trie (u16)
    pub trie_data: usize,
    /// размер строки композиций и дополнительных данных (u16)
    pub compositions: usize,
    pub thresholds: Thresholds,
}

impl NormalizationData
{
    /// статистика таблиц
    pub fn statistics(&self) -> Statistics
    {
        let mut bands = HashMap::new();

        for (start, end, norm16) in self.trie.ranges() {
            if let Some(band) = self.band(norm16) {
                *bands.entry(band_name(band)).or_insert(0) += (end - start + 1) as usize;
            }
        }

        Statistics {
            bands,
            trie_index: self.trie.index().len(),
            trie_data: self.trie.data().len(),
            compositions: self.compositions.len(),
            thresholds: self.thresholds(),
        }
    }
}

fn band_name(band: Band) -> &'static str
{
    match band {
        Band::Inert => "без декомпозиции, CCC = 0",
        Band::JamoL => "Jamo L",
        Band::YesYesCombinesForward => "стартеры со списками композиций",
        Band::Hangul => "слоги хангыль",
        Band::YesNoCombinesForward => "двусторонние декомпозиции со списками композиций",
        Band::YesNoMappingOnly => "двусторонние декомпозиции",
        Band::NoNo => "односторонние декомпозиции",
        Band::NoNoAlgorithmic(_) => "алгоритмические декомпозиции",
        Band::MaybeYesCombinesForward => "комбинируются в обе стороны",
        Band::MaybeYes(_) => "комбинируются с предыдущим",
        Band::JamoVT => "Jamo V / T",
        Band::YesYesWithCC(_) => "нестартеры",
    }
}

impl fmt::Display for Statistics
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let t = &self.thresholds;

        writeln!(
            f,
            "  размер индекса: {}\n  \
            размер блока данных: {}\n  \
            размер дополнительных данных: {}\n  \
            общий размер: {}\n  \
            декомпозиция начинается с U+{:04X}, композиция - с U+{:04X}",
            self.trie_index * 2,
            self.trie_data * 2,
            self.compositions * 2,
            (self.trie_index + self.trie_data + self.compositions) * 2,
            t.min_decomp_no_cp,
            t.min_comp_no_maybe_cp,
        )?;

        writeln!(
            f,
            "  minYesNo: 0x{:04X}, minYesNoMappingsOnly: 0x{:04X}, minNoNo: 0x{:04X}, limitNoNo: 0x{:04X}, minMaybeYes: 0x{:04X}",
            t.min_yes_no, t.min_yes_no_mappings_only, t.min_no_no, t.limit_no_no, t.min_maybe_yes,
        )?;

        writeln!(f)?;

        let mut keys: Vec<&&str> = self.bands.keys().collect();
        keys.sort_by(|a, b| self.bands[*b].cmp(&self.bands[*a]).then(a.cmp(b)));

        for key in keys {
            writeln!(f, "  {}: {}", key, self.bands[key])?;
        }

        Ok(())
    }
}
