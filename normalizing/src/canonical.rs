use std::collections::BTreeSet;

use tracing::debug;

use crate::data::{NormalizationData, JAMO_L, MIN_NORMAL_MAYBE_YES};
use crate::hangul;
use crate::trie::{CodepointTrie, TrieBuilder};

/// кодпоинт не может начинать сегмент канонического итератора
const NOT_SEGMENT_STARTER: u32 = 0x8000_0000;
/// кодпоинт комбинируется с последующими
const HAS_COMPOSITIONS: u32 = 0x4000_0000;
/// биты значения - номер множества в start_sets, а не сам кодпоинт
const HAS_SET: u32 = 0x20_0000;
const VALUE_MASK: u32 = 0x1F_FFFF;

/// индекс канонического итератора: начала сегментов и обратные декомпозиции
///
/// значение trie: флаги + либо единственный кодпоинт, чья декомпозиция начинается с данного,
/// либо номер множества таких кодпоинтов
pub struct CanonicalIndex
{
    trie: CodepointTrie<u32>,
    start_sets: Vec<BTreeSet<char>>,
}

impl CanonicalIndex
{
    /// может ли кодпоинт начинать сегмент: он не встречается внутри односторонних декомпозиций
    /// и не комбинируется с предыдущими
    pub fn is_segment_starter(&self, c: char) -> bool
    {
        self.trie.get(c as u32) & NOT_SEGMENT_STARTER == 0
    }

    /// кодпоинты, каноническая декомпозиция которых начинается с c
    ///
    /// включает составные кодпоинты, цепочки композиций и, для ведущей согласной чамо, все её слоги
    pub fn start_set(&self, c: char) -> BTreeSet<char>
    {
        let value = self.trie.get(c as u32) & !NOT_SEGMENT_STARTER;
        let mut set = BTreeSet::new();

        let origin = value & VALUE_MASK;

        if value & HAS_SET != 0 {
            if let Some(start_set) = self.start_sets.get(origin as usize) {
                set.extend(start_set.iter().copied());
            }
        } else if let Some(origin) = char::from_u32(origin).filter(|_| origin != 0) {
            set.insert(origin);
        }

        if value & HAS_COMPOSITIONS != 0 {
            if let Some(l) = hangul::jamo_l(c as u32) {
                let first = hangul::HANGUL_BASE + l * hangul::JAMO_VT_COUNT;
                set.extend((first .. first + hangul::JAMO_VT_COUNT).map(hangul::jamo_char));
            }
        }

        set
    }

    /// количество множеств обратных декомпозиций
    pub fn start_sets_count(&self) -> usize
    {
        self.start_sets.len()
    }

    pub(crate) fn build(data: &NormalizationData) -> Self
    {
        let mut builder = IndexBuilder {
            trie: TrieBuilder::new(),
            start_sets: vec![],
        };

        for (start, end, norm16) in data.trie.ranges() {
            // двусторонние декомпозиции (включая слоги хангыль) пропускаем: составные кодпоинты
            // берутся из списков композиций стартеров, остальные кодпоинты таких декомпозиций - "maybe"
            if data.is_inert(norm16) || (data.min_yes_no <= norm16 && norm16 < data.min_no_no) {
                continue;
            }

            for code in start ..= end {
                builder.add_code(data, code, norm16);
            }
        }

        // составные кодпоинты стартеров со списками композиций
        for (start, end, norm16) in data.trie.ranges() {
            if norm16 == JAMO_L {
                continue;
            }

            let list = match norm16 < data.min_yes_no || (data.min_maybe_yes <= norm16 && norm16 < MIN_NORMAL_MAYBE_YES)
            {
                true => data.compositions_list_for_decomp_yes(norm16),
                false => None,
            };

            if let Some(list) = list {
                for code in start ..= end {
                    let set = builder.set_for(code);
                    data.add_composites(list, &mut builder.start_sets[set]);
                }
            }
        }

        let index = Self {
            trie: builder.trie.build(),
            start_sets: builder.start_sets,
        };

        debug!(
            start_sets = index.start_sets.len(),
            trie_data = index.trie.data().len(),
            "индекс канонического итератора построен"
        );

        index
    }
}

struct IndexBuilder
{
    trie: TrieBuilder<u32>,
    start_sets: Vec<BTreeSet<char>>,
}

impl IndexBuilder
{
    fn add_code(&mut self, data: &NormalizationData, code: u32, norm16: u16)
    {
        let old = self.trie.get(code);
        let mut value = old;

        if norm16 >= data.min_maybe_yes {
            // встречается в декомпозициях или имеет CCC != 0
            value |= NOT_SEGMENT_STARTER;

            if norm16 < MIN_NORMAL_MAYBE_YES {
                value |= HAS_COMPOSITIONS;
            }
        } else if norm16 < data.min_yes_no {
            value |= HAS_COMPOSITIONS;
        } else {
            // односторонняя декомпозиция
            let mut target = code;
            let mut target_norm16 = norm16;

            while data.limit_no_no <= target_norm16 && target_norm16 < data.min_maybe_yes {
                target = data.map_algorithmic(target, target_norm16);
                target_norm16 = data.get_norm16(target);
            }

            if data.min_yes_no <= target_norm16 && target_norm16 < data.limit_no_no {
                let mapping = data.mapping(target_norm16);

                // сам кодпоинт имеет CCC != 0
                if code == target && mapping.has_ccc_word() && mapping.ccc_word & 0xFF != 0 {
                    value |= NOT_SEGMENT_STARTER;
                }

                let mut chars = mapping.chars();

                if let Some(first) = chars.next() {
                    self.add_to_start_set(code, first as u32);

                    // остальные кодпоинты односторонней декомпозиции не начинают сегменты
                    if target_norm16 >= data.min_no_no {
                        for next in chars {
                            let next_value = self.trie.get(next as u32);

                            if next_value & NOT_SEGMENT_STARTER == 0 {
                                self.trie.set(next as u32, next_value | NOT_SEGMENT_STARTER);
                            }
                        }
                    }
                }
            } else {
                // алгоритмическая декомпозиция в один кодпоинт с CCC = 0
                self.add_to_start_set(code, target);
            }
        }

        if value != old {
            self.trie.set(code, value);
        }
    }

    /// origin - кодпоинт, декомпозиция которого начинается с lead
    fn add_to_start_set(&mut self, origin: u32, lead: u32)
    {
        let value = self.trie.get(lead);

        // первый такой кодпоинт записывается прямо в значение
        if value & (HAS_SET | VALUE_MASK) == 0 && origin != 0 {
            self.trie.set(lead, value | origin);
            return;
        }

        let set = self.set_for(lead);

        if let Some(origin) = char::from_u32(origin) {
            self.start_sets[set].insert(origin);
        }
    }

    /// номер множества кодпоинта; если его нет - создаём, перенося в него записанный в значении кодпоинт
    fn set_for(&mut self, code: u32) -> usize
    {
        let value = self.trie.get(code);

        if value & HAS_SET != 0 {
            return (value & VALUE_MASK) as usize;
        }

        let index = self.start_sets.len();
        let mut set = BTreeSet::new();

        if let Some(first) = char::from_u32(value & VALUE_MASK).filter(|_| value & VALUE_MASK != 0) {
            set.insert(first);
        }

        self.start_sets.push(set);
        self.trie.set(code, (value & !VALUE_MASK) | HAS_SET | index as u32);

        index
    }
}
