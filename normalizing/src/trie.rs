use std::collections::HashMap;
use std::hash::Hash;

use crate::error::DataError;

/// количество бит, с помощью которых кодируется смещение внутри блока
pub const BLOCK_BITS: u32 = 7;
/// размер блока
pub const BLOCK_SIZE: usize = 1 << BLOCK_BITS;
/// маска смещения внутри блока
const BLOCK_MASK: u32 = (1 << BLOCK_BITS) - 1;
/// количество кодпоинтов Unicode
pub const CODEPOINTS_COUNT: u32 = 0x110000;
/// до этого кодпоинта (включительно) все кодпоинты записаны в таблицу данных последовательно
pub const CONTINUOUS_BLOCK_END: u32 = 0xFFF;

/// значение, хранимое в trie
pub trait TrieValue: Copy + Default + Eq + Hash {}

impl TrieValue for u16 {}
impl TrieValue for u32 {}

/// двухуровневая таблица: индекс блока кодпоинта -> блок значений
///
/// кодпоинты за пределами индекса (а также некорректные значения > U+10FFFF) получают значение по умолчанию
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepointTrie<T>
{
    /// номера блоков в data для каждого блока кодпоинтов
    index: Vec<u16>,
    /// блоки значений, одинаковые блоки хранятся один раз
    data: Vec<T>,
    /// с U+0000 и до этого кодпоинта включительно блоки в data идут последовательно
    continuous_block_end: u32,
}

impl<T: TrieValue> CodepointTrie<T>
{
    /// значение для кодпоинта
    #[inline(always)]
    pub fn get(&self, code: u32) -> T
    {
        if code <= self.continuous_block_end {
            return self.data[code as usize];
        }

        let block = match self.index.get((code >> BLOCK_BITS) as usize) {
            Some(&block) => block as usize,
            None => return T::default(),
        };

        self.data[(block << BLOCK_BITS) | (code & BLOCK_MASK) as usize]
    }

    /// последовательные диапазоны кодпоинтов с одинаковым значением: (первый, последний, значение)
    pub fn ranges(&self) -> TrieRanges<T>
    {
        TrieRanges {
            trie: self,
            next: 0,
        }
    }

    /// собрать trie из частей с проверкой индекса
    pub fn from_parts(
        index: Vec<u16>,
        data: Vec<T>,
        continuous_block_end: u32,
    ) -> Result<Self, DataError>
    {
        let continuous_len = continuous_block_end as usize + 1;

        if continuous_len % BLOCK_SIZE != 0 || continuous_len > data.len() {
            return Err(DataError::TrieIndex {
                block: continuous_len >> BLOCK_BITS,
                offset: continuous_len,
            });
        }

        if index.len() > (CODEPOINTS_COUNT >> BLOCK_BITS) as usize {
            return Err(DataError::TrieIndex {
                block: index.len(),
                offset: 0,
            });
        }

        for (block, &entry) in index.iter().enumerate() {
            let offset = (entry as usize) << BLOCK_BITS;

            if offset + BLOCK_SIZE > data.len() {
                return Err(DataError::TrieIndex { block, offset });
            }
        }

        Ok(Self {
            index,
            data,
            continuous_block_end,
        })
    }

    /// индекс блоков
    pub fn index(&self) -> &[u16]
    {
        &self.index
    }

    /// блоки значений
    pub fn data(&self) -> &[T]
    {
        &self.data
    }

    /// граница последовательно записанных блоков
    pub fn continuous_block_end(&self) -> u32
    {
        self.continuous_block_end
    }
}

/// итератор по диапазонам trie
pub struct TrieRanges<'a, T>
{
    trie: &'a CodepointTrie<T>,
    next: u32,
}

impl<'a, T: TrieValue> Iterator for TrieRanges<'a, T>
{
    type Item = (u32, u32, T);

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.next >= CODEPOINTS_COUNT {
            return None;
        }

        let start = self.next;
        let value = self.trie.get(start);
        let indexed_end = (self.trie.index.len() as u32) << BLOCK_BITS;

        let mut end = start;

        loop {
            // за пределами индекса - только значение по умолчанию
            if end + 1 >= indexed_end && value == T::default() {
                end = CODEPOINTS_COUNT - 1;
                break;
            }

            if end + 1 >= CODEPOINTS_COUNT || self.trie.get(end + 1) != value {
                break;
            }

            end += 1;
        }

        self.next = end + 1;

        Some((start, end, value))
    }
}

/// изменяемая таблица значений для всех кодпоинтов, из которой собирается компактный trie
pub struct TrieBuilder<T>
{
    values: Vec<T>,
}

impl<T: TrieValue> TrieBuilder<T>
{
    pub fn new() -> Self
    {
        Self {
            values: vec![T::default(); CODEPOINTS_COUNT as usize],
        }
    }

    #[inline(always)]
    pub fn get(&self, code: u32) -> T
    {
        match self.values.get(code as usize) {
            Some(&value) => value,
            None => T::default(),
        }
    }

    #[inline(always)]
    pub fn set(&mut self, code: u32, value: T)
    {
        if let Some(entry) = self.values.get_mut(code as usize) {
            *entry = value;
        }
    }

    /// собираем trie: первые блоки пишутся последовательно, остальные - без повторов,
    /// блоки после последнего непустого в индекс не попадают
    pub fn build(self) -> CodepointTrie<T>
    {
        let blocks: Vec<&[T]> = self.values.chunks(BLOCK_SIZE).collect();
        let continuous_blocks = ((CONTINUOUS_BLOCK_END + 1) >> BLOCK_BITS) as usize;

        let last_nonempty_block = blocks
            .iter()
            .rposition(|block| block.iter().any(|v| *v != T::default()))
            .map_or(0, |block| block + 1)
            .max(continuous_blocks);

        let mut data: Vec<T> = Vec::with_capacity(continuous_blocks * BLOCK_SIZE);
        let mut index: Vec<u16> = Vec::with_capacity(last_nonempty_block);
        let mut known: HashMap<&[T], u16> = HashMap::new();

        for (number, &block) in blocks[.. last_nonempty_block].iter().enumerate() {
            let position = (data.len() >> BLOCK_BITS) as u16;

            if number < continuous_blocks {
                known.entry(block).or_insert(position);
                index.push(position);
                data.extend_from_slice(block);
                continue;
            }

            match known.get(block) {
                Some(&existing) => index.push(existing),
                None => {
                    known.insert(block, position);
                    index.push(position);
                    data.extend_from_slice(block);
                }
            }
        }

        CodepointTrie {
            index,
            data,
            continuous_block_end: CONTINUOUS_BLOCK_END,
        }
    }
}

impl<T: TrieValue> Default for TrieBuilder<T>
{
    fn default() -> Self
    {
        Self::new()
    }
}
