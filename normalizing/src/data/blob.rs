use sha2::{Digest, Sha256};
use tracing::warn;

use super::*;

/// сигнатура бинарных данных нормализации
pub const MAGIC: &[u8; 4] = b"Nrm2";
/// версия формата
pub const FORMAT_VERSION: u8 = 1;
/// длина SHA-256
const DIGEST_LEN: usize = 32;
/// сигнатура, версия и 3 зарезервированных байта
const HEADER_LEN: usize = 8;

impl NormalizationData
{
    /// сериализация таблиц, все числа - little endian
    pub fn to_bytes(&self) -> Vec<u8>
    {
        let mut bytes = Vec::with_capacity(
            HEADER_LEN
                + 32
                + self.trie.index().len() * 2
                + self.trie.data().len() * 2
                + self.compositions.len() * 2
                + self.small_fcd.len()
                + DIGEST_LEN,
        );

        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&[FORMAT_VERSION, 0, 0, 0]);

        let t = self.thresholds();

        bytes.extend_from_slice(&t.min_decomp_no_cp.to_le_bytes());
        bytes.extend_from_slice(&t.min_comp_no_maybe_cp.to_le_bytes());

        for value in [t.min_yes_no, t.min_yes_no_mappings_only, t.min_no_no, t.limit_no_no, t.min_maybe_yes] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        bytes.extend_from_slice(&self.trie.continuous_block_end().to_le_bytes());
        write_units(&mut bytes, self.trie.index());
        write_units(&mut bytes, self.trie.data());
        write_units(&mut bytes, &self.compositions);

        bytes.extend_from_slice(&self.small_fcd);

        let digest = Sha256::digest(&bytes);
        bytes.extend_from_slice(&digest);

        bytes
    }

    /// загрузка таблиц из бинарных данных с полной проверкой
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DataError>
    {
        Self::read(bytes).map_err(|error| {
            warn!(%error, len = bytes.len(), "данные нормализации отклонены");
            error
        })
    }

    fn read(bytes: &[u8]) -> Result<Self, DataError>
    {
        if bytes.len() < HEADER_LEN + DIGEST_LEN {
            return Err(DataError::Truncated {
                expected: HEADER_LEN + DIGEST_LEN,
                actual: bytes.len(),
            });
        }

        if &bytes[.. 4] != MAGIC {
            return Err(DataError::BadMagic);
        }

        if bytes[4] != FORMAT_VERSION {
            return Err(DataError::UnsupportedVersion(bytes[4]));
        }

        let (content, digest) = bytes.split_at(bytes.len() - DIGEST_LEN);

        if Sha256::digest(content).as_slice() != digest {
            return Err(DataError::Checksum);
        }

        let mut reader = Reader {
            bytes: content,
            position: HEADER_LEN,
        };

        let min_decomp_no_cp = reader.u32()?;
        let min_comp_no_maybe_cp = reader.u32()?;

        let thresholds = Thresholds {
            min_decomp_no_cp,
            min_comp_no_maybe_cp,
            min_yes_no: reader.u16()?,
            min_yes_no_mappings_only: reader.u16()?,
            min_no_no: reader.u16()?,
            limit_no_no: reader.u16()?,
            min_maybe_yes: reader.u16()?,
        };

        let continuous_block_end = reader.u32()?;
        let index = reader.units()?;
        let trie_data = reader.units()?;
        let compositions = reader.units()?;

        let mut small_fcd = [0; 0x100];
        small_fcd.copy_from_slice(reader.take(0x100)?);

        let trie = CodepointTrie::from_parts(index, trie_data, continuous_block_end)?;

        Self::from_parts(thresholds, trie, compositions, small_fcd)
    }
}

/// длина (u32) и сами 16-битные единицы
fn write_units(bytes: &mut Vec<u8>, units: &[u16])
{
    bytes.extend_from_slice(&(units.len() as u32).to_le_bytes());
    units.iter().for_each(|unit| bytes.extend_from_slice(&unit.to_le_bytes()));
}

struct Reader<'a>
{
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a>
{
    fn take(&mut self, len: usize) -> Result<&'a [u8], DataError>
    {
        let end = self.position + len;

        match self.bytes.get(self.position .. end) {
            Some(slice) => {
                self.position = end;
                Ok(slice)
            }
            None => Err(DataError::Truncated {
                expected: end + DIGEST_LEN,
                actual: self.bytes.len() + DIGEST_LEN,
            }),
        }
    }

    fn u16(&mut self) -> Result<u16, DataError>
    {
        let slice = self.take(2)?;
        Ok(u16::from_le_bytes([slice[0], slice[1]]))
    }

    fn u32(&mut self) -> Result<u32, DataError>
    {
        let slice = self.take(4)?;
        Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }

    fn units(&mut self) -> Result<Vec<u16>, DataError>
    {
        let len = self.u32()? as usize;
        let slice = self.take(len.saturating_mul(2))?;

        Ok(slice.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect())
    }
}
