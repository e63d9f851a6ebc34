use tracing::debug;

use crate::data::NormalizationData;
use crate::error::DataError;

use norms::Norms;
use properties::{Properties, UnicodeProperties};

pub use stats::Statistics;

mod encode;
mod norms;
mod properties;
mod stats;

/// подготовить таблицы канонической нормализации из свойств Unicode
pub(crate) fn build() -> Result<NormalizationData, DataError>
{
    build_with(&UnicodeProperties)
}

pub(crate) fn build_with<P: Properties>(properties: &P) -> Result<NormalizationData, DataError>
{
    let norms = Norms::collect(properties);
    let encoded = encode::encode(&norms)?;

    // битовая карта small FCD считается по готовым значениям norm16
    let mut data = NormalizationData::from_parts(encoded.thresholds, encoded.trie, encoded.compositions, [0xFF; 0x100])?;
    let small_fcd = small_fcd(&data);
    data.set_small_fcd(small_fcd);

    let stats = data.statistics();

    debug!(
        trie_index = stats.trie_index,
        trie_data = stats.trie_data,
        compositions = stats.compositions,
        min_decomp_no_cp = stats.thresholds.min_decomp_no_cp,
        min_comp_no_maybe_cp = stats.thresholds.min_comp_no_maybe_cp,
        "таблицы нормализации подготовлены"
    );

    for (band, count) in stats.bands.iter() {
        debug!(band, count, "диапазон norm16");
    }

    Ok(data)
}

/// по биту на каждые 32 кодпоинта BMP; дополнительные кодпоинты отмечаются битом своего ведущего суррогата
fn small_fcd(data: &NormalizationData) -> [u8; 0x100]
{
    let mut bits = [0u8; 0x100];

    for (start, end, norm16) in data.trie.ranges() {
        if data.is_inert(norm16) || data.is_hangul(norm16) {
            continue;
        }

        for code in start ..= end {
            if data.get_fcd16_from_norm_data(code) == 0 {
                continue;
            }

            let lead = match code <= 0xFFFF {
                true => code,
                false => 0xD7C0 + (code >> 10),
            };

            bits[(lead >> 8) as usize] |= 1 << ((lead >> 5) & 7);
        }
    }

    bits
}
