use std::collections::{BTreeMap, HashMap};

use super::properties::Properties;
use crate::data::MAX_DELTA;
use crate::error::DataError;
use crate::hangul;

/// свойства кодпоинта, от которых зависит его norm16
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct Norm
{
    pub cc: u8,
    /// полная декомпозиция в каноническом порядке
    pub mapping: Vec<char>,
    /// исходная (одноуровневая) декомпозиция, если отличается от полной
    pub raw: Option<Vec<char>>,
    /// пары (второй кодпоинт, составной) по возрастанию второго кодпоинта
    pub compositions: Vec<(char, char)>,
    /// бывает вторым кодпоинтом первичной композиции
    pub combines_back: bool,
    /// NFC(c) = c
    pub two_way: bool,
}

/// вид значения norm16
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind
{
    Inert,
    JamoL,
    JamoVT,
    Hangul,
    /// стартер без декомпозиции со списком композиций
    YesYes,
    /// двусторонняя декомпозиция
    YesNo,
    /// односторонняя декомпозиция
    NoNo,
    Algorithmic(i32),
    /// комбинируется в обе стороны
    MaybeYes,
    MaybeYesSimple(u8),
    YesYesWithCC(u8),
}

/// свойства всех нетривиальных кодпоинтов
pub(super) struct Norms
{
    norms: BTreeMap<char, Norm>,
    empty: Norm,
}

impl Norms
{
    /// собрать свойства и найти пары первичных композиций
    pub fn collect<P: Properties>(properties: &P) -> Self
    {
        let mut norms: BTreeMap<char, Norm> = BTreeMap::new();
        // полная декомпозиция -> кодпоинты с такой декомпозицией
        let mut by_decomposition: HashMap<Vec<char>, Vec<char>> = HashMap::new();

        for c in (0 .. 0x110000).filter_map(char::from_u32) {
            // слоги хангыль декомпозируются алгоритмически
            if hangul::is_hangul(c as u32) {
                continue;
            }

            let cc = properties.combining_class(c);
            let mut mapping = properties.decomposition(c);

            if cc == 0 && mapping.is_empty() {
                continue;
            }

            canonical_order(&mut mapping, properties);

            if !mapping.is_empty() {
                by_decomposition.entry(mapping.clone()).or_default().push(c);
            }

            norms.insert(c, Norm {
                cc,
                mapping,
                ..Default::default()
            });
        }

        let decomposing: Vec<(char, Vec<char>)> = norms
            .iter()
            .filter(|(_, norm)| !norm.mapping.is_empty())
            .map(|(&c, norm)| (c, norm.mapping.clone()))
            .collect();

        for (c, mapping) in decomposing {
            let two_way = properties.is_nfc(c);

            let raw = match two_way {
                true => primary_pair(c, &mapping, &by_decomposition, properties),
                false => singleton(c, &mapping, &by_decomposition, properties)
                    .or_else(|| raw_pair(c, &mapping, &by_decomposition, properties)),
            };

            if let (true, Some(&[a, b])) = (two_way, raw.as_deref()) {
                norms.entry(a).or_default().compositions.push((b, c));
                norms.entry(b).or_default().combines_back = true;
            }

            if let Some(norm) = norms.get_mut(&c) {
                norm.two_way = two_way;
                norm.raw = raw.filter(|raw| *raw != mapping);
            }
        }

        for norm in norms.values_mut() {
            norm.compositions.sort();
        }

        Self {
            norms,
            empty: Norm::default(),
        }
    }

    #[inline(always)]
    pub fn get(&self, code: u32) -> &Norm
    {
        char::from_u32(code)
            .and_then(|c| self.norms.get(&c))
            .unwrap_or(&self.empty)
    }

    #[inline(always)]
    pub fn cc(&self, c: char) -> u8
    {
        self.get(c as u32).cc
    }

    /// есть ли у кодпоинта список композиций
    #[inline(always)]
    pub fn combines_forward(&self, c: char) -> bool
    {
        !self.get(c as u32).compositions.is_empty()
    }

    /// вид norm16 кодпоинта
    pub fn classify(&self, code: u32) -> Result<Kind, DataError>
    {
        let norm = self.get(code);

        let kind = [
            hangul_syllable, // слог хангыль
            jamo,            // чамо
            maybe_yes,       // комбинируется с предыдущим
            yes_yes_with_cc, // нестартер
            starter,         // стартер без декомпозиции
            yes_no,          // двусторонняя декомпозиция
            algorithmic,     // декомпозиция в близкий кодпоинт
            no_no,           // односторонняя декомпозиция
        ]
        .iter()
        .find_map(|f| f(code, norm));

        kind.ok_or(DataError::TooLarge("свойства кодпоинта не кодируются значением norm16"))
    }
}

/// каноническая сортировка: нестартеры переставляются по возрастанию CCC, стартеры остаются на месте
fn canonical_order<P: Properties>(chars: &mut [char], properties: &P)
{
    for i in 1 .. chars.len() {
        let mut j = i;

        while j > 0 {
            let cc = properties.combining_class(chars[j]);

            if cc == 0 || properties.combining_class(chars[j - 1]) <= cc {
                break;
            }

            chars.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// кодпоинты, полная декомпозиция которых - chars; один кодпоинт без декомпозиции - он сам
fn candidates<'a>(chars: &'a [char], by_decomposition: &'a HashMap<Vec<char>, Vec<char>>) -> impl Iterator<Item = char> + 'a
{
    let single = match chars {
        [c] => Some(*c),
        _ => None,
    };

    single.into_iter().chain(by_decomposition.get(chars).into_iter().flatten().copied())
}

/// декомпозиция без кодпоинта с индексом index
fn without(mapping: &[char], index: usize) -> Vec<char>
{
    mapping[.. index].iter().chain(&mapping[index + 1 ..]).copied().collect()
}

/// пара, из которой c получается первичной композицией
fn primary_pair<P: Properties>(
    c: char,
    mapping: &[char],
    by_decomposition: &HashMap<Vec<char>, Vec<char>>,
    properties: &P,
) -> Option<Vec<char>>
{
    (0 .. mapping.len()).rev().find_map(|index| {
        let b = mapping[index];
        let rest = without(mapping, index);

        let a = candidates(&rest, by_decomposition).find(|&a| properties.compose(a, b) == Some(c))?;

        Some(vec![a, b])
    })
}

/// синглтон: другой кодпоинт с той же полной декомпозицией, не меняющийся при NFC
fn singleton<P: Properties>(
    c: char,
    mapping: &[char],
    by_decomposition: &HashMap<Vec<char>, Vec<char>>,
    properties: &P,
) -> Option<Vec<char>>
{
    let single = by_decomposition
        .get(mapping)?
        .iter()
        .find(|&&s| s != c && properties.is_nfc(s))?;

    Some(vec![*single])
}

/// исходная пара односторонней декомпозиции. предпочитаем первый кодпоинт, не меняющийся при NFC
fn raw_pair<P: Properties>(
    c: char,
    mapping: &[char],
    by_decomposition: &HashMap<Vec<char>, Vec<char>>,
    properties: &P,
) -> Option<Vec<char>>
{
    (0 .. mapping.len()).rev().find_map(|index| {
        let rest = without(mapping, index);
        let found: Vec<char> = candidates(&rest, by_decomposition).filter(|&a| a != c).collect();

        let a = found
            .iter()
            .find(|&&a| properties.is_nfc(a))
            .or_else(|| found.first())?;

        Some(vec![*a, mapping[index]])
    })
}

fn hangul_syllable(code: u32, _: &Norm) -> Option<Kind>
{
    match hangul::is_hangul(code) {
        true => Some(Kind::Hangul),
        false => None,
    }
}

fn jamo(code: u32, _: &Norm) -> Option<Kind>
{
    if hangul::jamo_l(code).is_some() {
        return Some(Kind::JamoL);
    }

    match hangul::jamo_v(code).is_some() || hangul::jamo_t(code).is_some() {
        true => Some(Kind::JamoVT),
        false => None,
    }
}

/// "maybeYes":
///     - нет декомпозиции
///     - комбинируется с предыдущим кодпоинтом
///     - со списком композиций - только при CCC = 0
fn maybe_yes(_: u32, norm: &Norm) -> Option<Kind>
{
    if !norm.mapping.is_empty() || !norm.combines_back {
        return None;
    }

    match (norm.compositions.is_empty(), norm.cc) {
        (true, cc) => Some(Kind::MaybeYesSimple(cc)),
        (false, 0) => Some(Kind::MaybeYes),
        _ => None,
    }
}

/// нестартер без декомпозиции, не комбинирующийся ни с чем
fn yes_yes_with_cc(_: u32, norm: &Norm) -> Option<Kind>
{
    if norm.cc == 0 || !norm.mapping.is_empty() || norm.combines_back || !norm.compositions.is_empty() {
        return None;
    }

    Some(Kind::YesYesWithCC(norm.cc))
}

fn starter(_: u32, norm: &Norm) -> Option<Kind>
{
    if norm.cc != 0 || !norm.mapping.is_empty() || norm.combines_back {
        return None;
    }

    Some(match norm.compositions.is_empty() {
        true => Kind::Inert,
        false => Kind::YesYes,
    })
}

fn yes_no(_: u32, norm: &Norm) -> Option<Kind>
{
    if norm.mapping.is_empty() || !norm.two_way || norm.combines_back {
        return None;
    }

    Some(Kind::YesNo)
}

/// алгоритмическая декомпозиция:
///     - CCC = 0
///     - декомпозиция из одного кодпоинта, отстоящего не дальше MAX_DELTA
fn algorithmic(code: u32, norm: &Norm) -> Option<Kind>
{
    if norm.cc != 0 || norm.two_way || norm.combines_back || !norm.compositions.is_empty() {
        return None;
    }

    let target = match norm.mapping[..] {
        [target] => target as i32,
        _ => return None,
    };

    let delta = target - code as i32;

    match delta.abs() <= MAX_DELTA as i32 {
        true => Some(Kind::Algorithmic(delta)),
        false => None,
    }
}

fn no_no(_: u32, norm: &Norm) -> Option<Kind>
{
    if norm.mapping.is_empty() || norm.combines_back || !norm.compositions.is_empty() {
        return None;
    }

    Some(Kind::NoNo)
}
