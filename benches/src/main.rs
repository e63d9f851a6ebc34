use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::process::ExitCode;

/// группы бенчмарков в порядке вывода
const GROUPS: [(&str, &str); 5] = [
    ("nfc", "NFC"),
    ("nfd", "NFD"),
    ("fcc", "FCC"),
    ("fcd", "FCD"),
    ("dec", "NFC ИЗ NFD"),
];

/// выведем результаты бенчмарка (вывод criterion) как CSV, время в микросекундах
fn main() -> ExitCode
{
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Использование: {} <имя файла>", args[0]);
        return ExitCode::FAILURE;
    }

    let contents = match fs::read_to_string(&args[1]) {
        Ok(contents) => contents,
        Err(e) => {
            println!("Не удалось прочитать файл: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let results = parse_str(&contents);

    for (group, title) in GROUPS {
        if let Some(rows) = results.get(group) {
            println!("{}:\n{}\n", title, make_csv(rows));
        }
    }

    ExitCode::SUCCESS
}

/// группа -> язык -> вариант (my / icu) -> время
type Results = BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>;

fn make_csv(rows: &BTreeMap<String, BTreeMap<String, u32>>) -> String
{
    let mut variants: Vec<&String> = rows.values().flat_map(|row| row.keys()).collect();
    variants.sort();
    variants.dedup();

    let mut result = String::new();

    for variant in variants.iter() {
        result.push_str(format!(";{}", variant).as_str());
    }

    for (language, row) in rows.iter() {
        result.push('\n');
        result.push_str(language);

        for variant in variants.iter() {
            result.push_str(format!(";{}", row.get(*variant).unwrap_or(&0)).as_str());
        }
    }

    result
}

/// строки вида "nfc/my/russian   time:   [1.2345 µs 1.2400 µs 1.2456 µs]", берём среднее значение
fn parse_str(source: &str) -> Results
{
    let mut result = Results::new();

    for line in source.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 6 || parts[1] != "time:" {
            continue;
        }

        let name: Vec<&str> = parts[0].split('/').collect();

        let (group, variant, language) = match name[..] {
            [group, variant, language] => (group, variant, language),
            _ => continue,
        };

        let time = match parts[4].parse::<f64>() {
            Ok(time) => time,
            Err(_) => continue,
        };

        let time = match parts[5] {
            "ns" => time / 1000.0,
            "ms" => time * 1000.0,
            "s" => time * 1_000_000.0,
            _ => time,
        };

        result
            .entry(group.to_owned())
            .or_default()
            .entry(language.to_owned())
            .or_default()
            .insert(variant.to_owned(), time.round() as u32);
    }

    result
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn criterion_output()
    {
        let output = "\
nfc/my/russian          time:   [1.1000 µs 1.2000 µs 1.3000 µs]
nfc/icu/russian         time:   [2.0000 µs 2.4000 µs 2.6000 µs]
nfd/my/korean           time:   [900.00 ns 1500.0 ns 1600.0 ns]
                        change: [-1.0% +0.2% +1.1%] (p = 0.60 > 0.05)
";

        let results = parse_str(output);

        assert_eq!(results["nfc"]["russian"]["my"], 1);
        assert_eq!(results["nfc"]["russian"]["icu"], 2);
        assert_eq!(results["nfd"]["korean"]["my"], 2);

        assert_eq!(make_csv(&results["nfc"]), ";icu;my\nrussian;2;1");
    }
}
