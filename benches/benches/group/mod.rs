use unicode_normalizing::Normalizer;

pub const WARM_UP_TIME: u64 = 3;
pub const MEASUREMENT_TIME: u64 = 7;

/// группа бенчмарков: нормализатор $normalizer типа $type на текстах из папки $dir,
/// предварительно приведённых к форме $input
#[macro_export]
macro_rules! group {
    ($dir: expr, $input: expr, $fn: ident, $test: ident, $group: expr,  $name:expr, $type: ty, $normalizer: expr) => {
        #[inline(never)]
        fn $test(normalizer: &$type, source: &str) -> String
        {
            String::from(normalizer.normalize(source))
        }

        fn $fn(c: &mut Criterion)
        {
            let mut group = c.benchmark_group($group);
            let normalizer: $type = $normalizer;

            group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
            group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));

            for data in group::read_dir($dir, $input) {
                let text_name = data.0.as_str();
                let text = data.1.as_str();

                group.bench_with_input(
                    criterion::BenchmarkId::new($name, &text_name),
                    &(&normalizer, text),
                    |b, data| b.iter(|| $test(data.0, criterion::black_box(data.1))),
                );
            }

            group.finish();
        }
    };
}

/// прочитать папку с тестовыми текстами, нормализовав их нормализатором input (если он есть)
pub fn read_dir(dir: &str, input: Option<Normalizer>) -> Vec<(String, String)>
{
    let dir = std::fs::read_dir(dir).unwrap();

    let mut data: Vec<(String, String)> = vec![];

    for entry in dir {
        let entry = entry.unwrap();

        let path = entry.path();
        let path = path.to_str().unwrap();

        let text = read(path, 1);

        let text = match input {
            Some(normalizer) => normalizer.normalize(&text),
            None => text,
        };

        data.push((get_name(path).to_owned(), text));
    }

    data.sort_by(|a, b| a.0.cmp(&b.0));

    data
}

/// прочитать файл n раз
fn read(source: &str, times: usize) -> String
{
    let mut file = std::fs::File::open(source).unwrap();
    let mut buffer = String::new();

    std::io::Read::read_to_string(&mut file, &mut buffer).unwrap();

    let mut result = String::new();

    for _ in 0 ..= times {
        result.push_str(buffer.as_str());
    }

    result
}

/// вырезать из полного пути к файлу его название, без формата
fn get_name(filename: &str) -> &str
{
    let (_, name) = filename.trim_end_matches(".txt").rsplit_once('/').unwrap();

    name
}
