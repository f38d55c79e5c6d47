use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hjson::{marshal, parse, unmarshal};

const CONFIG: &str = r#"
# server configuration
{
  host: localhost
  port: 8080
  motd: welcome to the machine
  limits: {
    burst: 10
    window: 2.5
    paths: [
      "/api/v1"
      "/api/v2"
      "/internal"
    ]
  }
  banner:
    '''
    line one
    line two
    line three
    '''
  flags: [true, false, null, 42, 3.5]
}
"#;

#[derive(Default)]
struct Limits {
    burst: u32,
    window: f64,
    paths: Vec<String>,
}
hjson::hjson_record!(Limits { burst, window, paths });

#[derive(Default)]
struct Config {
    host: String,
    port: u16,
    motd: String,
    limits: Limits,
    banner: String,
}
hjson::hjson_record!(Config {
    host,
    port,
    motd,
    limits,
    banner,
});

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse config", |b| {
        b.iter(|| parse(black_box(CONFIG.as_bytes())).unwrap())
    });
}

fn bench_unmarshal(c: &mut Criterion) {
    c.bench_function("unmarshal config into record", |b| {
        b.iter(|| {
            let mut config = Config::default();
            unmarshal(black_box(CONFIG.as_bytes()), &mut config).unwrap();
            config.port
        })
    });
}

fn bench_marshal(c: &mut Criterion) {
    let value = parse(CONFIG.as_bytes()).unwrap();
    c.bench_function("marshal config", |b| {
        b.iter(|| marshal(black_box(&value)).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_unmarshal, bench_marshal);
criterion_main!(benches);
