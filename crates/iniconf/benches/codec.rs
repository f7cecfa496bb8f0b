use criterion::{Criterion, criterion_group, criterion_main};
use iniconf::{Ini, IniConfig, decode, encode};
use std::hint::black_box;

#[derive(Debug, Clone, Default, Ini)]
struct Config {
    server: Server,
    mysql: Mysql,
}

#[derive(Debug, Clone, Default, Ini)]
struct Server {
    ip: String,
    port: u16,
}

#[derive(Debug, Clone, Default, Ini)]
struct Mysql {
    username: String,
    password: String,
    database: String,
    host: String,
    port: u16,
    timeout: f32,
}

fn sample_config() -> Config {
    Config {
        server: Server {
            ip: "127.0.0.1".to_string(),
            port: 8080,
        },
        mysql: Mysql {
            username: "root".to_string(),
            password: "secret".to_string(),
            database: "app".to_string(),
            host: "db.internal".to_string(),
            port: 3306,
            timeout: 1.5,
        },
    }
}

fn bench_encode(criterion: &mut Criterion) {
    let config = sample_config();
    criterion.bench_function("iniconf_encode", |bencher| {
        bencher.iter(|| encode(black_box(&config)).expect("encode"));
    });
}

fn bench_decode(criterion: &mut Criterion) {
    let text = sample_config().to_ini_bytes().expect("encode");
    criterion.bench_function("iniconf_decode", |bencher| {
        bencher.iter(|| {
            let mut config = Config::default();
            decode(black_box(&text), &mut config).expect("decode");
            config
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
