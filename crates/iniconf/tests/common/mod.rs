//! Configuration types shared by the integration tests.

#![allow(dead_code)]

use iniconf::Ini;

/// Two-section config mirroring a typical service setup.
#[derive(Debug, Clone, Default, PartialEq, Ini)]
pub struct AppConfig {
    /// Scalar root members are not sections and never appear in text.
    pub revision: u32,
    pub server: Server,
    pub mysql: Mysql,
}

#[derive(Debug, Clone, Default, PartialEq, Ini)]
pub struct Server {
    pub ip: String,
    pub port: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Ini)]
pub struct Mysql {
    pub username: String,
    pub timeout: f64,
}

/// Exercises every scalar width plus tags on both levels.
#[derive(Debug, Clone, Default, PartialEq, Ini)]
pub struct Wide {
    #[ini(rename = "numbers")]
    pub values: Numbers,
    #[ini(skip)]
    pub cache: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Ini)]
pub struct Numbers {
    #[ini(rename = "small")]
    pub tiny: i8,
    pub short: i16,
    pub int: i32,
    pub long: i64,
    pub size: isize,
    pub byte: u8,
    pub word: u16,
    pub dword: u32,
    pub qword: u64,
    pub usize_value: usize,
    pub single: f32,
    pub double: f64,
    pub label: String,
}

pub const SAMPLE: &str = "\
[server]
ip=127.0.0.1
port=8080

[mysql]
username=root
timeout=1.5
";
