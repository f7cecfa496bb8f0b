//! Single-pass decoder driving the lexer against a schema.

use crate::error::IniError;
use crate::lexer::{self, Line};
use crate::schema::{Schema, Section};
use log::debug;

const BYTE_ORDER_MARK: &[u8] = b"\xef\xbb\xbf";

/// Apply `bytes` to `config`, writing matched fields in place as they are read.
///
/// Lines before the first known section header, lines inside unknown
/// sections and unknown keys are dropped. Comments and dropped lines are never
/// checked for UTF-8. The first syntax, encoding or conversion error aborts
/// the pass; earlier assignments stay applied.
pub(crate) fn apply<T>(
    schema: &Schema<T>,
    bytes: &[u8],
    config: &mut T,
) -> Result<(), IniError> {
    let bytes = bytes.strip_prefix(BYTE_ORDER_MARK).unwrap_or(bytes);

    let mut current: Option<&Section<T>> = None;
    let mut applied = 0usize;
    for (index, raw) in bytes.split(|byte| *byte == b'\n').enumerate() {
        let number = index + 1;
        let trimmed = raw.trim_ascii();
        if trimmed.is_empty() || trimmed.starts_with(b"#") || trimmed.starts_with(b";") {
            continue;
        }
        if current.is_none() && !trimmed.starts_with(b"[") {
            continue;
        }
        let raw = std::str::from_utf8(raw)
            .map_err(|source| IniError::InvalidUtf8 { line: number, source })?;
        match lexer::classify(raw, number)? {
            Line::Blank | Line::Comment => {}
            Line::Header(name) => {
                current = schema.section(name);
                if current.is_none() {
                    debug!("line {number}: skipping unknown section `{name}`");
                }
            }
            Line::Body(body) => {
                let Some(section) = current else {
                    continue;
                };
                let (key, value) = lexer::split_item(body, number)?;
                let Some(field) = section.field(key) else {
                    debug!("line {number}: ignoring unknown key `{}.{key}`", section.name());
                    continue;
                };
                field
                    .assign(config, value)
                    .map_err(|source| IniError::ValueConversion {
                        line: number,
                        section: section.name().to_string(),
                        key: key.to_string(),
                        value: value.to_string(),
                        source,
                    })?;
                applied += 1;
            }
        }
    }
    debug!("decoded config (fields_applied={applied})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::{CoercionError, IniError};
    use crate::shape::{Member, Shape};
    use crate::Schema;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, PartialEq)]
    struct Server {
        ip: String,
        port: u32,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Root {
        server: Server,
    }

    fn ip(this: &Server) -> &String {
        &this.ip
    }
    fn ip_mut(this: &mut Server) -> &mut String {
        &mut this.ip
    }
    fn port(this: &Server) -> &u32 {
        &this.port
    }
    fn port_mut(this: &mut Server) -> &mut u32 {
        &mut this.port
    }
    fn server(this: &Root) -> &Server {
        &this.server
    }
    fn server_mut(this: &mut Root) -> &mut Server {
        &mut this.server
    }

    fn schema() -> Schema<Root> {
        let server_shape = Shape::Struct(vec![
            Member::of("ip", ip, ip_mut),
            Member::of("port", port, port_mut),
        ]);
        Schema::from_shape(Shape::Struct(vec![Member::new(
            "server",
            server_shape.project(server, server_mut),
        )]))
        .expect("schema")
    }

    fn decode(text: &str) -> (Root, Result<(), IniError>) {
        let mut root = Root::default();
        let result = super::apply(&schema(), text.as_bytes(), &mut root);
        (root, result)
    }

    #[test]
    fn ignores_lines_before_first_section() {
        let (root, result) = decode("stray line\nkey=value\n[server]\nport=1\n");
        result.expect("decode");
        assert_eq!(root.server.port, 1);
    }

    #[test]
    fn drops_body_of_unknown_sections() {
        let (root, result) = decode("[other]\nnot an item\nport=9\n[server]\nip=a\n");
        result.expect("decode");
        assert_eq!(root.server, Server { ip: "a".to_string(), port: 0 });
    }

    #[test]
    fn accepts_crlf_and_byte_order_mark() {
        let (root, result) = decode("\u{feff}[server]\r\nip = 10.0.0.1 \r\nport=7\r\n");
        result.expect("decode");
        assert_eq!(
            root.server,
            Server {
                ip: "10.0.0.1".to_string(),
                port: 7
            }
        );
    }

    #[test]
    fn later_duplicate_key_wins() {
        let (root, result) = decode("[server]\nport=1\nport=2\n");
        result.expect("decode");
        assert_eq!(root.server.port, 2);
    }

    #[test]
    fn comments_are_skipped_in_any_state() {
        let (root, result) = decode("; top\n[server]\n# ip=ignored\nip=kept\n");
        result.expect("decode");
        assert_eq!(root.server.ip, "kept");
    }

    #[test]
    fn missing_assignment_reports_line() {
        let (_, result) = decode("[server]\nip=a\n\nport\n");
        assert!(matches!(
            result,
            Err(IniError::MissingAssignment { line: 4, .. })
        ));
    }

    #[test]
    fn header_errors_fire_outside_known_sections() {
        let (_, result) = decode("[unknown]\n[x\n");
        let err = result.unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(matches!(err, IniError::MalformedSection { .. }));
    }

    #[test]
    fn conversion_error_keeps_earlier_fields() {
        let (root, result) = decode("[server]\nip=127.0.0.1\nport=-5\nip=late\n");
        match result.unwrap_err() {
            IniError::ValueConversion {
                line,
                section,
                key,
                value,
                source,
            } => {
                assert_eq!(line, 3);
                assert_eq!(section, "server");
                assert_eq!(key, "port");
                assert_eq!(value, "-5");
                assert!(matches!(source, CoercionError::Int(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(root.server.ip, "127.0.0.1");
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let mut root = Root::default();
        let bytes = b"[server]\nip=\xff\n";
        let err = super::apply(&schema(), bytes, &mut root).unwrap_err();
        assert!(matches!(err, IniError::InvalidUtf8 { line: 2, .. }));
    }

    #[test]
    fn non_utf8_comments_and_dropped_lines_are_tolerated() {
        let mut root = Root::default();
        let bytes: &[u8] =
            b"; caf\xe9 settings\nstray \xff\n[legacy]\nname=M\xfcller\n[server]\nport=8080\n";
        super::apply(&schema(), bytes, &mut root).expect("decode");
        assert_eq!(root.server.port, 8080);
    }

    #[test]
    fn invalid_utf8_keeps_earlier_fields() {
        let mut root = Root::default();
        let bytes = b"[server]\nport=7\n# \xff\n[serv\xe9r]\n";
        let err = super::apply(&schema(), bytes, &mut root).unwrap_err();
        assert!(matches!(err, IniError::InvalidUtf8 { line: 4, .. }));
        assert_eq!(root.server.port, 7);
    }
}
